//! User configuration.
//!
//! Read from `config.json` in the diff-explore config directory. A missing
//! file means defaults; a malformed one is reported and ignored.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::core::DiffOptions;

/// Cached config directory path.
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the diff-explore config directory (cached).
pub fn config_dir() -> &'static Path {
    CONFIG_DIR.get_or_init(|| {
        directories::ProjectDirs::from("", "", "diff-explore")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(dirs_fallback)
    })
}

fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(|h| Path::new(&h).join(".config").join("diff-explore"))
        .unwrap_or_else(|_| PathBuf::from(".diff-explore"))
}

/// Errors from loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not valid config JSON.
    #[error("invalid config {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Theme name (builtin or a file in `<config>/themes`).
    pub theme: String,
    /// Diff query settings.
    pub diff: DiffConfig,
    /// File watcher settings.
    pub watch: WatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            diff: DiffConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

/// Diff query settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiffConfig {
    /// Lines of context around each hunk.
    pub context_lines: u32,
    /// Start with whitespace changes ignored.
    pub ignore_whitespace: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        let opts = DiffOptions::default();
        Self {
            context_lines: opts.context_lines,
            ignore_whitespace: opts.ignore_whitespace,
        }
    }
}

/// File watcher settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WatchConfig {
    /// Debounce window in milliseconds.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 200 }
    }
}

impl Config {
    /// Path of the default config file.
    pub fn default_path() -> PathBuf {
        config_dir().join("config.json")
    }

    /// Load from the default location, falling back to defaults on error.
    pub fn load() -> Self {
        match Self::load_from(&Self::default_path()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}", e);
                eprintln!("Warning: {}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load from `path`. A missing file yields defaults.
    #[must_use = "this returns a Result that should be checked"]
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Options for diff queries.
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            context_lines: self.diff.context_lines,
            ignore_whitespace: self.diff.ignore_whitespace,
        }
    }

    /// Watcher debounce window.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.watch.debounce_ms)
    }

    /// Directory holding user theme files.
    pub fn themes_dir() -> PathBuf {
        config_dir().join("themes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.diff_options(), DiffOptions::default());
        assert_eq!(config.debounce(), Duration::from_millis(200));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "theme": "nord", "diff": { "contextLines": 8 } }"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme, "nord");
        assert_eq!(config.diff.context_lines, 8);
        assert!(!config.diff.ignore_whitespace);
        assert_eq!(config.watch.debounce_ms, 200);
    }

    #[test]
    fn full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "theme": "dracula",
                "diff": { "contextLines": 0, "ignoreWhitespace": true },
                "watch": { "debounceMs": 50 }
            }"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.diff_options(),
            DiffOptions {
                context_lines: 0,
                ignore_whitespace: true
            }
        );
        assert_eq!(config.debounce(), Duration::from_millis(50));
    }

    #[test]
    fn malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
