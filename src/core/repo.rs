//! Git repository discovery and command plumbing.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use thiserror::Error;

/// Errors from repository operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RepoError {
    /// Path is not inside a git repository.
    #[error("not inside a git repository")]
    NotARepo,
    /// Git command failed with an error message.
    #[error("git command failed: {0}")]
    GitError(String),
    /// I/O error during git operation.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Git output contained invalid UTF-8.
    #[error("invalid utf-8 in git output")]
    InvalidUtf8,
    /// A record in git output could not be parsed.
    #[error("malformed git output: {0}")]
    Malformed(String),
}

/// Canonicalized path to a git repository root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRoot(PathBuf);

impl RepoRoot {
    /// Discover the git repository containing the given path.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use diff_explore::core::RepoRoot;
    /// use std::path::Path;
    ///
    /// let repo = RepoRoot::discover(Path::new(".")).expect("not in a git repo");
    /// println!("Repo at: {}", repo.path().display());
    /// ```
    #[must_use = "this returns a Result that should be checked"]
    pub fn discover(path: &Path) -> Result<Self, RepoError> {
        let output = Command::new("git")
            .arg("rev-parse")
            .arg("--show-toplevel")
            .current_dir(path)
            .output()?;

        if !output.status.success() {
            return Err(RepoError::NotARepo);
        }

        let root = std::str::from_utf8(&output.stdout)
            .map_err(|_| RepoError::InvalidUtf8)?
            .trim();

        let canonical = PathBuf::from(root)
            .canonicalize()
            .map_err(|_| RepoError::NotARepo)?;

        Ok(Self(canonical))
    }

    /// Get the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Map an absolute path inside the repository to a [`RelPath`].
    ///
    /// Returns `None` for paths outside the root or for the root itself.
    pub fn relativize(&self, path: &Path) -> Option<RelPath> {
        let rel = path.strip_prefix(&self.0).ok()?;
        let parts: Vec<String> = rel
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(RelPath::new(parts.join("/")))
    }
}

/// A repository-relative path with `/` separators, as git prints it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelPath(String);

impl RelPath {
    /// Create a new RelPath from git output.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        debug_assert!(
            !path.starts_with('/'),
            "RelPath must not be absolute: {}",
            path
        );
        Self(path)
    }

    /// Get the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the path lies inside git's own metadata directory.
    pub fn is_git_internal(&self) -> bool {
        self.0 == ".git" || self.0.starts_with(".git/")
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Run git in `root` with pagers and prompts disabled.
pub(crate) fn run_git(root: &RepoRoot, args: &[&str]) -> Result<Output, RepoError> {
    log::debug!("git {}", args.join(" "));
    let output = Command::new("git")
        .args(args)
        .current_dir(root.path())
        .env("GIT_TERMINAL_PROMPT", "0")
        .env("GIT_PAGER", "cat")
        .env("PAGER", "cat")
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RepoError::GitError(stderr.trim().to_string()));
    }

    Ok(output)
}
