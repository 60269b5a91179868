//! File system watching for live reload.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};

use super::{RelPath, RepoRoot};

/// Events emitted by the repo watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The watch is established.
    Ready,
    /// A file under the repository root changed.
    Changed(RelPath),
}

/// Watches a repository for file changes.
///
/// Events are delivered to a sink callback from the debouncer thread.
pub struct RepoWatcher {
    /// Keep watcher alive. Dropping this stops watching.
    debouncer: Option<Debouncer<notify::RecommendedWatcher>>,
}

impl RepoWatcher {
    /// Watch `root` recursively and deliver events to `sink`.
    ///
    /// Events within `debounce` are batched; each batch yields one
    /// [`WatchEvent::Changed`] per distinct path. Paths inside `.git/` are
    /// dropped. [`WatchEvent::Ready`] is sent once the watch is registered.
    pub fn new<F>(root: &RepoRoot, debounce: Duration, sink: F) -> Result<Self, notify::Error>
    where
        F: Fn(WatchEvent) + Send + Sync + 'static,
    {
        let sink = Arc::new(sink);
        let batch_sink = Arc::clone(&sink);
        let repo = root.clone();

        let mut debouncer = new_debouncer(debounce, move |res: DebounceEventResult| match res {
            Ok(events) => {
                for path in changed_paths(&repo, events.iter().map(|e| e.path.as_path())) {
                    batch_sink(WatchEvent::Changed(path));
                }
            }
            Err(e) => log::warn!("watch error: {}", e),
        })?;

        debouncer
            .watcher()
            .watch(root.path(), RecursiveMode::Recursive)?;

        log::debug!("watching {}", root.path().display());
        sink(WatchEvent::Ready);

        Ok(Self {
            debouncer: Some(debouncer),
        })
    }

    /// Stop watching. No events are delivered afterwards.
    pub fn stop(&mut self) {
        if self.debouncer.take().is_some() {
            log::debug!("watcher stopped");
        }
    }

    /// Whether the watcher is still running.
    pub fn is_running(&self) -> bool {
        self.debouncer.is_some()
    }
}

/// Distinct repository-relative paths in a batch, with `.git/` filtered out.
fn changed_paths<'a>(root: &RepoRoot, paths: impl Iterator<Item = &'a Path>) -> BTreeSet<RelPath> {
    paths
        .filter_map(|p| root.relativize(p))
        .filter(|rel| !rel.is_git_internal())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::mpsc;

    #[test]
    fn changed_paths_filters_and_dedupes() {
        let dir = tempfile::tempdir().unwrap();
        std::process::Command::new("git")
            .args(["init", "-q"])
            .current_dir(dir.path())
            .status()
            .unwrap();
        let root = RepoRoot::discover(dir.path()).unwrap();
        let base = root.path().to_path_buf();

        let inputs: Vec<PathBuf> = vec![
            base.join(".git/objects/ab/cdef"),
            base.join(".git/index"),
            base.join("src/main.rs"),
            base.join("src/main.rs"),
            base.join(".gitignore"),
            PathBuf::from("/elsewhere/file.rs"),
        ];
        let paths = changed_paths(&root, inputs.iter().map(PathBuf::as_path));
        let names: Vec<&str> = paths.iter().map(RelPath::as_str).collect();
        assert_eq!(names, vec![".gitignore", "src/main.rs"]);
    }

    #[test]
    fn sends_ready_then_changed() {
        let dir = tempfile::tempdir().unwrap();
        std::process::Command::new("git")
            .args(["init", "-q"])
            .current_dir(dir.path())
            .status()
            .unwrap();
        let root = RepoRoot::discover(dir.path()).unwrap();

        let (tx, rx) = mpsc::channel();
        let mut watcher = RepoWatcher::new(&root, Duration::from_millis(50), move |ev| {
            let _ = tx.send(ev);
        })
        .unwrap();

        assert_eq!(rx.recv_timeout(Duration::from_secs(1)).unwrap(), WatchEvent::Ready);

        std::fs::write(root.path().join("hello.txt"), "hi\n").unwrap();
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        let mut seen = false;
        while std::time::Instant::now() < deadline {
            if let Ok(WatchEvent::Changed(p)) = rx.recv_timeout(Duration::from_millis(200)) {
                if p.as_str() == "hello.txt" {
                    seen = true;
                    break;
                }
            }
        }
        assert!(seen, "expected a change event for hello.txt");

        watcher.stop();
        assert!(!watcher.is_running());
    }
}
