//! Integration tests with real git repositories.

use std::path::Path;
use std::process::Command;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use diff_explore::core::{
    ChangeKind, CommitRange, DiffLineKind, DiffOptions, GitHistory, HistoryProvider, RelPath,
    RepoError, RepoRoot, RepoWatcher, WatchEvent,
};
use diff_explore::theme::Theme;
use diff_explore::ui::{App, Screen};
use tempfile::TempDir;

fn git(path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn commit_all(path: &Path, message: &str) {
    git(path, &["add", "-A"]);
    git(path, &["commit", "-q", "-m", message]);
}

/// Create a temporary git repo with three commits:
/// 1. add file.txt and notes.md
/// 2. modify file.txt, add src/lib.rs
/// 3. rename notes.md to docs.md, delete src/lib.rs (tagged v1)
fn create_test_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let path = dir.path();

    git(path, &["init", "-q", "-b", "main"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test Person"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    std::fs::write(path.join("file.txt"), "one\ntwo\nthree\n").unwrap();
    std::fs::write(
        path.join("notes.md"),
        "# Notes\n\nline a\nline b\nline c\nline d\n",
    )
    .unwrap();
    commit_all(path, "initial");

    std::fs::write(path.join("file.txt"), "one\n2\nthree\n").unwrap();
    std::fs::create_dir_all(path.join("src")).unwrap();
    std::fs::write(path.join("src/lib.rs"), "pub fn f() {}\n").unwrap();
    commit_all(path, "second");

    git(path, &["mv", "notes.md", "docs.md"]);
    std::fs::remove_file(path.join("src/lib.rs")).unwrap();
    commit_all(path, "third");
    git(path, &["tag", "v1"]);

    dir
}

fn history(dir: &TempDir) -> GitHistory {
    GitHistory::new(RepoRoot::discover(dir.path()).unwrap())
}

#[test]
fn test_repo_discovery() {
    let dir = create_test_repo();
    let repo = RepoRoot::discover(dir.path()).unwrap();
    assert!(repo.path().exists());
}

#[test]
fn test_not_a_repo() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        RepoRoot::discover(dir.path()),
        Err(RepoError::NotARepo)
    ));
}

#[test]
fn test_list_commits_without_any_commit() {
    let dir = TempDir::new().unwrap();
    git(dir.path(), &["init", "-q", "-b", "main"]);

    let h = history(&dir);
    assert!(h.list_commits().unwrap().is_empty());

    let mut app = App::new(h, DiffOptions::default(), Theme::default()).unwrap();
    app.resize(80, 24);
    assert_eq!(app.position(), "0/0");
    app.enter();
    assert_eq!(app.screen(), Screen::Commits);
}

#[test]
fn test_list_commits() {
    let dir = create_test_repo();
    let commits = history(&dir).list_commits().unwrap();

    assert_eq!(commits.len(), 3);
    assert_eq!(commits[0].subject, "third");
    assert_eq!(commits[2].subject, "initial");
    assert_eq!(commits[0].author, "Test Person");
    assert_eq!(commits[0].id.len(), 40);
    assert!(commits[0].decoration.branches.contains(&"main".to_string()));
    assert_eq!(commits[0].decoration.tags, vec!["v1"]);
    assert!(commits[1].decoration.is_empty());
}

#[test]
fn test_diff_stat_between_commits() {
    let dir = create_test_repo();
    let h = history(&dir);
    let commits = h.list_commits().unwrap();

    let range = CommitRange::between(commits[2].id.clone(), commits[1].id.clone());
    let entries = h.diff_stat(&range).unwrap();
    let summary: Vec<(&str, ChangeKind)> =
        entries.iter().map(|e| (e.path.as_str(), e.kind)).collect();
    assert_eq!(
        summary,
        vec![
            ("file.txt", ChangeKind::Modified),
            ("src/lib.rs", ChangeKind::Added),
        ]
    );
}

#[test]
fn test_diff_stat_rename_and_delete() {
    let dir = create_test_repo();
    let h = history(&dir);
    let commits = h.list_commits().unwrap();

    let range = CommitRange::between(commits[1].id.clone(), commits[0].id.clone());
    let entries = h.diff_stat(&range).unwrap();
    assert_eq!(entries.len(), 2);

    let renamed = entries.iter().find(|e| e.kind == ChangeKind::Renamed).unwrap();
    assert_eq!(renamed.path.as_str(), "docs.md");
    assert_eq!(renamed.old_path.as_ref().unwrap().as_str(), "notes.md");

    let deleted = entries.iter().find(|e| e.kind == ChangeKind::Deleted).unwrap();
    assert_eq!(deleted.path.as_str(), "src/lib.rs");
}

#[cfg(target_os = "linux")]
#[test]
fn test_diff_stat_with_non_utf8_file_name() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = create_test_repo();
    let h = history(&dir);
    let before = h.list_commits().unwrap()[0].id.clone();

    std::fs::write(dir.path().join("file.txt"), "one\n2\n3\n").unwrap();
    std::fs::write(dir.path().join(OsStr::from_bytes(b"b\xff.txt")), "odd\n").unwrap();
    commit_all(dir.path(), "odd name");
    let after = h.list_commits().unwrap()[0].id.clone();

    let entries = h.diff_stat(&CommitRange::between(before, after)).unwrap();
    let summary: Vec<(&str, ChangeKind)> =
        entries.iter().map(|e| (e.path.as_str(), e.kind)).collect();
    assert_eq!(
        summary,
        vec![
            ("b\u{FFFD}.txt", ChangeKind::Added),
            ("file.txt", ChangeKind::Modified),
        ]
    );
}

#[test]
fn test_diff_stat_to_working_tree() {
    let dir = create_test_repo();
    let h = history(&dir);
    let head = h.list_commits().unwrap()[0].id.clone();

    let range = CommitRange::to_working_tree(head.clone());
    assert!(h.diff_stat(&range).unwrap().is_empty());

    std::fs::write(dir.path().join("file.txt"), "one\n2\nthree\nfour\n").unwrap();
    let entries = h.diff_stat(&range).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path.as_str(), "file.txt");
}

#[test]
fn test_diff_lines() {
    let dir = create_test_repo();
    let h = history(&dir);
    let commits = h.list_commits().unwrap();

    let range = CommitRange::between(commits[2].id.clone(), commits[1].id.clone());
    let lines = h
        .diff(&range, &RelPath::new("file.txt"), None, DiffOptions::default())
        .unwrap();

    assert!(lines.iter().any(|l| l.kind() == DiffLineKind::Hunk));
    assert!(lines.iter().any(|l| l.text() == "-two"));
    assert!(lines.iter().any(|l| l.text() == "+2"));
    assert!(lines.iter().any(|l| l.text() == " one"));
}

#[test]
fn test_diff_context_lines() {
    let dir = create_test_repo();
    let h = history(&dir);
    let commits = h.list_commits().unwrap();
    let range = CommitRange::between(commits[2].id.clone(), commits[1].id.clone());

    let opts = DiffOptions {
        context_lines: 0,
        ignore_whitespace: false,
    };
    let lines = h
        .diff(&range, &RelPath::new("file.txt"), None, opts)
        .unwrap();
    assert!(!lines.iter().any(|l| l.text() == " one"));
}

#[test]
fn test_diff_ignore_whitespace() {
    let dir = create_test_repo();
    let h = history(&dir);
    let head = h.list_commits().unwrap()[0].id.clone();
    std::fs::write(dir.path().join("file.txt"), "one\n2  \nthree\n").unwrap();

    let range = CommitRange::to_working_tree(head);
    let path = RelPath::new("file.txt");
    let strict = h.diff(&range, &path, None, DiffOptions::default()).unwrap();
    assert!(!strict.is_empty());

    let relaxed = h
        .diff(
            &range,
            &path,
            None,
            DiffOptions {
                ignore_whitespace: true,
                ..DiffOptions::default()
            },
        )
        .unwrap();
    assert!(!relaxed.iter().any(|l| l.kind() == DiffLineKind::Hunk));
}

#[test]
fn test_diff_of_rename_with_old_path() {
    let dir = create_test_repo();
    let h = history(&dir);
    let commits = h.list_commits().unwrap();
    let range = CommitRange::between(commits[1].id.clone(), commits[0].id.clone());

    let lines = h
        .diff(
            &range,
            &RelPath::new("docs.md"),
            Some(&RelPath::new("notes.md")),
            DiffOptions::default(),
        )
        .unwrap();
    assert!(lines.iter().any(|l| l.text().starts_with("rename from")));
}

#[test]
fn test_bad_revision_is_git_error() {
    let dir = create_test_repo();
    let range = CommitRange::to_working_tree("deadbeefdeadbeef");
    assert!(matches!(
        history(&dir).diff_stat(&range),
        Err(RepoError::GitError(_))
    ));
}

#[test]
fn test_app_over_real_repo() {
    let dir = create_test_repo();
    let mut app = App::new(history(&dir), DiffOptions::default(), Theme::default()).unwrap();
    app.resize(100, 30);

    // Oldest commit against the working tree: everything from commit 2 and 3.
    app.next_item();
    app.next_item();
    app.enter();
    assert_eq!(app.screen(), Screen::Stats);
    let paths: Vec<&str> = app
        .stats
        .as_ref()
        .unwrap()
        .entries
        .iter()
        .map(|e| e.path.as_str())
        .collect();
    assert!(paths.contains(&"file.txt"));
    assert!(paths.contains(&"docs.md"));

    let idx = paths.iter().position(|p| *p == "file.txt").unwrap();
    for _ in 0..idx {
        app.next_item();
    }
    app.enter();
    assert_eq!(app.screen(), Screen::Diff);
    let before = app.diff.as_ref().unwrap().lines.len();
    assert!(before > 0);

    std::fs::write(
        dir.path().join("file.txt"),
        "one\n2\nthree\nfour\nfive\nsix\n",
    )
    .unwrap();
    app.handle_watch_event(WatchEvent::Changed(RelPath::new("file.txt")));
    let after = app.diff.as_ref().unwrap();
    assert!(after.lines.len() > before);
    assert_eq!(after.list.count(), after.lines.len());
}

#[test]
fn test_watcher_reports_changed_file() {
    let dir = create_test_repo();
    let repo = RepoRoot::discover(dir.path()).unwrap();

    let (tx, rx) = mpsc::channel();
    let _watcher = RepoWatcher::new(&repo, Duration::from_millis(50), move |ev| {
        let _ = tx.send(ev);
    })
    .unwrap();
    assert_eq!(
        rx.recv_timeout(Duration::from_secs(1)).unwrap(),
        WatchEvent::Ready
    );

    std::fs::write(repo.path().join("file.txt"), "changed\n").unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut seen = Vec::new();
    while Instant::now() < deadline {
        if let Ok(WatchEvent::Changed(p)) = rx.recv_timeout(Duration::from_millis(200)) {
            assert!(!p.is_git_internal());
            let done = p.as_str() == "file.txt";
            seen.push(p);
            if done {
                break;
            }
        }
    }
    assert!(
        seen.iter().any(|p| p.as_str() == "file.txt"),
        "saw {:?}",
        seen
    );
}
