//! Commit history, diff-stat and diff queries.

use std::cell::Cell;
use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::repo::run_git;
use super::{CommitRange, Decoration, RelPath, RepoError, RepoRoot};

const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';

/// One commit in the history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full revision id.
    pub id: String,
    /// Author name.
    pub author: String,
    /// Commit timestamp.
    pub time: DateTime<Utc>,
    /// Subject line.
    pub subject: String,
    /// Refs pointing at this commit.
    pub decoration: Decoration,
}

/// Kind of change to a file within a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File was added.
    Added,
    /// File was deleted.
    Deleted,
    /// File was modified.
    Modified,
    /// File was renamed or copied.
    Renamed,
}

impl ChangeKind {
    /// Single-letter status, as `git diff --name-status` prints it.
    pub fn letter(self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Deleted => 'D',
            ChangeKind::Modified => 'M',
            ChangeKind::Renamed => 'R',
        }
    }
}

/// A changed file in a commit range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEntry {
    /// Current path of the file.
    pub path: RelPath,
    /// Previous path, for renames only.
    pub old_path: Option<RelPath>,
    /// Type of change.
    pub kind: ChangeKind,
}

impl StatEntry {
    /// Create a non-rename entry.
    pub fn new(path: RelPath, kind: ChangeKind) -> Self {
        Self {
            path,
            old_path: None,
            kind,
        }
    }

    /// Create a renamed entry.
    pub fn renamed(old_path: RelPath, new_path: RelPath) -> Self {
        Self {
            path: new_path,
            old_path: Some(old_path),
            kind: ChangeKind::Renamed,
        }
    }
}

/// Classification of a unified-diff line by its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLineKind {
    /// Starts with `+`.
    Added,
    /// Starts with `-`.
    Removed,
    /// Starts with `@`.
    Hunk,
    /// Anything else.
    Context,
}

/// One line of diff output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine(String);

impl DiffLine {
    /// Wrap a line of text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw line text.
    pub fn text(&self) -> &str {
        &self.0
    }

    /// Classify the line by its leading character.
    pub fn kind(&self) -> DiffLineKind {
        match self.0.as_bytes().first() {
            Some(b'+') => DiffLineKind::Added,
            Some(b'-') => DiffLineKind::Removed,
            Some(b'@') => DiffLineKind::Hunk,
            _ => DiffLineKind::Context,
        }
    }
}

/// Options passed to every diff query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Lines of context around each hunk.
    pub context_lines: u32,
    /// Ignore whitespace when comparing lines.
    pub ignore_whitespace: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context_lines: 3,
            ignore_whitespace: false,
        }
    }
}

/// Source of commit history and diffs.
pub trait HistoryProvider {
    /// All commits reachable from HEAD, most recent first.
    fn list_commits(&self) -> Result<Vec<Commit>, RepoError>;

    /// Files changed in `range`.
    fn diff_stat(&self, range: &CommitRange) -> Result<Vec<StatEntry>, RepoError>;

    /// Diff lines for one file in `range`.
    fn diff(
        &self,
        range: &CommitRange,
        path: &RelPath,
        old_path: Option<&RelPath>,
        opts: DiffOptions,
    ) -> Result<Vec<DiffLine>, RepoError>;
}

/// History provider backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitHistory {
    root: RepoRoot,
}

impl GitHistory {
    /// Query the repository at `root`.
    pub fn new(root: RepoRoot) -> Self {
        Self { root }
    }

    /// Repository root.
    pub fn root(&self) -> &RepoRoot {
        &self.root
    }
}

impl HistoryProvider for GitHistory {
    fn list_commits(&self) -> Result<Vec<Commit>, RepoError> {
        let _timer = crate::metrics::Timer::start("git_log");
        // An unborn branch has no history; git log would fail on it.
        match run_git(&self.root, &["rev-parse", "--verify", "-q", "HEAD"]) {
            Ok(_) => {}
            Err(RepoError::GitError(_)) => {
                log::info!("no commits yet in {}", self.root.path().display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        }
        let output = run_git(
            &self.root,
            &[
                "log",
                "--no-color",
                "--decorate=full",
                "--format=%H%x1f%an%x1f%ct%x1f%s%x1f%D%x1e",
            ],
        )?;
        parse_log(&String::from_utf8_lossy(&output.stdout))
    }

    fn diff_stat(&self, range: &CommitRange) -> Result<Vec<StatEntry>, RepoError> {
        let _timer = crate::metrics::Timer::start("git_diff_stat");
        let mut args = vec!["diff", "--name-status", "-z", "--find-renames", "--no-color"];
        args.push(&range.start);
        if let Some(end) = &range.end {
            args.push(end);
        }
        args.push("--");

        let output = run_git(&self.root, &args)?;
        Ok(parse_name_status(&output.stdout))
    }

    fn diff(
        &self,
        range: &CommitRange,
        path: &RelPath,
        old_path: Option<&RelPath>,
        opts: DiffOptions,
    ) -> Result<Vec<DiffLine>, RepoError> {
        let _timer = crate::metrics::Timer::start("git_diff");
        let context = format!("-U{}", opts.context_lines);
        let mut args = vec![
            "diff",
            "--no-color",
            "--no-ext-diff",
            "--find-renames",
            context.as_str(),
        ];
        if opts.ignore_whitespace {
            args.push("-w");
        }
        args.push(&range.start);
        if let Some(end) = &range.end {
            args.push(end);
        }
        args.push("--");
        args.push(path.as_str());
        if let Some(old) = old_path {
            args.push(old.as_str());
        }

        let output = run_git(&self.root, &args)?;
        Ok(parse_diff_lines(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Parse `git log` output in the field/record separated format used by
/// [`GitHistory::list_commits`].
pub fn parse_log(text: &str) -> Result<Vec<Commit>, RepoError> {
    let mut commits = Vec::new();

    for record in text.split(RECORD_SEP) {
        let record = record.trim_start_matches(['\n', '\r']);
        if record.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = record.splitn(5, FIELD_SEP).collect();
        let [id, author, ts, subject, deco] = fields[..] else {
            return Err(RepoError::Malformed(format!(
                "expected 5 log fields, got {}",
                fields.len()
            )));
        };

        let ts: i64 = ts
            .trim()
            .parse()
            .map_err(|_| RepoError::Malformed(format!("bad commit timestamp: {}", ts)))?;
        let time = DateTime::from_timestamp(ts, 0)
            .ok_or_else(|| RepoError::Malformed(format!("timestamp out of range: {}", ts)))?;

        commits.push(Commit {
            id: id.trim().to_string(),
            author: author.to_string(),
            time,
            subject: subject.to_string(),
            decoration: Decoration::parse(deco),
        });
    }

    Ok(commits)
}

/// Parse `git diff --name-status -z` output.
///
/// Paths that are not valid UTF-8 are decoded lossily so one odd file name
/// does not hide the rest of the change set.
pub fn parse_name_status(output: &[u8]) -> Vec<StatEntry> {
    let mut entries = Vec::new();
    let mut parts = output.split(|&b| b == 0).map(String::from_utf8_lossy);

    while let Some(status) = parts.next() {
        let Some(status_char) = status.chars().next() else {
            continue;
        };
        let Some(path) = parts.next().filter(|p| !p.is_empty()) else {
            continue;
        };

        let kind = match status_char {
            'A' => ChangeKind::Added,
            'D' => ChangeKind::Deleted,
            'R' | 'C' => {
                // Rename/copy: the old path comes first, the new one next.
                if let Some(new_path) = parts.next() {
                    entries.push(StatEntry::renamed(
                        RelPath::new(path.into_owned()),
                        RelPath::new(new_path.into_owned()),
                    ));
                    continue;
                }
                ChangeKind::Modified
            }
            _ => ChangeKind::Modified,
        };

        entries.push(StatEntry::new(RelPath::new(path.into_owned()), kind));
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    entries
}

/// Split diff output into lines.
pub fn parse_diff_lines(text: &str) -> Vec<DiffLine> {
    text.lines().map(DiffLine::new).collect()
}

/// In-memory history, for tests and demos.
///
/// Counts the stat and diff queries it answers.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    commits: Vec<Commit>,
    stats: HashMap<CommitRange, Vec<StatEntry>>,
    diffs: HashMap<RelPath, Vec<String>>,
    failing: bool,
    stat_queries: Cell<usize>,
    diff_queries: Cell<usize>,
    last_options: Cell<Option<DiffOptions>>,
}

impl MemoryHistory {
    /// Create a history over `commits` (most recent first).
    pub fn new(commits: Vec<Commit>) -> Self {
        Self {
            commits,
            ..Default::default()
        }
    }

    /// Set the stat entries returned for `range`.
    pub fn set_stats(&mut self, range: CommitRange, entries: Vec<StatEntry>) {
        self.stats.insert(range, entries);
    }

    /// Set the diff lines returned for `path`, for any range.
    pub fn set_diff<S: Into<String>>(&mut self, path: &str, lines: impl IntoIterator<Item = S>) {
        self.diffs.insert(
            RelPath::new(path),
            lines.into_iter().map(Into::into).collect(),
        );
    }

    /// Make every stat and diff query fail.
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Number of stat queries answered so far.
    pub fn stat_queries(&self) -> usize {
        self.stat_queries.get()
    }

    /// Number of diff queries answered so far.
    pub fn diff_queries(&self) -> usize {
        self.diff_queries.get()
    }

    /// Options passed to the most recent diff query.
    pub fn last_options(&self) -> Option<DiffOptions> {
        self.last_options.get()
    }
}

impl HistoryProvider for MemoryHistory {
    fn list_commits(&self) -> Result<Vec<Commit>, RepoError> {
        Ok(self.commits.clone())
    }

    fn diff_stat(&self, range: &CommitRange) -> Result<Vec<StatEntry>, RepoError> {
        self.stat_queries.set(self.stat_queries.get() + 1);
        if self.failing {
            return Err(RepoError::GitError(format!("bad range {}", range)));
        }
        Ok(self.stats.get(range).cloned().unwrap_or_default())
    }

    fn diff(
        &self,
        range: &CommitRange,
        path: &RelPath,
        _old_path: Option<&RelPath>,
        opts: DiffOptions,
    ) -> Result<Vec<DiffLine>, RepoError> {
        self.diff_queries.set(self.diff_queries.get() + 1);
        self.last_options.set(Some(opts));
        if self.failing {
            return Err(RepoError::GitError(format!("bad range {}", range)));
        }
        Ok(self
            .diffs
            .get(path)
            .map(|lines| lines.iter().map(DiffLine::new).collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_log_records() {
        let text = "aaaa\x1fAlice Smith\x1f1700000000\x1fFirst subject\x1fHEAD -> refs/heads/main\x1e\n\
                    bbbb\x1fBob\x1f1690000000\x1fSecond\x1f\x1e\n";
        let commits = parse_log(text).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].id, "aaaa");
        assert_eq!(commits[0].author, "Alice Smith");
        assert_eq!(commits[0].time.timestamp(), 1_700_000_000);
        assert_eq!(commits[0].subject, "First subject");
        assert_eq!(commits[0].decoration.branches, vec!["main"]);
        assert!(commits[1].decoration.is_empty());
    }

    #[test]
    fn parse_log_subject_with_punctuation() {
        let text = "cccc\x1fCarol\x1f1700000000\x1fFix: a, b and c\x1ftag: refs/tags/v1\x1e";
        let commits = parse_log(text).unwrap();
        assert_eq!(commits[0].subject, "Fix: a, b and c");
        assert_eq!(commits[0].decoration.tags, vec!["v1"]);
    }

    #[test]
    fn parse_log_rejects_short_records() {
        assert!(matches!(
            parse_log("abc\x1fonly\x1e"),
            Err(RepoError::Malformed(_))
        ));
        assert!(matches!(
            parse_log("abc\x1fa\x1fnot-a-number\x1fs\x1f\x1e"),
            Err(RepoError::Malformed(_))
        ));
    }

    #[test]
    fn parse_log_empty() {
        assert!(parse_log("").unwrap().is_empty());
        assert!(parse_log("\n").unwrap().is_empty());
    }

    #[test]
    fn parse_name_status_kinds() {
        let output = b"M\0src/lib.rs\0A\0new.txt\0D\0gone.txt\0";
        let entries = parse_name_status(output);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].path.as_str(), "gone.txt");
        assert_eq!(entries[0].kind, ChangeKind::Deleted);
        assert_eq!(entries[1].kind, ChangeKind::Added);
        assert_eq!(entries[2].kind, ChangeKind::Modified);
    }

    #[test]
    fn parse_name_status_rename() {
        let output = b"R087\0old_name.rs\0new_name.rs\0";
        let entries = parse_name_status(output);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, ChangeKind::Renamed);
        assert_eq!(entries[0].path.as_str(), "new_name.rs");
        assert_eq!(
            entries[0].old_path.as_ref().map(|p| p.as_str()),
            Some("old_name.rs")
        );
    }

    #[test]
    fn parse_name_status_keeps_non_utf8_paths() {
        let output = b"M\0a.txt\0A\0b\xff.txt\0";
        let entries = parse_name_status(output);
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["a.txt", "b\u{FFFD}.txt"]);
        assert_eq!(entries[1].kind, ChangeKind::Added);
    }

    #[test]
    fn parse_name_status_empty() {
        assert!(parse_name_status(b"").is_empty());
    }

    #[test]
    fn diff_line_kinds() {
        assert_eq!(DiffLine::new("+added").kind(), DiffLineKind::Added);
        assert_eq!(DiffLine::new("-removed").kind(), DiffLineKind::Removed);
        assert_eq!(DiffLine::new("@@ -1 +1 @@").kind(), DiffLineKind::Hunk);
        assert_eq!(DiffLine::new(" context").kind(), DiffLineKind::Context);
        assert_eq!(DiffLine::new("").kind(), DiffLineKind::Context);
        assert_eq!(DiffLine::new("diff --git a/x b/x").kind(), DiffLineKind::Context);
    }

    #[test]
    fn memory_history_counts_queries() {
        let mut history = MemoryHistory::new(Vec::new());
        history.set_diff("a.rs", ["+x", "-y"]);
        let range = CommitRange::to_working_tree("abc");

        let lines = history
            .diff(&range, &RelPath::new("a.rs"), None, DiffOptions::default())
            .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(history.diff_queries(), 1);
        assert!(history.diff_stat(&range).unwrap().is_empty());
        assert_eq!(history.stat_queries(), 1);

        history.set_failing(true);
        assert!(history.diff_stat(&range).is_err());
    }
}
