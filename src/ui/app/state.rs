use crate::core::{Commit, CommitRange, DiffLine, RelPath, StatEntry, WindowedList};

/// One of the three browsable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Commit history.
    Commits,
    /// Files changed in the selected range.
    Stats,
    /// Diff of one file.
    Diff,
}

/// Result of popping the view stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Returned to the given screen.
    Back(Screen),
    /// The root was popped; the application should exit.
    Exit,
}

/// Stack of open screens. Never empty; the root is always [`Screen::Commits`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewStack {
    screens: Vec<Screen>,
}

impl Default for ViewStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStack {
    /// Stack holding only the commit list.
    pub fn new() -> Self {
        Self {
            screens: vec![Screen::Commits],
        }
    }

    /// Screen on top of the stack.
    pub fn current(&self) -> Screen {
        self.screens.last().copied().unwrap_or(Screen::Commits)
    }

    /// Number of open screens.
    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    /// Open `screen` on top.
    pub fn push(&mut self, screen: Screen) {
        self.screens.push(screen);
    }

    /// Close the top screen. Popping the root leaves it in place and
    /// returns [`Transition::Exit`].
    pub fn pop(&mut self) -> Transition {
        if self.screens.len() <= 1 {
            return Transition::Exit;
        }
        self.screens.pop();
        Transition::Back(self.current())
    }
}

/// Commit list screen.
#[derive(Debug, Clone)]
pub struct CommitsView {
    /// Commits, most recent first.
    pub commits: Vec<Commit>,
    /// Cursor-enabled list over `commits`.
    pub list: WindowedList,
}

impl CommitsView {
    /// Wrap a commit listing.
    pub fn new(commits: Vec<Commit>) -> Self {
        let list = WindowedList::with_cursor(commits.len());
        Self { commits, list }
    }
}

/// Changed-file screen for one commit range.
#[derive(Debug, Clone)]
pub struct StatsView {
    /// Range the entries were queried for.
    pub range: CommitRange,
    /// Changed files.
    pub entries: Vec<StatEntry>,
    /// Cursor-enabled list over `entries`.
    pub list: WindowedList,
}

impl StatsView {
    /// Entry under the cursor.
    pub fn selected(&self) -> Option<&StatEntry> {
        self.list.cursor().and_then(|i| self.entries.get(i))
    }
}

/// Diff screen for one file in a range.
#[derive(Debug, Clone)]
pub struct DiffView {
    /// Range the diff was queried for.
    pub range: CommitRange,
    /// File being shown.
    pub path: RelPath,
    /// Previous name, for renames.
    pub old_path: Option<RelPath>,
    /// Diff output.
    pub lines: Vec<DiffLine>,
    /// Scroll-only list over `lines`.
    pub list: WindowedList,
}

impl DiffView {
    /// Whether a change to `path` affects this diff.
    pub fn is_showing(&self, path: &RelPath) -> bool {
        &self.path == path
    }
}

/// Messages and redraw state.
#[derive(Debug, Default)]
pub struct UiState {
    /// Error message.
    pub error: Option<String>,
    /// Status message.
    pub status: Option<String>,
    /// Whether the file watcher is running.
    pub watching: bool,
    /// Dirty flag for redraw.
    pub dirty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_push_pop() {
        let mut stack = ViewStack::new();
        assert_eq!(stack.current(), Screen::Commits);
        stack.push(Screen::Stats);
        stack.push(Screen::Diff);
        assert_eq!(stack.depth(), 3);
        assert_eq!(stack.pop(), Transition::Back(Screen::Stats));
        assert_eq!(stack.pop(), Transition::Back(Screen::Commits));
        assert_eq!(stack.pop(), Transition::Exit);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), Screen::Commits);
    }

    #[test]
    fn diff_view_path_match() {
        let view = DiffView {
            range: CommitRange::to_working_tree("abc"),
            path: RelPath::new("src/a.rs"),
            old_path: Some(RelPath::new("src/old.rs")),
            lines: Vec::new(),
            list: WindowedList::scrolling(0),
        };
        assert!(view.is_showing(&RelPath::new("src/a.rs")));
        assert!(!view.is_showing(&RelPath::new("src/b.rs")));
        assert!(!view.is_showing(&RelPath::new("src/old.rs")));
    }
}
