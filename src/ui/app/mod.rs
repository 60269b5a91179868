//! Application state and lifecycle.

use anyhow::Context;

use crate::core::{
    select_range, CommitRange, DiffOptions, HistoryProvider, RepoError, WindowedList,
};
use crate::theme::Theme;

mod navigation;
mod state;
mod watcher;

pub use state::{CommitsView, DiffView, Screen, StatsView, Transition, UiState, ViewStack};

/// Rows taken by the top and bottom bars.
pub const CHROME_ROWS: u16 = 2;

/// Application state.
///
/// Owns the history source and one record per open screen. All mutation
/// happens on the thread draining the event queue.
pub struct App<H: HistoryProvider> {
    history: H,
    /// Open screens.
    pub stack: ViewStack,
    /// Commit list (always open).
    pub commits: CommitsView,
    /// Changed-file list, while the Stats screen is open.
    pub stats: Option<StatsView>,
    /// Diff, while the Diff screen is open.
    pub diff: Option<DiffView>,
    /// Options for diff queries.
    pub diff_options: DiffOptions,
    /// Rows available to the list area.
    pub list_height: usize,
    /// Terminal width.
    pub width: u16,
    /// Current color theme.
    pub theme: Theme,
    /// UI state (messages, dirty flag).
    pub ui: UiState,
    /// Should the app quit?
    pub should_quit: bool,
}

impl<H: HistoryProvider> App<H> {
    /// Create the app with the commit list loaded.
    pub fn new(history: H, diff_options: DiffOptions, theme: Theme) -> anyhow::Result<Self> {
        let commits = history
            .list_commits()
            .context("failed to list commits")?;
        log::debug!("loaded {} commits", commits.len());

        Ok(Self {
            history,
            stack: ViewStack::new(),
            commits: CommitsView::new(commits),
            stats: None,
            diff: None,
            diff_options,
            list_height: 0,
            width: 0,
            theme,
            ui: UiState {
                dirty: true,
                ..UiState::default()
            },
            should_quit: false,
        })
    }

    /// History source.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable history source.
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Screen currently shown.
    pub fn screen(&self) -> Screen {
        self.stack.current()
    }

    /// List model of the current screen.
    pub fn current_list(&self) -> &WindowedList {
        match self.stack.current() {
            Screen::Commits => &self.commits.list,
            Screen::Stats => match &self.stats {
                Some(stats) => &stats.list,
                None => &self.commits.list,
            },
            Screen::Diff => match &self.diff {
                Some(diff) => &diff.list,
                None => &self.commits.list,
            },
        }
    }

    /// Mutable list model of the current screen.
    pub fn current_list_mut(&mut self) -> &mut WindowedList {
        match self.stack.current() {
            Screen::Commits => &mut self.commits.list,
            Screen::Stats => match &mut self.stats {
                Some(stats) => &mut stats.list,
                None => &mut self.commits.list,
            },
            Screen::Diff => match &mut self.diff {
                Some(diff) => &mut diff.list,
                None => &mut self.commits.list,
            },
        }
    }

    /// Range of the open Stats or Diff screen, or the one the commit cursor
    /// and mark would select.
    pub fn current_range(&self) -> Option<CommitRange> {
        match self.stack.current() {
            Screen::Diff => self.diff.as_ref().map(|d| d.range.clone()),
            Screen::Stats => self.stats.as_ref().map(|s| s.range.clone()),
            Screen::Commits => {
                let cursor = self.commits.list.cursor()?;
                select_range(&self.commits.commits, cursor, self.commits.list.marked())
            }
        }
    }

    /// Text for the top bar: the range, plus the file on the Diff screen.
    pub fn title(&self) -> String {
        if self.stack.current() == Screen::Diff {
            if let Some(diff) = &self.diff {
                return format!("{}: {}", diff.range.short_label(), diff.path);
            }
        }
        self.current_range()
            .map(|r| r.short_label())
            .unwrap_or_else(|| "no commits".to_string())
    }

    /// 1-based position and total of the current list, as `n/N`.
    pub fn position(&self) -> String {
        let list = self.current_list();
        if list.count() == 0 {
            return "0/0".to_string();
        }
        let at = list.cursor().unwrap_or_else(|| list.first());
        format!("{}/{}", at + 1, list.count())
    }

    /// Mark the UI for redraw.
    pub fn mark_dirty(&mut self) {
        self.ui.dirty = true;
    }

    /// Take the dirty flag, clearing it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.ui.dirty)
    }

    /// Request application exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Record a failed query.
    fn query_failed(&mut self, what: &str, err: RepoError) {
        log::warn!("{} failed: {}", what, err);
        self.ui.error = Some(format!("{}: {}", what, err));
        self.ui.status = None;
    }

    fn clear_messages(&mut self) {
        self.ui.error = None;
        self.ui.status = None;
    }
}
