use super::{App, DiffView, Screen, StatsView, Transition, CHROME_ROWS};
use crate::core::{select_range, HistoryProvider, WindowedList};

impl<H: HistoryProvider> App<H> {
    /// Apply a new terminal size to every open list.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.list_height = usize::from(height.saturating_sub(CHROME_ROWS));

        let rows = self.list_height;
        self.commits.list.set_height(rows);
        if let Some(stats) = &mut self.stats {
            stats.list.set_height(rows);
        }
        if let Some(diff) = &mut self.diff {
            diff.list.set_height(rows);
        }
        self.mark_dirty();
    }

    /// Drill into the item under the cursor.
    pub fn enter(&mut self) {
        match self.stack.current() {
            Screen::Commits => self.open_stats(),
            Screen::Stats => self.open_diff(),
            Screen::Diff => {}
        }
    }

    /// Close the current screen. At the root this requests exit.
    pub fn cancel(&mut self) -> Transition {
        let closing = self.stack.current();
        let transition = self.stack.pop();
        match transition {
            Transition::Exit => self.quit(),
            Transition::Back(screen) => {
                log::debug!("back to {:?}", screen);
                match closing {
                    Screen::Diff => self.diff = None,
                    Screen::Stats => self.stats = None,
                    Screen::Commits => {}
                }
                self.clear_messages();
            }
        }
        self.mark_dirty();
        transition
    }

    /// Toggle the range mark on the commit under the cursor.
    pub fn toggle_mark(&mut self) {
        if self.stack.current() != Screen::Commits {
            return;
        }
        self.commits.list.toggle_mark();
        self.mark_dirty();
    }

    /// Move the cursor (or scroll) one row down.
    pub fn next_item(&mut self) {
        self.current_list_mut().next_item();
        self.mark_dirty();
    }

    /// Move the cursor (or scroll) one row up.
    pub fn prev_item(&mut self) {
        self.current_list_mut().prev_item();
        self.mark_dirty();
    }

    /// Page down.
    pub fn next_page(&mut self) {
        self.current_list_mut().next_page();
        self.mark_dirty();
    }

    /// Page up.
    pub fn prev_page(&mut self) {
        self.current_list_mut().prev_page();
        self.mark_dirty();
    }

    fn open_stats(&mut self) {
        let Some(cursor) = self.commits.list.cursor() else {
            return;
        };
        let Some(range) = select_range(&self.commits.commits, cursor, self.commits.list.marked())
        else {
            return;
        };

        self.clear_messages();
        let entries = match self.history.diff_stat(&range) {
            Ok(entries) => entries,
            Err(e) => {
                self.query_failed("diff stat", e);
                Vec::new()
            }
        };
        log::debug!("stats for {}: {} files", range, entries.len());

        let mut list = WindowedList::with_cursor(entries.len());
        list.set_height(self.list_height);
        self.stats = Some(StatsView {
            range,
            entries,
            list,
        });
        self.stack.push(Screen::Stats);
        self.mark_dirty();
    }

    fn open_diff(&mut self) {
        let Some(stats) = &self.stats else {
            return;
        };
        let Some(entry) = stats.selected() else {
            return;
        };
        let range = stats.range.clone();
        let path = entry.path.clone();
        let old_path = entry.old_path.clone();

        self.clear_messages();
        let lines = match self
            .history
            .diff(&range, &path, old_path.as_ref(), self.diff_options)
        {
            Ok(lines) => lines,
            Err(e) => {
                self.query_failed("diff", e);
                Vec::new()
            }
        };
        log::debug!("diff {} {}: {} lines", range, path, lines.len());

        let mut list = WindowedList::scrolling(lines.len());
        list.set_height(self.list_height);
        self.diff = Some(DiffView {
            range,
            path,
            old_path,
            lines,
            list,
        });
        self.stack.push(Screen::Diff);
        self.mark_dirty();
    }
}
