use super::{App, Screen};
use crate::core::{HistoryProvider, WatchEvent};

impl<H: HistoryProvider> App<H> {
    /// React to a file watcher event.
    ///
    /// Only a change to the file shown on the Diff screen triggers a query.
    pub fn handle_watch_event(&mut self, event: WatchEvent) {
        match event {
            WatchEvent::Ready => {
                self.ui.watching = true;
                self.mark_dirty();
            }
            WatchEvent::Changed(path) => {
                if self.stack.current() != Screen::Diff {
                    return;
                }
                let showing = self.diff.as_ref().is_some_and(|d| d.is_showing(&path));
                if showing {
                    log::debug!("{} changed, refreshing diff", path);
                    self.refresh_diff();
                }
            }
        }
    }

    /// Record that the watcher could not be started.
    pub fn watcher_failed(&mut self, message: &str) {
        log::warn!("file watching disabled: {}", message);
        self.ui.watching = false;
        self.ui.status = Some(format!("file watching disabled: {}", message));
        self.mark_dirty();
    }

    /// Re-query the open diff, keeping its list model and window position.
    pub(crate) fn refresh_diff(&mut self) {
        let Some(diff) = &self.diff else {
            return;
        };
        let result = self.history.diff(
            &diff.range,
            &diff.path,
            diff.old_path.as_ref(),
            self.diff_options,
        );

        let lines = match result {
            Ok(lines) => {
                self.ui.error = None;
                lines
            }
            Err(e) => {
                self.query_failed("diff", e);
                Vec::new()
            }
        };

        if let Some(diff) = &mut self.diff {
            diff.list.set_count(lines.len());
            diff.lines = lines;
        }
        self.mark_dirty();
    }

    /// Toggle whitespace-insensitive diffs and refresh the open diff.
    pub fn toggle_whitespace(&mut self) {
        if self.stack.current() != Screen::Diff {
            return;
        }
        self.diff_options.ignore_whitespace = !self.diff_options.ignore_whitespace;
        self.refresh_diff();
        if self.ui.error.is_none() {
            self.ui.status = Some(if self.diff_options.ignore_whitespace {
                "ignoring whitespace".to_string()
            } else {
                "showing whitespace".to_string()
            });
        }
    }
}
