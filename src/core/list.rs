//! Windowed list model shared by every screen.
//!
//! A `WindowedList` tracks which slice of an ordered collection is visible
//! (`first..=last`), an optional cursor and an optional mark. It never looks
//! at the items themselves, only at their count.

use std::ops::RangeInclusive;

/// Scrollable window with an optional cursor over `count` items.
///
/// Invariants, restored by every mutating method:
/// - `first <= last < count` when `count > 0`, `first == last == 0` otherwise;
/// - with the cursor enabled and `count > 0`, `first <= cursor <= last`;
/// - `marked` is `None` or `< count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowedList {
    count: usize,
    first: usize,
    last: usize,
    rows: usize,
    cursor_enabled: bool,
    cursor: usize,
    marked: Option<usize>,
}

impl WindowedList {
    /// Create a model over `count` items.
    ///
    /// The display height is applied by the next [`set_height`](Self::set_height).
    pub fn new(count: usize, cursor_enabled: bool) -> Self {
        Self {
            count,
            first: 0,
            last: 0,
            rows: 0,
            cursor_enabled,
            cursor: 0,
            marked: None,
        }
    }

    /// Cursor-enabled model, used by selectable lists.
    pub fn with_cursor(count: usize) -> Self {
        Self::new(count, true)
    }

    /// Cursor-disabled model, used for scrolling text.
    pub fn scrolling(count: usize) -> Self {
        Self::new(count, false)
    }

    /// Number of items in the backing sequence.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// First visible index.
    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    /// Last visible index (inclusive).
    #[inline]
    pub fn last(&self) -> usize {
        self.last
    }

    /// Display rows last requested through `set_height`.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether this model has a selectable cursor.
    #[inline]
    pub fn cursor_enabled(&self) -> bool {
        self.cursor_enabled
    }

    /// Selected index, if the cursor is enabled and the list is not empty.
    pub fn cursor(&self) -> Option<usize> {
        (self.cursor_enabled && self.count > 0).then_some(self.cursor)
    }

    /// Marked index, if any.
    pub fn marked(&self) -> Option<usize> {
        self.marked
    }

    /// Indices to render, in order. Empty when the list is empty.
    pub fn visible(&self) -> RangeInclusive<usize> {
        if self.count == 0 {
            #[allow(clippy::reversed_empty_ranges)]
            return 1..=0;
        }
        self.first..=self.last
    }

    /// Window length for the current count and rows.
    fn window_len(&self) -> usize {
        self.rows.max(1).min(self.count)
    }

    /// Apply a new display height.
    ///
    /// The window start is kept where bounds allow. If the cursor would fall
    /// outside the resized window, the window moves down just far enough for
    /// the cursor to be the last visible row.
    pub fn set_height(&mut self, rows: usize) {
        self.rows = rows;
        self.reclamp();
    }

    /// Replace the item count in place, keeping the window where possible.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        if count == 0 {
            self.cursor = 0;
        } else {
            self.cursor = self.cursor.min(count - 1);
        }
        if self.marked.is_some_and(|m| m >= count) {
            self.marked = None;
        }
        self.reclamp();
    }

    /// Move the cursor down one row, or scroll down one row without a cursor.
    pub fn next_item(&mut self) {
        if self.count == 0 {
            return;
        }
        if self.cursor_enabled {
            if self.cursor + 1 < self.count {
                self.cursor += 1;
                if self.cursor > self.last {
                    self.first += 1;
                    self.last += 1;
                }
            }
        } else if self.last + 1 < self.count {
            self.first += 1;
            self.last += 1;
        }
    }

    /// Move the cursor up one row, or scroll up one row without a cursor.
    pub fn prev_item(&mut self) {
        if self.count == 0 {
            return;
        }
        if self.cursor_enabled {
            if self.cursor > 0 {
                self.cursor -= 1;
                if self.cursor < self.first {
                    self.first -= 1;
                    self.last -= 1;
                }
            }
        } else if self.first > 0 {
            self.first -= 1;
            self.last -= 1;
        }
    }

    /// Shift the window down by one full page.
    pub fn next_page(&mut self) {
        if self.count == 0 {
            return;
        }
        let len = self.window_len();
        self.first += len;
        self.last = self.first + len - 1;
        if self.last >= self.count {
            self.last = self.count - 1;
            self.first = self.last + 1 - len;
        }
        if self.cursor_enabled {
            self.cursor = (self.cursor + len).clamp(self.first, self.last);
        }
    }

    /// Shift the window up by one full page.
    pub fn prev_page(&mut self) {
        if self.count == 0 {
            return;
        }
        let len = self.window_len();
        self.first = self.first.saturating_sub(len);
        self.last = self.first + len - 1;
        if self.cursor_enabled {
            self.cursor = self.cursor.saturating_sub(len).clamp(self.first, self.last);
        }
    }

    /// Mark the cursor row, or clear the mark if the cursor is on it.
    ///
    /// Returns the new mark.
    pub fn toggle_mark(&mut self) -> Option<usize> {
        let Some(cursor) = self.cursor() else {
            return self.marked;
        };
        self.marked = if self.marked == Some(cursor) {
            None
        } else {
            Some(cursor)
        };
        self.marked
    }

    /// Restore the window invariants after `rows` or `count` changed.
    fn reclamp(&mut self) {
        if self.count == 0 {
            self.first = 0;
            self.last = 0;
            return;
        }

        let len = self.window_len();
        self.last = self.first + len - 1;
        if self.last >= self.count {
            self.last = self.count - 1;
            self.first = self.last + 1 - len;
        }

        if self.cursor_enabled {
            if self.cursor > self.last {
                self.last = self.cursor;
                self.first = self.last + 1 - len;
            } else if self.cursor < self.first {
                self.first = self.cursor;
                self.last = self.first + len - 1;
            }
        }
    }
}
