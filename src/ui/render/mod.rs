//! UI rendering with ratatui.
//!
//! Layout: a one-line top bar, the current screen's list, a one-line
//! bottom bar.

mod bars;
mod commits;
mod diff;
mod helpers;
mod stats;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::core::HistoryProvider;

use super::app::{App, Screen};

pub use commits::commit_line;
pub use diff::diff_line;
pub use stats::stat_line;

/// Main render function.
pub fn render<H: HistoryProvider>(frame: &mut Frame, app: &App<H>) {
    let _timer = crate::metrics::Timer::start("render_frame");

    // Fill background
    let bg_block = Block::default().style(Style::default().bg(app.theme.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Top bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(frame.area());

    bars::render_top_bar(frame, app, chunks[0]);
    render_main(frame, app, chunks[1]);
    bars::render_bottom_bar(frame, app, chunks[2]);
}

fn render_main<H: HistoryProvider>(frame: &mut Frame, app: &App<H>, area: Rect) {
    match app.screen() {
        Screen::Commits => commits::render_commits(frame, app, area),
        Screen::Stats => stats::render_stats(frame, app, area),
        Screen::Diff => diff::render_diff(frame, app, area),
    }
}
