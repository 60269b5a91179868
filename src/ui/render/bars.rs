//! Top and bottom bar rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::HistoryProvider;
use crate::ui::app::{App, Screen};

/// Render the top bar: range (and file), position, watcher indicator.
pub fn render_top_bar<H: HistoryProvider>(frame: &mut Frame, app: &App<H>, area: Rect) {
    let bg = Style::default().bg(app.theme.bg_elevated);

    let mut spans = vec![
        Span::styled(" ", bg),
        Span::styled(
            app.title(),
            bg.fg(app.theme.text_bright).add_modifier(Modifier::BOLD),
        ),
    ];

    if app.screen() == Screen::Diff && app.diff_options.ignore_whitespace {
        spans.push(Span::styled("  [-w]", bg.fg(app.theme.accent_dim)));
    }

    // Right side: position and watcher indicator
    let position = format!("{} ", app.position());
    let (indicator, indicator_color) = if app.ui.watching {
        ("#", app.theme.success)
    } else {
        ("-", app.theme.text_muted)
    };
    let right_len = position.chars().count() + indicator.len() + 1;

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(right_len);
    spans.push(Span::styled(" ".repeat(padding_len), bg));
    spans.push(Span::styled(position, bg.fg(app.theme.accent)));
    spans.push(Span::styled(indicator, bg.fg(indicator_color)));
    spans.push(Span::styled(" ", bg));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg), area);
}

/// Render the bottom bar: error, status, or key hints.
pub fn render_bottom_bar<H: HistoryProvider>(frame: &mut Frame, app: &App<H>, area: Rect) {
    let bg = Style::default().bg(app.theme.bg_elevated);

    // Error message
    if let Some(ref err) = app.ui.error {
        let line = Line::from(vec![
            Span::styled(" ✗ ", bg.fg(app.theme.error)),
            Span::styled(err.as_str(), bg.fg(app.theme.error)),
        ]);
        frame.render_widget(Paragraph::new(line).style(bg), area);
        return;
    }

    // Status message
    if let Some(ref msg) = app.ui.status {
        let line = Line::from(vec![
            Span::styled(" ✓ ", bg.fg(app.theme.success)),
            Span::styled(msg.as_str(), bg.fg(app.theme.success)),
        ]);
        frame.render_widget(Paragraph::new(line).style(bg), area);
        return;
    }

    let hints: &[(&str, &str)] = match app.screen() {
        Screen::Commits => &[
            ("j/k", "move"),
            ("^F/^U", "page"),
            ("␣", "mark"),
            ("↵", "files"),
            ("q", "quit"),
        ],
        Screen::Stats => &[
            ("j/k", "move"),
            ("^F/^U", "page"),
            ("↵", "diff"),
            ("esc", "back"),
        ],
        Screen::Diff => &[
            ("j/k", "scroll"),
            ("^F/^U", "page"),
            ("w", "whitespace"),
            ("esc", "back"),
        ],
    };

    let mut spans = vec![Span::styled(" ", bg)];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", bg));
        }
        spans.push(Span::styled(*key, bg.fg(app.theme.accent)));
        spans.push(Span::styled(format!(" {}", desc), bg.fg(app.theme.text_dim)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg), area);
}
