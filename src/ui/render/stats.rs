//! Changed-file list rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::{HistoryProvider, StatEntry};
use crate::theme::Theme;
use crate::ui::app::App;

use super::helpers::{change_kind_color, fill_line};

/// Render the visible window of the changed-file list.
pub fn render_stats<H: HistoryProvider>(frame: &mut Frame, app: &App<H>, area: Rect) {
    let Some(view) = &app.stats else {
        return;
    };

    if view.entries.is_empty() {
        let msg = if app.ui.error.is_some() {
            " Query failed"
        } else {
            " No changes"
        };
        let para = Paragraph::new(msg).style(
            Style::default()
                .fg(app.theme.text_muted)
                .bg(app.theme.bg_dark),
        );
        frame.render_widget(para, area);
        return;
    }

    let width = area.width as usize;
    let lines: Vec<Line> = view
        .list
        .visible()
        .take(area.height as usize)
        .filter_map(|idx| {
            let entry = view.entries.get(idx)?;
            let selected = view.list.cursor() == Some(idx);
            Some(stat_line(entry, selected, width, &app.theme))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Build one changed-file row.
pub fn stat_line(entry: &StatEntry, selected: bool, width: usize, theme: &Theme) -> Line<'static> {
    let bg = if selected {
        theme.bg_selected
    } else {
        theme.bg_dark
    };
    let base = Style::default().bg(bg);

    // Selection indicator (left edge)
    let indicator = if selected { "▌" } else { " " };
    let mut spans = vec![
        Span::styled(indicator, base.fg(theme.accent)),
        Span::styled(
            entry.kind.letter().to_string(),
            base.fg(change_kind_color(entry.kind, theme))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", base),
        Span::styled(
            entry.path.to_string(),
            base.fg(if selected {
                theme.text_bright
            } else {
                theme.text_normal
            }),
        ),
    ];
    if let Some(old) = &entry.old_path {
        spans.push(Span::styled(format!(" ← {}", old), base.fg(theme.text_muted)));
    }

    fill_line(spans, width, bg)
}
