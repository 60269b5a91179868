//! Diff view rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::{sanitize_line, DiffLine, DiffLineKind, HistoryProvider};
use crate::theme::Theme;
use crate::ui::app::App;

use super::helpers::diff_line_color;

/// Render the visible window of the open diff.
pub fn render_diff<H: HistoryProvider>(frame: &mut Frame, app: &App<H>, area: Rect) {
    let _timer = crate::metrics::Timer::start("render_diff");
    let Some(view) = &app.diff else {
        return;
    };

    if view.lines.is_empty() {
        let msg = if app.ui.error.is_some() {
            " Query failed"
        } else {
            " No differences"
        };
        let para = Paragraph::new(msg).style(
            Style::default()
                .fg(app.theme.text_muted)
                .bg(app.theme.bg_dark),
        );
        frame.render_widget(para, area);
        return;
    }

    let lines: Vec<Line> = view
        .list
        .visible()
        .take(area.height as usize)
        .filter_map(|idx| view.lines.get(idx))
        .map(|line| diff_line(line, &app.theme))
        .collect();

    let para = Paragraph::new(lines).style(Style::default().bg(app.theme.bg_dark));
    frame.render_widget(para, area);
}

/// Build one diff row.
pub fn diff_line(line: &DiffLine, theme: &Theme) -> Line<'static> {
    let kind = line.kind();
    let mut style = Style::default()
        .fg(diff_line_color(kind, theme))
        .bg(theme.bg_dark);
    if kind == DiffLineKind::Hunk {
        style = style.add_modifier(Modifier::BOLD);
    }
    Line::from(Span::styled(sanitize_line(line.text()), style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_rows_are_colored_and_sanitized() {
        let theme = Theme::default();
        let added = diff_line(&DiffLine::new("+\tx"), &theme);
        assert_eq!(added.spans[0].content, "+    x");
        assert_eq!(added.spans[0].style.fg, Some(theme.diff_add));

        let hunk = diff_line(&DiffLine::new("@@ -1 +1 @@"), &theme);
        assert_eq!(hunk.spans[0].style.fg, Some(theme.diff_hunk));
        assert!(hunk.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }
}
