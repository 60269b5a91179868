//! Commit list rendering.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::{format_age, short_author_name, short_rev, Commit, HistoryProvider, AUTHOR_WIDTH};
use crate::theme::Theme;
use crate::ui::app::App;

use super::helpers::{fill_line, pad_left, pad_right, AGE_WIDTH};

/// Render the visible window of the commit list.
pub fn render_commits<H: HistoryProvider>(frame: &mut Frame, app: &App<H>, area: Rect) {
    let view = &app.commits;
    if view.commits.is_empty() {
        let para = Paragraph::new(" No commits").style(
            Style::default()
                .fg(app.theme.text_muted)
                .bg(app.theme.bg_dark),
        );
        frame.render_widget(para, area);
        return;
    }

    let now = Utc::now();
    let width = area.width as usize;
    let lines: Vec<Line> = view
        .list
        .visible()
        .take(area.height as usize)
        .filter_map(|idx| {
            let commit = view.commits.get(idx)?;
            let selected = view.list.cursor() == Some(idx);
            let marked = view.list.marked() == Some(idx);
            Some(commit_line(commit, selected, marked, now, width, &app.theme))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Build one commit row.
pub fn commit_line(
    commit: &Commit,
    selected: bool,
    marked: bool,
    now: DateTime<Utc>,
    width: usize,
    theme: &Theme,
) -> Line<'static> {
    let bg = if selected {
        theme.bg_selected
    } else {
        theme.bg_dark
    };
    let base = Style::default().bg(bg);

    let mut spans = vec![
        Span::styled(
            if marked { "*" } else { " " },
            base.fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(short_rev(&commit.id).to_string(), base.fg(theme.hash)),
        Span::styled(" ", base),
        Span::styled(
            pad_left(&format_age(commit.time, now), AGE_WIDTH),
            base.fg(theme.text_dim),
        ),
        Span::styled(" ", base),
        Span::styled(
            pad_right(&short_author_name(&commit.author), AUTHOR_WIDTH),
            base.fg(theme.text_muted),
        ),
        Span::styled(" ", base),
    ];

    let deco = &commit.decoration;
    for branch in &deco.branches {
        spans.push(Span::styled(format!("[{}] ", branch), base.fg(theme.branch)));
    }
    for tag in &deco.tags {
        spans.push(Span::styled(format!("<{}> ", tag), base.fg(theme.tag)));
    }
    for reference in &deco.refs {
        spans.push(Span::styled(
            format!("{{{}}} ", reference),
            base.fg(theme.reference),
        ));
    }

    let subject_style = if selected {
        base.fg(theme.text_bright)
    } else {
        base.fg(theme.text_normal)
    };
    spans.push(Span::styled(commit.subject.clone(), subject_style));

    fill_line(spans, width, bg)
}
