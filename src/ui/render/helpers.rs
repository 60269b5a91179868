//! Shared rendering helpers and constants.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::{ChangeKind, DiffLineKind};
use crate::theme::Theme;

/// Width of the age column (`12M`, `59s`, ...).
pub const AGE_WIDTH: usize = 4;

/// Color for a change kind letter.
pub fn change_kind_color(kind: ChangeKind, theme: &Theme) -> Color {
    match kind {
        ChangeKind::Added => theme.success,
        ChangeKind::Modified => theme.warning,
        ChangeKind::Deleted => theme.error,
        ChangeKind::Renamed => theme.accent_dim,
    }
}

/// Foreground for a diff line.
pub fn diff_line_color(kind: DiffLineKind, theme: &Theme) -> Color {
    match kind {
        DiffLineKind::Added => theme.diff_add,
        DiffLineKind::Removed => theme.diff_delete,
        DiffLineKind::Hunk => theme.diff_hunk,
        DiffLineKind::Context => theme.text_normal,
    }
}

/// Truncate with a trailing ellipsis when `s` exceeds `max_len` characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len == 0 {
        String::new()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

/// Left-align `s` in a field of `width` characters, truncating if needed.
pub fn pad_right(s: &str, width: usize) -> String {
    let s = truncate_str(s, width);
    let len = s.chars().count();
    format!("{}{}", s, " ".repeat(width - len))
}

/// Right-align `s` in a field of `width` characters.
pub fn pad_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), s)
}

/// Clip `spans` to `width` columns and pad the rest with `bg`, so a row's
/// background covers the full line.
pub fn fill_line(spans: Vec<Span<'static>>, width: usize, bg: Color) -> Line<'static> {
    let mut out = Vec::with_capacity(spans.len() + 1);
    let mut used = 0;

    for span in spans {
        if used >= width {
            break;
        }
        let len = span.content.chars().count();
        if used + len <= width {
            used += len;
            out.push(span);
        } else {
            let take = width - used;
            let text: String = span.content.chars().take(take).collect();
            used += take;
            out.push(Span::styled(text, span.style));
        }
    }

    if used < width {
        out.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }
    Line::from(out)
}
