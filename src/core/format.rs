//! Text formatting for list rows.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Maximum display width of an author name.
pub const AUTHOR_WIDTH: usize = 20;

/// Compact age of `then` relative to `now`, using the largest non-zero unit:
/// `3Y`, `2M`, `5D`, `4h`, `12m`, `9s`.
///
/// Years and months are calendar differences. Future timestamps read `0s`.
pub fn format_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if then >= now {
        return "0s".to_string();
    }

    let months = calendar_months(then, now);
    if months >= 12 {
        return format!("{}Y", months / 12);
    }
    if months > 0 {
        return format!("{}M", months);
    }

    let secs = (now - then).num_seconds();
    match secs {
        s if s >= 86_400 => format!("{}D", s / 86_400),
        s if s >= 3_600 => format!("{}h", s / 3_600),
        s if s >= 60 => format!("{}m", s / 60),
        s => format!("{}s", s),
    }
}

/// Whole calendar months between `then` and `now` (`then <= now`).
fn calendar_months(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let mut months = (i64::from(now.year()) - i64::from(then.year())) * 12
        + i64::from(now.month()) - i64::from(then.month());

    let then_rest = (then.day(), then.num_seconds_from_midnight());
    let now_rest = (now.day(), now.num_seconds_from_midnight());
    if now_rest < then_rest {
        months -= 1;
    }
    months.max(0)
}

/// Shorten an author name to at most [`AUTHOR_WIDTH`] characters.
///
/// Long names keep the first and last name with middle names reduced to
/// initials (`Mary Ann Jane Smith` → `Mary A J Smith`); two-part names
/// reduce the first name (`J Smith`); anything still too long is cut.
pub fn short_author_name(name: &str) -> String {
    if name.chars().count() <= AUTHOR_WIDTH {
        return name.to_string();
    }

    let parts: Vec<&str> = name.split_whitespace().collect();
    let shortened = match parts.as_slice() {
        [first, middle @ .., last] if !middle.is_empty() => {
            let mut out = String::from(*first);
            for m in middle {
                if let Some(c) = m.chars().next() {
                    out.push(' ');
                    out.push(c);
                }
            }
            out.push(' ');
            out.push_str(last);
            out
        }
        [first, last] => match first.chars().next() {
            Some(c) => format!("{} {}", c, last),
            None => (*last).to_string(),
        },
        _ => name.to_string(),
    };

    truncate(&shortened, AUTHOR_WIDTH)
}

/// Cut `text` to at most `width` characters.
pub fn truncate(text: &str, width: usize) -> String {
    match text.char_indices().nth(width) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Expand tabs to four spaces and replace other control characters, so a
/// line occupies exactly the cells it appears to.
pub fn sanitize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\t' => out.push_str("    "),
            c if c.is_control() => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    out
}
