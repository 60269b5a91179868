//! Commit range selection.

use std::fmt;

use super::Commit;

/// Label shown for the working-tree end of a range.
pub const WORKING_TREE_LABEL: &str = "<index>";

/// An ordered pair of revisions bounding a stat or diff query.
///
/// `start` is always the chronologically earlier revision. `end == None`
/// means "through the working tree".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitRange {
    /// Earlier revision.
    pub start: String,
    /// Later revision, or `None` for the working tree.
    pub end: Option<String>,
}

impl CommitRange {
    /// Range from `start` through the working tree.
    pub fn to_working_tree(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    /// Range between two revisions.
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }

    /// Whether the range ends at the working tree.
    pub fn is_working_tree(&self) -> bool {
        self.end.is_none()
    }

    /// Short `start..end` label, revisions truncated to 8 characters.
    pub fn short_label(&self) -> String {
        let start = short_rev(&self.start);
        let end = self.end.as_deref().map_or(WORKING_TREE_LABEL, short_rev);
        format!("{}..{}", start, end)
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end {
            Some(end) => write!(f, "{}..{}", self.start, end),
            None => write!(f, "{}..{}", self.start, WORKING_TREE_LABEL),
        }
    }
}

/// First 8 characters of a revision id.
pub fn short_rev(rev: &str) -> &str {
    match rev.char_indices().nth(8) {
        Some((idx, _)) => &rev[..idx],
        None => rev,
    }
}

/// Derive the range for a commit list's cursor and optional mark.
///
/// `commits` is most recent first, so a higher index is an older commit. With
/// a mark, the older of the two rows becomes `start` whichever one was marked.
/// Returns `None` if an index is out of bounds.
pub fn select_range(
    commits: &[Commit],
    cursor: usize,
    marked: Option<usize>,
) -> Option<CommitRange> {
    let at_cursor = commits.get(cursor)?;
    let Some(marked) = marked else {
        return Some(CommitRange::to_working_tree(at_cursor.id.clone()));
    };
    let at_mark = commits.get(marked)?;

    let (older, newer) = if marked > cursor {
        (at_mark, at_cursor)
    } else {
        (at_cursor, at_mark)
    };
    Some(CommitRange::between(older.id.clone(), newer.id.clone()))
}
