//! Common re-exports for convenient importing.
//!
//! # Example
//!
//! ```rust,ignore
//! use diff_explore::prelude::*;
//! ```

pub use crate::core::{
    select_range, Commit, CommitRange, DiffLine, DiffOptions, GitHistory, HistoryProvider,
    RelPath, RepoError, RepoRoot, StatEntry, WindowedList,
};
