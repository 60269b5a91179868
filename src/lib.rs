//! diff-explore - a terminal browser for git history.
//!
//! Pages through commits, drills into the files changed by a commit or a
//! marked commit range, and shows per-file diffs that refresh when the file
//! changes on disk.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use diff_explore::prelude::*;
//!
//! let repo = RepoRoot::discover(std::path::Path::new("."))?;
//! let history = GitHistory::new(repo);
//! let commits = history.list_commits()?;
//! let range = select_range(&commits, 0, None);
//! ```

#![deny(missing_docs)]

pub mod config;
pub mod core;
pub mod metrics;
pub mod prelude;
pub mod theme;
pub mod ui;
