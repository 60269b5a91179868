//! Core primitives for diff-explore (no TUI dependencies).

mod decoration;
mod format;
mod history;
mod list;
mod range;
mod repo;
mod watcher;

pub use decoration::*;
pub use format::*;
pub use history::*;
pub use list::*;
pub use range::*;
pub use repo::*;
pub use watcher::*;
