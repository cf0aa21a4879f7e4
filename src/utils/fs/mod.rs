//! File system helpers.
//!
//! - [`atomic`] - write-to-temp-then-rename file writes
//! - [`dirs`] - directory creation and tolerant removal

pub mod atomic;
pub mod dirs;

pub use atomic::{atomic_write, sibling_path};
pub use dirs::{ensure_dir, remove_dir_if_exists, remove_file_if_exists};
