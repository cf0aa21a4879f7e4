//! Filesystem, platform and terminal helpers
//!
//! # Modules
//!
//! - [`fs`] - Directory creation, atomic writes and sibling temp paths
//! - [`platform`] - Home directory and platform identification
//! - [`progress`] - Download progress bar
//!
//! # Example
//!
//! ```rust,no_run
//! use cc_switch::utils::{atomic_write, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("/tmp/completions"))?;
//! atomic_write(Path::new("/tmp/completions/_cc-switch"), b"#compdef cc-switch")?;
//! # Ok(())
//! # }
//! ```

pub mod fs;
pub mod platform;
pub mod progress;

pub use fs::{atomic_write, ensure_dir, remove_file_if_exists, sibling_path};
pub use platform::{get_home_dir, is_windows};
pub use progress::ProgressBar;
