//! Atomic file write operations using temp-and-rename strategy.
//!
//! Readers of a file written here see either the old content or the new
//! content, never a partial write.

use crate::utils::fs::dirs::ensure_dir;
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns `path` with `suffix` appended to its final component.
///
/// Unlike [`Path::with_extension`] this keeps any existing extension, so
/// `cc-switch.fish` becomes `cc-switch.fish.tmp` and the executable
/// `cc-switch` becomes `cc-switch.new`.
///
/// ```rust,no_run
/// use cc_switch::utils::fs::sibling_path;
/// use std::path::Path;
///
/// let staged = sibling_path(Path::new("/usr/local/bin/cc-switch"), ".new");
/// assert_eq!(staged, Path::new("/usr/local/bin/cc-switch.new"));
/// ```
#[must_use]
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Creates the parent directory when missing
/// 2. Writes content to a `.tmp` sibling and syncs it to disk
/// 3. Renames the sibling over the target path
///
/// The temp file is removed if any step fails.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or any step of the
/// write fails. The underlying [`std::io::Error`] stays in the error chain so
/// callers can inspect its kind.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let temp_path = sibling_path(path, ".tmp");

    let result = (|| -> Result<()> {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display()))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}
