//! Directory creation and tolerant removal.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// # Errors
///
/// Returns an error if the path exists but is not a directory, or if creation
/// fails.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).with_context(|| {
            format!(
                "Failed to create directory: {}\n\nCheck directory permissions and path validity",
                path.display()
            )
        })?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Removes a file, treating a missing file as success.
///
/// Returns `Ok(true)` when a file was removed and `Ok(false)` when there was
/// nothing to remove.
///
/// # Errors
///
/// Returns the underlying IO error for any failure other than `NotFound`.
pub fn remove_file_if_exists(path: &Path) -> std::io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Recursively removes a directory, treating a missing directory as success.
///
/// # Errors
///
/// Returns the underlying IO error for any failure other than `NotFound`.
pub fn remove_dir_if_exists(path: &Path) -> std::io::Result<bool> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
