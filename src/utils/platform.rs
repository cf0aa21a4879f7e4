//! Platform identification and home directory lookup.

use std::path::PathBuf;

use crate::core::CcSwitchError;

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Gets the home directory path for the current user.
///
/// # Errors
///
/// Returns [`CcSwitchError::HomeDirNotFound`] when the home directory cannot be
/// determined; its suggestion names the variable to check on this platform.
pub fn get_home_dir() -> Result<PathBuf, CcSwitchError> {
    resolve_home(dirs::home_dir())
}

fn resolve_home(home: Option<PathBuf>) -> Result<PathBuf, CcSwitchError> {
    home.ok_or(CcSwitchError::HomeDirNotFound)
}

/// Operating system name as used in release asset names.
///
/// Rust reports macOS as `macos`; release assets call it `darwin`.
#[must_use]
pub fn release_os_name(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

/// CPU architecture name as used in release asset names.
#[must_use]
pub fn release_arch_name(arch: &str) -> &str {
    match arch {
        "aarch64" => "arm64",
        "x86_64" => "x64",
        other => other,
    }
}
