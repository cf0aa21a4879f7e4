//! Version handling for the self-update check.
//!
//! cc-switch releases are tagged with plain numeric versions, so this module only
//! needs a total ordering over dot-separated strings; see [`comparison`].

pub mod comparison;

pub use comparison::{VersionComparator, compare_versions};

/// The version of the running build.
#[must_use]
pub const fn current_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
