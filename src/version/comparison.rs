//! Version comparison for release tags.
//!
//! Release tags are plain dot-separated numbers (`1.2.0`, optionally written as
//! `v1.2.0`). Comparison never fails: a component that is not a plain number
//! counts as zero, and missing trailing components count as zero, so `1.2` and
//! `1.2.0` are equal.
//!
//! Components are compared by numeric value without converting them to a fixed
//! width integer, so there is no upper bound on either the number of components
//! or their magnitude.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cc_switch::version::comparison::{VersionComparator, compare_versions};
//! use std::cmp::Ordering;
//!
//! assert_eq!(compare_versions("1.2.0", "1.10.0"), Ordering::Less);
//! assert_eq!(compare_versions("1.2", "1.2.0"), Ordering::Equal);
//! assert!(VersionComparator::is_newer("v1.1.0", "1.0.0"));
//! ```

use std::cmp::Ordering;

/// Version comparison helpers used by the update check.
pub struct VersionComparator;

impl VersionComparator {
    /// Compares two dot-separated version strings component by component.
    ///
    /// The first component that differs decides the result. This relation is
    /// reflexive, antisymmetric and transitive for every pair of input strings.
    #[must_use]
    pub fn compare(a: &str, b: &str) -> Ordering {
        let mut left = a.split('.').map(normalize_component);
        let mut right = b.split('.').map(normalize_component);

        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (l, r) => {
                    let ordering = compare_components(l.unwrap_or(""), r.unwrap_or(""));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
            }
        }
    }

    /// Returns `true` when `candidate` is strictly newer than `current`.
    ///
    /// A leading `v` is stripped from both sides first, so tags can be passed
    /// directly.
    #[must_use]
    pub fn is_newer(candidate: &str, current: &str) -> bool {
        Self::compare(Self::strip_prefix(candidate), Self::strip_prefix(current))
            == Ordering::Greater
    }

    /// Strips a single leading `v` or `V` from a tag name.
    #[must_use]
    pub fn strip_prefix(tag: &str) -> &str {
        tag.strip_prefix('v').or_else(|| tag.strip_prefix('V')).unwrap_or(tag)
    }
}

/// Compares two version strings, see [`VersionComparator::compare`].
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    VersionComparator::compare(a, b)
}

/// Reduces a component to its canonical digit string.
///
/// Zero (including non-numeric and empty components) is the empty string, so
/// equal values always have equal representations.
fn normalize_component(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return "";
    }
    trimmed.trim_start_matches('0')
}

// Canonical digit strings without leading zeros order by length first.
fn compare_components(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
