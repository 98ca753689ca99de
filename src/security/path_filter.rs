//! Ignore-path filtering.
//!
//! Matching is a literal, case-sensitive prefix test with no normalization.

/// Returns true if `path` starts with any of `prefixes`.
///
/// An empty prefix list never matches.
pub fn is_ignored<P: AsRef<str>>(path: &str, prefixes: &[P]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_ref()))
}
