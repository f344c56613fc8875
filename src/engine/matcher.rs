//! Allow/deny list matching
//!
//! Evaluates operator-supplied pattern lists against a command string.
//! Every pattern goes through `safe_regex_test`, so a hostile or malformed
//! entry degrades to "does not match" and the remaining patterns are still
//! evaluated.

use crate::regex_guard::safe_regex_test;

/// Check a command against an allowlist; true if any pattern matches.
pub fn matches_allowlist(command: &str, patterns: &[String]) -> bool {
    matches_any(command, patterns)
}

/// Check a command against a denylist; true if any pattern matches.
pub fn matches_denylist(command: &str, patterns: &[String]) -> bool {
    matches_any(command, patterns)
}

fn matches_any(command: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| safe_regex_test(p, command))
}
