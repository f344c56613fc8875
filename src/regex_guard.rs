//! Safe regex evaluation
//!
//! Every user-supplied pattern in the engine (allow/deny lists) is evaluated
//! through this module. `safe_regex_test` never panics and never hangs: a
//! pattern flagged by the ReDoS prefilter, or one that fails to compile,
//! simply does not match. The underlying `regex` crate has no backtracking,
//! so even patterns the prefilter misses cannot blow up at match time; the
//! prefilter is kept so hostile patterns are rejected before compilation and
//! so `validate_regex_pattern` can explain the rejection to a settings UI.

use regex::RegexBuilder;

/// Message returned for patterns flagged by the ReDoS prefilter.
const REDOS_MESSAGE: &str =
    "Pattern rejected: vulnerable to catastrophic backtracking (ReDoS)";

/// Compiled pattern size cap. Keeps adversarial patterns from ballooning
/// compile time or memory.
const SIZE_LIMIT: usize = 1 << 20;

/// Syntactic prefilter for regex shapes prone to catastrophic backtracking.
///
/// Flags two shapes:
/// - a quantifier immediately followed by a group close and another
///   quantifier: `(x+)+`, `(x*)*`, `(x+)*`, `(x*)+`
/// - two `.*` segments separated by an alternation: `.*a|.*b`
///
/// This is a cheap single-pass heuristic, not a proof. Ambiguous
/// alternations like `(a|aa)+` are not covered, and benign patterns sharing
/// the textual shape can be over-flagged.
pub fn is_redos_risk(pattern: &str) -> bool {
    let bytes = pattern.as_bytes();

    // Nested quantifier: `+)` or `*)` followed by `+` or `*`.
    for i in 0..bytes.len().saturating_sub(2) {
        if matches!(bytes[i], b'+' | b'*')
            && bytes[i + 1] == b')'
            && matches!(bytes[i + 2], b'+' | b'*')
        {
            return true;
        }
    }

    // Overlapping alternation: `.*` on both sides of a `|`.
    let mut dot_star_seen = false;
    let mut dot_star_before_alt = false;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'.' && i + 1 < bytes.len() && bytes[i + 1] == b'*' {
            if dot_star_before_alt {
                return true;
            }
            dot_star_seen = true;
            i += 2;
            continue;
        }
        if bytes[i] == b'|' && dot_star_seen {
            dot_star_before_alt = true;
        }
        i += 1;
    }

    false
}

/// Validate a user-supplied pattern, returning `None` when it is both
/// ReDoS-safe and compiles, or a display-ready message otherwise.
///
/// Errors are values here so a settings form can show them inline.
pub fn validate_regex_pattern(pattern: &str) -> Option<String> {
    if is_redos_risk(pattern) {
        return Some(REDOS_MESSAGE.to_string());
    }

    match RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(SIZE_LIMIT)
        .build()
    {
        Ok(_) => None,
        Err(e) => Some(e.to_string()),
    }
}

/// Test `input` against a user-supplied pattern, case-insensitively.
///
/// Fail-closed: returns `false` for ReDoS-flagged patterns (without
/// compiling them) and for patterns that do not compile. Never panics.
pub fn safe_regex_test(pattern: &str, input: &str) -> bool {
    if is_redos_risk(pattern) {
        return false;
    }

    match RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(SIZE_LIMIT)
        .build()
    {
        Ok(re) => re.is_match(input),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_quantifiers_flagged() {
        assert!(is_redos_risk("(a+)+"));
        assert!(is_redos_risk("(a*)*"));
        assert!(is_redos_risk("(a+)*"));
        assert!(is_redos_risk("(a*)+"));
        assert!(is_redos_risk("^(\\d+)+$"));
    }

    #[test]
    fn test_overlapping_alternation_flagged() {
        assert!(is_redos_risk(".*foo|.*bar"));
        assert!(is_redos_risk("^.*a|b.*c$"));
    }

    #[test]
    fn test_benign_patterns_pass() {
        assert!(!is_redos_risk(r"^git\b"));
        assert!(!is_redos_risk("[a-z]+"));
        assert!(!is_redos_risk(r"^npm (install|ci)\b"));
        assert!(!is_redos_risk(r"rm\s+-rf\s+\./node_modules"));
        assert!(!is_redos_risk(".*single dot star.*"));
    }

    #[test]
    fn test_known_blind_spot() {
        // Ambiguous alternation under a quantifier is not covered. The
        // linear-time engine underneath keeps this safe at match time.
        assert!(!is_redos_risk("(a|aa)+"));
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(validate_regex_pattern(r"^git\b"), None);
        assert_eq!(validate_regex_pattern("[a-z]+"), None);
    }

    #[test]
    fn test_validate_redos() {
        let msg = validate_regex_pattern("(a+)+").unwrap();
        assert!(msg.contains("catastrophic backtracking"));
    }

    #[test]
    fn test_validate_syntax_error() {
        let msg = validate_regex_pattern("[unclosed").unwrap();
        assert!(!msg.contains("catastrophic backtracking"));
    }

    #[test]
    fn test_safe_test_matches() {
        assert!(safe_regex_test(r"^git\b", "git status"));
        assert!(safe_regex_test(r"^GIT\b", "git status"), "case-insensitive");
        assert!(!safe_regex_test(r"^git\b", "cargo build"));
    }

    #[test]
    fn test_safe_test_fail_closed() {
        // ReDoS-flagged: no match, no hang, regardless of input length.
        let input = "a".repeat(64);
        assert!(!safe_regex_test("(a+)+$", &input));
        // Malformed: no match, no panic.
        assert!(!safe_regex_test("[unclosed", "anything"));
        // Empty pattern matches everything; still well-defined.
        assert!(safe_regex_test("", "anything"));
    }
}
