//! Risk classification engine
//!
//! Classifies tool invocations against the ordered danger pattern table.
//! This module only classifies; acting on the result belongs to the host's
//! approval workflow.

pub mod file;
pub mod matcher;
pub mod network;
pub mod search;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::rules::dangerous::DANGER_PATTERNS;
use crate::rules::{DangerPattern, RiskLevel};

/// Result of classifying a tool invocation against the danger table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskClassification {
    pub level: RiskLevel,
    pub label: String,
    pub reason: String,
    /// Source text of the rule that fired, for audit display.
    pub matched_pattern: String,
}

/// The danger table compiled once, preserving table order. An ordered Vec
/// rather than a RegexSet: position is the precedence contract.
static COMPILED_TABLE: Lazy<Vec<(Regex, &'static DangerPattern)>> = Lazy::new(|| {
    DANGER_PATTERNS
        .iter()
        .filter_map(|rule| {
            RegexBuilder::new(rule.pattern)
                .case_insensitive(true)
                .build()
                .ok()
                .map(|re| (re, rule))
        })
        .collect()
});

/// Privilege escalation is also checked independently of the table, for the
/// dedicated auto-deny toggle.
static PRIVILEGE_ESCALATION: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"\b(sudo|su|doas|pkexec|runas)\b")
        .case_insensitive(true)
        .build()
        .expect("privilege escalation pattern is static")
});

/// Classify a tool invocation, returning the first matching rule in table
/// order, or `None` when nothing matches.
pub fn classify_command_risk(tool_name: &str, args: &Value) -> Option<RiskClassification> {
    let search = search::build_search_string(tool_name, args);

    for (re, rule) in COMPILED_TABLE.iter() {
        if re.is_match(&search) {
            return Some(RiskClassification {
                level: rule.level,
                label: rule.label.to_string(),
                reason: rule.reason.to_string(),
                matched_pattern: rule.pattern.to_string(),
            });
        }
    }

    None
}

/// Check whether an invocation requests elevated privileges.
pub fn is_privilege_escalation(tool_name: &str, args: &Value) -> bool {
    let search = search::build_search_string(tool_name, args);
    PRIVILEGE_ESCALATION.is_match(&search)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whole_table_compiles() {
        assert_eq!(COMPILED_TABLE.len(), DANGER_PATTERNS.len());
    }

    #[test]
    fn test_sudo_rm_is_critical() {
        let c = classify_command_risk("exec", &json!({"command": "sudo rm -rf /"})).unwrap();
        assert_eq!(c.level, RiskLevel::Critical);
        assert!(!c.matched_pattern.is_empty());
    }

    #[test]
    fn test_benign_command_is_none() {
        assert!(classify_command_risk("exec", &json!({"command": "ls -la"})).is_none());
        assert!(classify_command_risk("exec", &json!({"command": "git status"})).is_none());
    }

    #[test]
    fn test_free_text_body_never_classifies() {
        let result = classify_command_risk(
            "fetch",
            &json!({"url": "http://evil.com", "body": "rm -rf /"}),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_first_match_wins_over_later_severity() {
        // `sudo dd of=/dev/sda` hits the medium privilege-escalation
        // catch-all before the critical disk rule further down the table.
        let c = classify_command_risk(
            "exec",
            &json!({"command": "sudo dd if=/dev/zero of=/dev/sda"}),
        )
        .unwrap();
        assert_eq!(c.label, "privilege-escalation");
        assert_eq!(c.level, RiskLevel::Medium);
    }

    #[test]
    fn test_case_insensitive_classification() {
        let c = classify_command_risk("exec", &json!({"command": "DROP DATABASE prod"})).unwrap();
        assert_eq!(c.label, "destructive-sql");
    }

    #[test]
    fn test_privilege_escalation_check() {
        assert!(is_privilege_escalation("exec", &json!({"command": "sudo apt update"})));
        assert!(is_privilege_escalation("exec", &json!({"command": "doas reboot"})));
        assert!(!is_privilege_escalation("exec", &json!({"command": "echo pseudo"})));
        assert!(!is_privilege_escalation("exec", &json!({"command": "git status"})));
    }
}
