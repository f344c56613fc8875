//! Security rules for agent-sentry
//!
//! Defines the ordered danger pattern table and exfiltration detection rules.

pub mod dangerous;
pub mod exfiltration;

use serde::Serialize;

/// Ordinal risk severity assigned to a classified command.
///
/// Only `Critical`, `High`, and `Medium` are currently populated in the
/// danger table; `Low` and `Safe` are reserved for future rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Short display name for audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// A danger pattern rule definition.
///
/// The table these rules live in is ordered, and that order is the
/// precedence contract: the first matching rule wins, regardless of the
/// levels of rules further down.
#[derive(Debug, Clone)]
pub struct DangerPattern {
    /// Regex pattern to match (evaluated case-insensitively)
    pub pattern: &'static str,

    /// Severity assigned when this rule fires
    pub level: RiskLevel,

    /// Short label identifying the danger category
    pub label: &'static str,

    /// Human-readable reason shown in audit output
    pub reason: &'static str,
}

impl DangerPattern {
    /// Create a new danger pattern rule
    pub const fn new(
        pattern: &'static str,
        level: RiskLevel,
        label: &'static str,
        reason: &'static str,
    ) -> Self {
        Self {
            pattern,
            level,
            label,
            reason,
        }
    }
}
