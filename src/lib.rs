//! agent-sentry - Risk classification and policy matching for agent tool calls
//!
//! This library sits in front of every action an autonomous agent attempts
//! and answers three questions: how dangerous is it, does it match an
//! operator-defined allow/deny rule, and is a time-boxed "approve
//! everything" window currently open. It classifies and matches only; the
//! host's approval workflow acts on the result.
//!
//! # Features
//!
//! - **Risk classification**: ordered danger pattern table (privilege
//!   escalation, destructive deletion, disk destruction, fork bombs, RCE,
//!   system tampering, permission exposure, destructive SQL)
//! - **ReDoS-safe matching**: operator patterns are prefiltered and
//!   evaluated fail-closed; a hostile pattern can never hang or crash a check
//! - **Dual-speed settings store**: synchronous cached reads, best-effort
//!   background persistence, legacy plaintext migration
//! - **Session override**: lazily-expiring approve-all window
//! - **Network audit**: target extraction and exfiltration-shape detection
//! - **Write detection**: write-capable tool classification with target path
//!
//! # Example
//!
//! ```
//! use agent_sentry::{classify_command_risk, RiskLevel};
//! use serde_json::json;
//!
//! let risk = classify_command_risk("exec", &json!({"command": "sudo rm -rf /"}));
//! assert_eq!(risk.unwrap().level, RiskLevel::Critical);
//!
//! let risk = classify_command_risk("exec", &json!({"command": "ls -la"}));
//! assert!(risk.is_none());
//! ```

pub mod engine;
pub mod regex_guard;
pub mod rules;
pub mod settings;
pub mod store;

// Re-exports for convenience
pub use engine::file::{classify_write, FilesystemWriteResult};
pub use engine::matcher::{matches_allowlist, matches_denylist};
pub use engine::network::{audit_network, NetworkAuditResult};
pub use engine::search::{build_search_string, extract_command_string};
pub use engine::{classify_command_risk, is_privilege_escalation, RiskClassification};
pub use regex_guard::{is_redos_risk, safe_regex_test, validate_regex_pattern};
pub use rules::RiskLevel;
pub use settings::SecuritySettings;
pub use store::{DurableStore, JsonFileStore, MemoryStore, SettingsStore, StoreError};
