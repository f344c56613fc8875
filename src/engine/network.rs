//! Network audit
//!
//! Detects outbound-network-capable invocations, extracts their targets,
//! and flags exfiltration shapes. Produces audit data only; the allow/deny
//! decision belongs to the host's approval workflow.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::engine::search::build_search_string;
use crate::rules::exfiltration::{
    is_local_target, EXFILTRATION_PATTERNS, HOST_PORT_TARGET, NETWORK_TOOL, URL_TARGET,
};

/// Audit data for a potentially network-capable tool invocation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAuditResult {
    pub is_network_request: bool,
    pub targets: Vec<String>,
    pub is_exfiltration: bool,
    pub exfiltration_reason: Option<String>,
    pub all_targets_local: bool,
}

static COMPILED_EXFILTRATION: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    EXFILTRATION_PATTERNS
        .iter()
        .filter_map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .ok()
                .map(|re| (re, *pattern))
        })
        .collect()
});

/// Audit a tool invocation for outbound network activity.
pub fn audit_network(tool_name: &str, args: &Value) -> NetworkAuditResult {
    let search = build_search_string(tool_name, args);

    if !NETWORK_TOOL.is_match(&search) {
        return NetworkAuditResult::default();
    }

    // Pass 1: explicit URLs. Pass 2: `<tool> <host> <port>` invocations.
    let mut targets: Vec<String> = URL_TARGET
        .find_iter(&search)
        .map(|m| m.as_str().to_string())
        .collect();
    for caps in HOST_PORT_TARGET.captures_iter(&search) {
        targets.push(format!("{}:{}", &caps[1], &caps[2]));
    }

    let all_targets_local = !targets.is_empty() && targets.iter().all(|t| is_local_target(t));

    let exfiltration_reason = COMPILED_EXFILTRATION
        .iter()
        .find(|(re, _)| re.is_match(&search))
        .map(|(_, pattern)| pattern.to_string());

    NetworkAuditResult {
        is_network_request: true,
        targets,
        is_exfiltration: exfiltration_reason.is_some(),
        exfiltration_reason,
        all_targets_local,
    }
}
