//! Network and exfiltration detection rules
//!
//! Pattern data consumed by the network auditor: which tools can reach the
//! network, how to pull targets out of an invocation, which hosts count as
//! local, and which command shapes look like data exfiltration.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Tools capable of outbound network traffic. A search string that does not
/// match this gate is not audited further.
pub static NETWORK_TOOL: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(
        r"\b(curl|wget|fetch|ssh|scp|sftp|rsync|nc|ncat|netcat|telnet|ftp|socat)\b",
    )
    .case_insensitive(true)
    .build()
    .expect("network tool pattern is static")
});

/// Explicit URLs anywhere in the invocation.
pub static URL_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s"'<>)]+"#).expect("url pattern is static")
});

/// `<tool> <host> <port>` invocations (netcat and friends).
pub static HOST_PORT_TARGET: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(
        r"\b(?:nc|ncat|netcat|telnet|socat)\s+(?:-[a-zA-Z0-9]+\s+)*([a-zA-Z0-9][a-zA-Z0-9.\-]*)\s+(\d{1,5})\b",
    )
    .case_insensitive(true)
    .build()
    .expect("host/port pattern is static")
});

/// Exfiltration-shaped command patterns, in evaluation order. The first
/// match's source text is recorded as the audit reason.
pub const EXFILTRATION_PATTERNS: &[&str] = &[
    // Local read piped into a network tool
    r"\b(cat|head|tail|less|more|base64|gzip|tar|zip)\b[^|]*\|\s*(curl|wget|nc|ncat|ssh)\b",
    // Upload-style flags
    r"\bcurl\b.*\s(-d|--data|--data-binary|--data-raw|--data-urlencode|-F|--form|-T|--upload-file)\b",
    r"\bwget\b.*\s--post-(file|data)\b",
    // Bash network socket redirection
    r">\s*/dev/(tcp|udp)/",
    // Outbound copy destination syntax
    r"\bscp\b.+\s[^@\s]+@[^:\s]+:\S*\s*$",
    r"\brsync\b.+\s[^@\s]+@[^:\s]+:?:\S*\s*$",
];

/// Hosts considered local for `all_targets_local`.
const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0", "::1", "[::1]"];

/// Check whether an extracted target (URL or `host:port`) points at a
/// loopback address.
pub fn is_local_target(target: &str) -> bool {
    let host = extract_host(target);
    let host = host.to_ascii_lowercase();
    if LOOPBACK_HOSTS.contains(&host.as_str()) {
        return true;
    }
    host.starts_with("127.")
}

/// Pull the host portion out of a URL or `host:port` target.
fn extract_host(target: &str) -> &str {
    let rest = target
        .strip_prefix("https://")
        .or_else(|| target.strip_prefix("http://"))
        .unwrap_or(target);
    let rest = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    // Drop userinfo, keep the host
    let rest = rest.rsplit('@').next().unwrap_or(rest);
    // IPv6 literals keep their brackets; everything else drops the port
    if rest.starts_with('[') {
        match rest.find(']') {
            Some(end) => &rest[..=end],
            None => rest,
        }
    } else {
        rest.split(':').next().unwrap_or(rest)
    }
}
