//! Security policy settings
//!
//! The settings value cached by the store and serialized (camelCase JSON)
//! for the durable collaborator. Defaults are embedded; the allowlist ships
//! with anchored patterns for common CLI tools so a fresh install does not
//! prompt on every `git status`.

use serde::{Deserialize, Serialize};

/// Command names seeded into the default allowlist. Each becomes an
/// anchored, word-bounded pattern.
const DEFAULT_ALLOWED_COMMANDS: &[&str] = &[
    // Filesystem inspection
    "ls", "pwd", "cd", "cat", "head", "tail", "less", "more", "file", "stat",
    "du", "df", "tree", "find", "fd", "which", "whereis", "basename",
    "dirname", "realpath", "readlink",
    // Text processing
    "grep", "egrep", "rg", "wc", "sort", "uniq", "cut", "tr", "awk", "diff",
    "comm", "cmp", "jq", "yq", "nl", "paste", "join", "split", "column",
    "fmt", "fold", "rev", "tac", "strings", "od", "xxd", "hexdump",
    // Hashing and encoding
    "md5sum", "sha1sum", "sha256sum", "base64",
    // Archives
    "tar", "gzip", "gunzip", "zip", "unzip", "xz", "zstd",
    // Version control
    "git", "svn", "hg",
    // Build tools
    "make", "cmake", "ninja", "gcc", "clang", "rustc", "cargo", "rustup",
    "go", "tsc",
    // Language runtimes and package managers
    "python", "python3", "pip", "pip3", "node", "npm", "npx", "yarn", "pnpm",
    "deno", "bun", "ruby", "gem", "bundle", "php", "composer", "java",
    "javac", "mvn", "gradle", "swift", "dotnet",
    // Linters and test runners
    "eslint", "prettier", "jest", "vitest", "pytest", "tox", "black",
    "flake8", "mypy", "clippy",
    // Containers and infrastructure (read-heavy entry points)
    "docker", "podman", "kubectl", "helm", "terraform",
    // System information
    "date", "cal", "uptime", "whoami", "id", "uname", "hostname", "nproc",
    "arch", "lscpu", "lsblk", "ps", "pgrep", "pstree", "top", "free",
    "vmstat", "lsof", "printenv",
    // Networking diagnostics
    "ping", "dig", "nslookup", "host", "traceroute", "ss",
    // Shell utilities
    "echo", "printf", "env", "xargs", "seq", "yes", "sleep", "time", "test",
    "expr", "bc", "man", "type", "watch", "clear",
];

/// Build the default command allowlist: one anchored pattern per command.
pub fn default_command_allowlist() -> Vec<String> {
    DEFAULT_ALLOWED_COMMANDS
        .iter()
        .map(|cmd| format!(r"^{}\b", regex::escape(cmd)))
        .collect()
}

/// Operator-configurable security policy.
///
/// Serialized camelCase for the durable store and the legacy blob. The
/// cached value is always replaced wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySettings {
    /// Auto-deny anything matching the privilege escalation check.
    pub auto_deny_privilege_escalation: bool,

    /// Auto-deny anything the classifier rates critical.
    pub auto_deny_critical: bool,

    /// Require typed confirmation for critical approvals.
    pub require_type_to_critical: bool,

    /// Patterns auto-approving matching commands.
    pub command_allowlist: Vec<String>,

    /// Patterns auto-denying matching commands.
    pub command_denylist: Vec<String>,

    /// "Approve everything" deadline, unix milliseconds. Expired lazily:
    /// read it through `SettingsStore::override_remaining`, never directly.
    pub session_override_until: Option<i64>,

    /// How often the host should rotate API tokens.
    pub token_rotation_interval_days: u32,

    /// Deny writes outside the active project.
    pub read_only_projects: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            auto_deny_privilege_escalation: true,
            auto_deny_critical: true,
            require_type_to_critical: true,
            command_allowlist: default_command_allowlist(),
            command_denylist: Vec::new(),
            session_override_until: None,
            token_rotation_interval_days: 30,
            read_only_projects: false,
        }
    }
}
