//! The ordered danger pattern table
//!
//! Rules are grouped by category and evaluated front-to-back; the first
//! matching rule wins. Table position, not severity, is the precedence
//! contract. This means an earlier medium rule can mask a later critical
//! rule for overlapping input (e.g. `sudo dd of=/dev/sda` classifies as the
//! medium privilege-escalation catch-all before the critical disk rule is
//! reached). That inversion is inherited behavior; do not reorder without
//! auditing every caller that displays `matched_pattern`.

use crate::rules::{DangerPattern, RiskLevel};

/// All danger patterns, in evaluation order.
pub const DANGER_PATTERNS: &[DangerPattern] = &[
    // ========================================================================
    // Privilege escalation
    // ========================================================================
    DangerPattern::new(
        r"\b(sudo|doas|pkexec)\s+rm\s+-[a-z]*r",
        RiskLevel::Critical,
        "privilege-escalation",
        "Recursive deletion with elevated privileges",
    ),
    DangerPattern::new(
        r"\b(sudo|doas|pkexec)\s+(sh|bash|zsh|dash)\b",
        RiskLevel::High,
        "privilege-escalation",
        "Spawning a shell with elevated privileges",
    ),
    DangerPattern::new(
        r"\bsudo\s+su\b|\bsu\s+root\b|\bsu\s+-\s*$",
        RiskLevel::High,
        "privilege-escalation",
        "Switching to the root account",
    ),
    DangerPattern::new(
        r"\b(sudo|doas|pkexec|runas)\b",
        RiskLevel::Medium,
        "privilege-escalation",
        "Command requests elevated privileges",
    ),
    // ========================================================================
    // Destructive deletion
    // ========================================================================
    DangerPattern::new(
        r"\brm\s+(-[a-zA-Z]+\s+)*/\s*$",
        RiskLevel::Critical,
        "destructive-deletion",
        "Deleting the root filesystem",
    ),
    DangerPattern::new(
        r"\brm\s+(-[a-zA-Z]+\s+)*/(etc|usr|var|bin|sbin|lib|boot|opt|home)\b",
        RiskLevel::Critical,
        "destructive-deletion",
        "Deleting system directories",
    ),
    DangerPattern::new(
        r"\brm\s+(-[a-zA-Z]+\s+)*(~|\$HOME)/?\s*$",
        RiskLevel::Critical,
        "destructive-deletion",
        "Deleting the home directory",
    ),
    DangerPattern::new(
        r"\brm\s+(-[a-zA-Z]+\s+)*/\*",
        RiskLevel::Critical,
        "destructive-deletion",
        "Deleting all files under root",
    ),
    DangerPattern::new(
        r"\brm\s+-[a-z]*r[a-z]*f|\brm\s+-[a-z]*f[a-z]*r",
        RiskLevel::High,
        "destructive-deletion",
        "Recursive force deletion",
    ),
    DangerPattern::new(
        r"\bfind\s+/\s.*-delete\b",
        RiskLevel::High,
        "destructive-deletion",
        "Bulk deletion from the filesystem root",
    ),
    DangerPattern::new(
        r"\bshred\s",
        RiskLevel::Medium,
        "destructive-deletion",
        "Irrecoverably destroying file contents",
    ),
    // ========================================================================
    // Disk destruction
    // ========================================================================
    DangerPattern::new(
        r"\bdd\b[^|]*\bof=/dev/(sd|hd|nvme|vd|xvd|mmcblk)",
        RiskLevel::Critical,
        "disk-destruction",
        "Writing directly to a disk device",
    ),
    DangerPattern::new(
        r"\bmkfs(\.[a-z0-9]+)?\s+(-[a-zA-Z]+\s+)*/dev/",
        RiskLevel::Critical,
        "disk-destruction",
        "Formatting a disk device",
    ),
    DangerPattern::new(
        r">\s*/dev/(sd|hd|nvme)[a-z0-9]*\b",
        RiskLevel::Critical,
        "disk-destruction",
        "Overwriting a raw disk device",
    ),
    DangerPattern::new(
        r"\b(fdisk|parted|sgdisk)\s+(-[a-zA-Z]+\s+)*/dev/",
        RiskLevel::High,
        "disk-destruction",
        "Modifying a disk partition table",
    ),
    // ========================================================================
    // Fork bombs / resource exhaustion
    // ========================================================================
    DangerPattern::new(
        r":\(\)\s*\{.*:\s*\|\s*:.*&",
        RiskLevel::Critical,
        "fork-bomb",
        "Fork bomb detected",
    ),
    DangerPattern::new(
        r"\bwhile\s+(true|:)\s*;\s*do\b.*&\s*done",
        RiskLevel::High,
        "fork-bomb",
        "Unbounded background process loop",
    ),
    // ========================================================================
    // Remote code execution
    // ========================================================================
    DangerPattern::new(
        r"\b(curl|wget)\b[^|]*\|\s*(ba|z|da)?sh\b",
        RiskLevel::High,
        "remote-code-execution",
        "Piping remote content into a shell",
    ),
    DangerPattern::new(
        r"\b(curl|wget)\b[^|]*\|\s*(python|perl|ruby|node)\b",
        RiskLevel::High,
        "remote-code-execution",
        "Piping remote content into an interpreter",
    ),
    DangerPattern::new(
        r"\beval\s+.*\$\(\s*(curl|wget)\b",
        RiskLevel::High,
        "remote-code-execution",
        "Evaluating downloaded content",
    ),
    DangerPattern::new(
        r"\bbash\s+-i\s+>&\s*/dev/tcp/",
        RiskLevel::Critical,
        "remote-code-execution",
        "Reverse shell via /dev/tcp",
    ),
    DangerPattern::new(
        r"\bnc\b.*\s-e\s*/bin/(ba)?sh",
        RiskLevel::Critical,
        "remote-code-execution",
        "Netcat reverse shell",
    ),
    // ========================================================================
    // Firewall / account / process tampering
    // ========================================================================
    DangerPattern::new(
        r"\b(iptables|nft)\s+(-F\b|--flush|flush\s)",
        RiskLevel::High,
        "system-tampering",
        "Flushing firewall rules",
    ),
    DangerPattern::new(
        r"\bufw\s+disable\b|\bsystemctl\s+(stop|disable|mask)\s+(firewalld|ufw|nftables)\b",
        RiskLevel::High,
        "system-tampering",
        "Disabling the firewall",
    ),
    DangerPattern::new(
        r"\b(userdel|groupdel)\s",
        RiskLevel::High,
        "system-tampering",
        "Deleting user accounts",
    ),
    DangerPattern::new(
        r"\bpasswd\s+(-d|--delete)\b",
        RiskLevel::High,
        "system-tampering",
        "Removing account passwords",
    ),
    DangerPattern::new(
        r"\bkill(all)?\s+-9\b|\bpkill\s+-9\b",
        RiskLevel::Medium,
        "system-tampering",
        "Force-killing processes",
    ),
    DangerPattern::new(
        r"\bsystemctl\s+(stop|disable|mask)\s+\S",
        RiskLevel::Medium,
        "system-tampering",
        "Stopping or disabling a system service",
    ),
    // ========================================================================
    // Permission exposure
    // ========================================================================
    DangerPattern::new(
        r"\bchmod\s+(-R\s+)?777\b",
        RiskLevel::High,
        "permission-exposure",
        "Setting world-writable permissions",
    ),
    DangerPattern::new(
        r"\bchmod\s+-R\s+[67][67][67]\b",
        RiskLevel::Medium,
        "permission-exposure",
        "Recursive permissive chmod",
    ),
    DangerPattern::new(
        r"\bchmod\b.*\bo\+w\b",
        RiskLevel::Medium,
        "permission-exposure",
        "Granting world write access",
    ),
    // ========================================================================
    // Destructive SQL
    // ========================================================================
    DangerPattern::new(
        r"\bdrop\s+(database|schema)\b",
        RiskLevel::Critical,
        "destructive-sql",
        "Dropping a database",
    ),
    DangerPattern::new(
        r"\bdrop\s+table\b",
        RiskLevel::High,
        "destructive-sql",
        "Dropping a table",
    ),
    DangerPattern::new(
        r"\btruncate\s+table\b",
        RiskLevel::High,
        "destructive-sql",
        "Truncating a table",
    ),
    DangerPattern::new(
        r"\bdelete\s+from\s+\w+\s*(;|$)",
        RiskLevel::Medium,
        "destructive-sql",
        "DELETE without a WHERE clause",
    ),
];
