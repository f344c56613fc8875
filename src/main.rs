//! agent-sentry - risk analysis for agent tool calls
//!
//! Reads a tool invocation as JSON from stdin and writes a combined
//! analysis report to stdout. The report carries classification and audit
//! data only; acting on it is the caller's job.
//!
//! # Usage
//!
//! ```bash
//! echo '{"tool_name":"exec","args":{"command":"sudo rm -rf /"}}' | agent-sentry
//! ```

use std::env;
use std::io::{self, Read, Write};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use agent_sentry::{
    audit_network, classify_command_risk, classify_write, extract_command_string,
    is_privilege_escalation, matches_allowlist, matches_denylist, FilesystemWriteResult,
    JsonFileStore, NetworkAuditResult, RiskClassification, SettingsStore,
};

/// Tool invocation read from stdin.
#[derive(Debug, Deserialize)]
struct ToolInvocation {
    tool_name: String,
    #[serde(default)]
    args: Value,
}

/// Combined analysis report written to stdout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolReport {
    tool: String,
    command: String,
    risk: Option<RiskClassification>,
    privilege_escalation: bool,
    network: NetworkAuditResult,
    filesystem: FilesystemWriteResult,
    allowlisted: bool,
    denylisted: bool,
    override_remaining_ms: i64,
    /// Set when stdin could not be parsed; the caller must treat the
    /// invocation as denied (fail closed).
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_error: Option<String>,
}

impl ToolReport {
    fn parse_failure(error: String) -> Self {
        Self {
            tool: String::new(),
            command: String::new(),
            risk: None,
            privilege_escalation: false,
            network: NetworkAuditResult::default(),
            filesystem: FilesystemWriteResult::default(),
            allowlisted: false,
            denylisted: true,
            override_remaining_ms: 0,
            parse_error: Some(error),
        }
    }
}

fn print_version() {
    println!("agent-sentry {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"agent-sentry - risk analysis for agent tool calls

USAGE:
    agent-sentry [OPTIONS]

Reads {{"tool_name": ..., "args": {{...}}}} from stdin and writes an
analysis report as JSON to stdout. No command is executed or blocked;
the report feeds the host's approval workflow.

OPTIONS:
    -h, --help         Print this help message
    -v, --version      Print version information
    -s, --settings P   Path to the settings file
                       (default: ~/.config/agent-sentry/settings.json)
"#
    );
}

struct Args {
    help: bool,
    version: bool,
    settings_path: Option<String>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            settings_path: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-s" | "--settings" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.settings_path = Some(args[i].clone());
                    }
                }
                arg if arg.starts_with("--settings=") => {
                    let path = arg.trim_start_matches("--settings=");
                    result.settings_path = Some(path.to_string());
                }
                _ => {}
            }
            i += 1;
        }

        result
    }
}

fn build_store(settings_path: Option<&str>) -> SettingsStore {
    let durable = match settings_path {
        Some(path) => Some(JsonFileStore::new(path)),
        None => JsonFileStore::default_path().map(JsonFileStore::new),
    };

    let store = match durable {
        Some(file_store) => SettingsStore::new(Arc::new(file_store)),
        // No resolvable config dir: run on in-memory defaults.
        None => SettingsStore::new(Arc::new(agent_sentry::MemoryStore::new())),
    };

    let store = match JsonFileStore::legacy_path() {
        Some(path) if settings_path.is_none() => {
            store.with_legacy(Arc::new(JsonFileStore::new(path)))
        }
        _ => store,
    };

    store.init();
    store
}

fn analyze(invocation: &ToolInvocation, store: &SettingsStore) -> ToolReport {
    let settings = store.load();
    let command = extract_command_string(&invocation.tool_name, &invocation.args);

    ToolReport {
        tool: invocation.tool_name.clone(),
        risk: classify_command_risk(&invocation.tool_name, &invocation.args),
        privilege_escalation: is_privilege_escalation(&invocation.tool_name, &invocation.args),
        network: audit_network(&invocation.tool_name, &invocation.args),
        filesystem: classify_write(&invocation.tool_name, &invocation.args),
        allowlisted: matches_allowlist(&command, &settings.command_allowlist),
        denylisted: matches_denylist(&command, &settings.command_denylist),
        override_remaining_ms: store.override_remaining(),
        command,
        parse_error: None,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.help {
        print_help();
        return;
    }

    if args.version {
        print_version();
        return;
    }

    let store = build_store(args.settings_path.as_deref());

    let mut input_json = String::new();
    if io::stdin().read_to_string(&mut input_json).is_err() {
        input_json.clear();
    }

    let report = if input_json.trim().is_empty() {
        ToolReport::parse_failure("empty input".to_string())
    } else {
        match serde_json::from_str::<ToolInvocation>(&input_json) {
            Ok(invocation) => analyze(&invocation, &store),
            // SECURITY: fail closed; malformed input could be an evasion
            // attempt.
            Err(e) => ToolReport::parse_failure(e.to_string()),
        }
    };

    let json = serde_json::to_string(&report).unwrap_or_else(|_| "{}".to_string());
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", json);
    let _ = handle.flush();
}
