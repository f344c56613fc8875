//! Filesystem write detection
//!
//! Classifies write-capable tool invocations and extracts the target path,
//! for scoping checks like read-only project mode.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use serde_json::Value;

use crate::engine::search::build_search_string;

/// Result of classifying an invocation as a filesystem write.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesystemWriteResult {
    pub is_write: bool,
    pub target_path: Option<String>,
}

/// Write-capable tool names: structured file tools and raw command names.
static WRITE_TOOL: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(
        r"^(write_file|append_file|delete_file|edit_file|create_file|save_file|move_file|copy_file|mkdir|mv|cp|rm|tee|touch|truncate|sed)$",
    )
    .case_insensitive(true)
    .build()
    .expect("write tool pattern is static")
});

/// Raw shell write commands reached through non-specialized tools.
static WRITE_COMMAND: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(
        r"\b(mv|cp|rm|tee|touch|mkdir|rmdir|truncate|ln|dd)\s|\bsed\s+(-[a-zA-Z]+\s+)*-i\b|(^|\s)>{1,2}\s*\S",
    )
    .case_insensitive(true)
    .build()
    .expect("write command pattern is static")
});

/// Argument keys probed for the target path, in order.
const PATH_KEYS: &[&str] = &[
    "path",
    "filePath",
    "file",
    "destination",
    "dest",
    "target",
    "directory",
];

/// Classify a tool invocation as a filesystem write and extract its target.
pub fn classify_write(tool_name: &str, args: &Value) -> FilesystemWriteResult {
    if WRITE_TOOL.is_match(tool_name) {
        return FilesystemWriteResult {
            is_write: true,
            target_path: extract_target_path(args),
        };
    }

    // Non-specialized tools can still carry raw shell writes.
    let search = build_search_string(tool_name, args);
    if WRITE_COMMAND.is_match(&search) {
        return FilesystemWriteResult {
            is_write: true,
            target_path: extract_target_path(args),
        };
    }

    FilesystemWriteResult::default()
}

fn extract_target_path(args: &Value) -> Option<String> {
    let map = args.as_object()?;
    for key in PATH_KEYS {
        if let Some(Value::String(path)) = map.get(*key) {
            return Some(path.clone());
        }
    }
    None
}
