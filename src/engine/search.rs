//! Search string construction
//!
//! Classification and auditing run over a single "searchable string" built
//! from the tool name and its arguments. For execution-style tools every
//! argument value is included; for all other tools only path/URL-shaped
//! argument keys are, so free-text fields (message bodies, memory content)
//! that merely *mention* dangerous commands never trigger classification.

use serde_json::Value;

/// Execution-style tool names: every argument value is searchable.
const EXEC_TOOLS: &[&str] = &["exec", "shell", "bash"];

/// Argument keys included in the search string for non-execution tools.
const PATH_SHAPED_KEYS: &[&str] = &["url", "path", "file", "filename", "destination", "target"];

/// Search strings are capped so a pathological argument payload cannot blow
/// up match time downstream.
const MAX_SEARCH_LEN: usize = 10_000;

/// Check whether a tool name is execution-style.
pub fn is_exec_tool(tool_name: &str) -> bool {
    EXEC_TOOLS
        .iter()
        .any(|t| tool_name.eq_ignore_ascii_case(t))
}

/// Render an argument value as searchable text.
///
/// Strings are verbatim, arrays space-joined, objects serialized; null
/// contributes nothing.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_text).collect();
            Some(parts.join(" "))
        }
        Value::Object(_) => serde_json::to_string(value).ok(),
    }
}

/// Build the bounded searchable string for a tool invocation.
pub fn build_search_string(tool_name: &str, args: &Value) -> String {
    let mut search = tool_name.to_string();

    if let Some(map) = args.as_object() {
        if is_exec_tool(tool_name) {
            for value in map.values() {
                if let Some(text) = value_text(value) {
                    search.push(' ');
                    search.push_str(&text);
                }
            }
        } else {
            for key in PATH_SHAPED_KEYS {
                if let Some(text) = map.get(*key).and_then(value_text) {
                    search.push(' ');
                    search.push_str(&text);
                }
            }
        }
    }

    truncate_on_char_boundary(search, MAX_SEARCH_LEN)
}

/// The canonical command string fed to the allow/deny matcher: joined
/// string arguments for execution-style tools, the bare tool name otherwise.
pub fn extract_command_string(tool_name: &str, args: &Value) -> String {
    if !is_exec_tool(tool_name) {
        return tool_name.to_string();
    }

    let mut parts = Vec::new();
    if let Some(map) = args.as_object() {
        for value in map.values() {
            if let Value::String(s) = value {
                parts.push(s.as_str());
            }
        }
    }

    if parts.is_empty() {
        tool_name.to_string()
    } else {
        parts.join(" ")
    }
}

fn truncate_on_char_boundary(mut s: String, max: usize) -> String {
    if s.len() <= max {
        return s;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exec_tool_includes_all_values() {
        let search = build_search_string("exec", &json!({"command": "sudo rm -rf /"}));
        assert_eq!(search, "exec sudo rm -rf /");
    }

    #[test]
    fn test_exec_tool_names() {
        assert!(is_exec_tool("exec"));
        assert!(is_exec_tool("shell"));
        assert!(is_exec_tool("Bash"));
        assert!(!is_exec_tool("fetch"));
        assert!(!is_exec_tool("write_file"));
    }

    #[test]
    fn test_non_exec_tool_uses_path_keys_only() {
        let search = build_search_string(
            "fetch",
            &json!({"url": "http://evil.com", "body": "rm -rf /"}),
        );
        assert!(search.contains("http://evil.com"));
        assert!(!search.contains("rm -rf"), "body fields must be excluded");
    }

    #[test]
    fn test_array_and_object_values() {
        let search = build_search_string("exec", &json!({"argv": ["rm", "-rf", "/tmp/x"]}));
        assert_eq!(search, "exec rm -rf /tmp/x");

        let search = build_search_string("exec", &json!({"opts": {"cwd": "/srv"}}));
        assert!(search.contains("\"cwd\""));
    }

    #[test]
    fn test_search_string_bounded() {
        let huge = "x".repeat(50_000);
        let search = build_search_string("exec", &json!({ "command": huge }));
        assert!(search.len() <= MAX_SEARCH_LEN);
    }

    #[test]
    fn test_command_string_exec() {
        let cmd = extract_command_string("exec", &json!({"command": "git status"}));
        assert_eq!(cmd, "git status");
    }

    #[test]
    fn test_command_string_non_exec_is_tool_name() {
        let cmd = extract_command_string("read_file", &json!({"path": "/etc/passwd"}));
        assert_eq!(cmd, "read_file");
    }

    #[test]
    fn test_command_string_exec_without_string_args() {
        let cmd = extract_command_string("exec", &json!({"timeout": 5}));
        assert_eq!(cmd, "exec");
    }
}
