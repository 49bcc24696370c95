//! Dual representation of run/boot command entries
//!
//! The model keeps every command as a single editable line. A command meant as
//! an argument vector is written as a JSON array literal inside that line and
//! becomes a native sequence in the document, everything else stays a string.

use serde_yaml::Value;

/// Encode one command line into its document tree node
///
/// Anything bracket-shaped that fails to parse as a JSON array silently stays
/// a plain string, which keeps hand-written commands like `[ -f /x ] && y`
/// working as shell strings
pub fn encode(command: &str) -> Value {
    let trimmed = command.trim();

    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
            if json.is_array() {
                if let Ok(value) = serde_yaml::to_value(&json) {
                    return value;
                }
            }
        }
    }

    Value::String(command.to_string())
}

/// Decode a document tree node back into a single editable line
///
/// Sequences come back as compact JSON array literals so `encode` can pick
/// them up again, strings are kept verbatim, anything else is stringified
pub fn decode(node: &Value) -> String {
    match node {
        Value::String(x) => x.clone(),
        other => json_line(other),
    }
}

fn json_line(value: &Value) -> String {
    match serde_json::to_value(value) {
        Ok(json) => json.to_string(),
        // yaml with no json form (tagged values, complex keys) degrades to
        // flattened yaml text
        Err(_) => serde_yaml::to_string(value)
            .map(|x| x.trim_end().to_string())
            .unwrap_or_default(),
    }
}
