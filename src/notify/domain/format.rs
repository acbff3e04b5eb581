//! Rendering of structured notification messages as chat text.

use serde_json::Value;

const FENCE: &str = "```";
const INDENT: &str = "  ";

/// Renders a notification message as chat text.
///
/// Strings are kept as they are, numbers and booleans become their textual
/// form and `null` becomes empty. Mappings render one `key: value` line per
/// entry and sequences one `- item` line per element; nested containers are
/// indented by two spaces per level. A top-level container is wrapped in a
/// fenced block.
#[must_use]
pub fn format_message(message: &Value) -> String {
    if is_nested(message) {
        let mut lines = Vec::new();
        push_lines(message, 0, &mut lines);
        format!("{FENCE}\n{}\n{FENCE}", lines.join("\n"))
    } else {
        inline_text(message)
    }
}

fn push_lines(value: &Value, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    match value {
        Value::Object(entries) => {
            for (key, item) in entries {
                if is_nested(item) {
                    lines.push(format!("{indent}{key}:"));
                    push_lines(item, depth + 1, lines);
                } else {
                    lines.push(entry_line(&format!("{indent}{key}:"), item));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if is_nested(item) {
                    lines.push(format!("{indent}-"));
                    push_lines(item, depth + 1, lines);
                } else {
                    lines.push(entry_line(&format!("{indent}-"), item));
                }
            }
        }
        scalar => lines.push(format!("{indent}{}", inline_text(scalar))),
    }
}

fn entry_line(lead: &str, item: &Value) -> String {
    let text = inline_text(item);
    if text.is_empty() {
        lead.to_owned()
    } else {
        format!("{lead} {text}")
    }
}

// Empty containers have no lines of their own and render inline.
fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(entries) => !entries.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

fn inline_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
