//! Astro (`---` / YAML-style) frontmatter serialization.

use super::types::{Frontmatter, FrontmatterValue};

/// Render a frontmatter block, delimiters included, without a trailing newline.
///
/// Strings and dates are always double-quoted with embedded quotes escaped,
/// booleans are lowercase, numbers are bare and lists render as
/// `["a", "b"]` (an empty list renders as `[]`).
pub fn serialize_frontmatter(fm: &Frontmatter) -> String {
    let mut lines = Vec::with_capacity(fm.len() + 2);
    lines.push("---".to_string());
    for (key, value) in fm.iter() {
        lines.push(format!("{}: {}", key, serialize_value(value)));
    }
    lines.push("---".to_string());
    lines.join("\n")
}

/// Render a full document: frontmatter block, blank line, body.
pub fn serialize(fm: &Frontmatter, body: &str) -> String {
    format!("{}\n\n{}", serialize_frontmatter(fm), body)
}

/// Render a single value in YAML flow syntax.
pub fn serialize_value(value: &FrontmatterValue) -> String {
    match value {
        FrontmatterValue::String(s) | FrontmatterValue::Date(s) => quote(s),
        FrontmatterValue::Bool(b) => b.to_string(),
        FrontmatterValue::Number(n) => n.clone(),
        FrontmatterValue::List(items) => {
            let quoted: Vec<String> = items.iter().map(|i| quote(i)).collect();
            format!("[{}]", quoted.join(", "))
        }
    }
}

fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n");
    format!("\"{}\"", escaped)
}
