//! In-place edits to existing Astro (YAML) frontmatter.

use serde_yaml::Value;
use tracing::debug;

use crate::patterns::YAML_FRONTMATTER_RE;

/// Result of tagging a document with a `contentType` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// Field inserted; carries the new document.
    Added(String),
    /// Document already declares a content type.
    AlreadyPresent,
    /// No `---` frontmatter at the start of the document.
    NoFrontmatter,
}

/// Insert `contentType: "<tag>"` into a document's YAML frontmatter.
///
/// The field goes directly after the `title:` line, or at the end of the
/// header when there is no title. The rest of the document is untouched.
pub fn add_content_type(content: &str, tag: &str) -> TagOutcome {
    let Some(caps) = YAML_FRONTMATTER_RE.captures(content) else {
        return TagOutcome::NoFrontmatter;
    };
    let (Some(whole), Some(header)) = (caps.get(0), caps.get(1)) else {
        return TagOutcome::NoFrontmatter;
    };

    if has_key(header.as_str(), "contentType") {
        return TagOutcome::AlreadyPresent;
    }

    let field = format!("contentType: \"{}\"", tag);
    let mut lines: Vec<&str> = header.as_str().lines().collect();
    let insert_at = lines
        .iter()
        .position(|l| l.starts_with("title:"))
        .map_or(lines.len(), |i| i + 1);

    lines.insert(insert_at, field.as_str());

    debug!(tag, line = insert_at + 2, "inserted contentType");
    TagOutcome::Added(format!("---\n{}\n---{}", lines.join("\n"), &content[whole.end()..]))
}

/// Check for a top-level key, parsing the header as YAML when possible.
///
/// MDX headers are usually valid YAML; when they are not, fall back to a
/// line scan so a malformed header never gets a duplicate key.
fn has_key(header: &str, key: &str) -> bool {
    match serde_yaml::from_str::<Value>(header) {
        Ok(Value::Mapping(map)) => map.contains_key(key),
        _ => header.lines().any(|l| {
            l.strip_prefix(key).is_some_and(|rest| rest.trim_start().starts_with(':'))
        }),
    }
}
