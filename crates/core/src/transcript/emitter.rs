//! TypeScript module emission.

use std::path::Path;

use crate::patterns::{CURSOR_EXPORTED_RE, EXTRACTOR_EXPORTED_RE, NON_IDENTIFIER_RE};
use crate::transcript::dialect::Dialect;

/// A rewritten transcript ready to be written as a `.ts` module.
#[derive(Debug, Clone)]
pub struct TranscriptModule {
    pub export_name: String,
    pub dialect: Dialect,
    /// Session date taken from the export header, if the dialect carries one.
    pub session_date: Option<String>,
    pub body: String,
}

impl TranscriptModule {
    /// Render `export const <name> = \`...\`;`.
    pub fn render(&self) -> String {
        let source = self.dialect.source_name();
        let session = match &self.session_date {
            Some(date) => format!("_{} session from {}_", source, date),
            None => format!("_{} session_", source),
        };
        format!(
            "export const {} = `# {} Conversation\n{}\n\n---\n\n{}`;",
            self.export_name,
            source,
            session,
            template_escape(&self.body)
        )
    }
}

/// Export name derived from the input filename: `claude-code.md` becomes
/// `claude_codeTranscript`.
pub fn export_name_from_path(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let name = stem.replace(['-', ' '], "_");
    let name = NON_IDENTIFIER_RE.replace_all(&name, "");
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}Transcript", name)
    } else {
        format!("{}Transcript", name)
    }
}

/// Session date from the export header (Cursor and extractor exports only).
pub fn session_date(dialect: Dialect, text: &str) -> Option<String> {
    let re = match dialect {
        Dialect::Cursor => &CURSOR_EXPORTED_RE,
        Dialect::Extractor => &EXTRACTOR_EXPORTED_RE,
        _ => return None,
    };
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str().to_string())
}

/// Escape whatever the rewriters left that would end or interpolate a
/// template literal: bare backticks and `${`.
///
/// The rewriters double every backslash, so a backslash in `body` always
/// starts a two-character escape that is copied through unchanged.
pub fn template_escape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn export_names() {
        assert_eq!(export_name_from_path(&PathBuf::from("claude-code.md")), "claude_codeTranscript");
        assert_eq!(
            export_name_from_path(&PathBuf::from("/tmp/my chat (1).txt")),
            "my_chat_1Transcript"
        );
        assert_eq!(export_name_from_path(&PathBuf::from("2025-chat.md")), "_2025_chatTranscript");
    }

    #[test]
    fn template_escape_leaves_escaped_backticks() {
        assert_eq!(template_escape("a \\`b\\` `c` ${x} \\${y}"), "a \\`b\\` \\`c\\` \\${x} \\${y}");
    }

    #[test]
    fn template_escape_copies_escape_pairs() {
        assert_eq!(template_escape("C:\\\\tmp\\\\\\`"), "C:\\\\tmp\\\\\\`");
        assert_eq!(template_escape("\\\\`"), "\\\\\\`");
    }

    #[test]
    fn session_dates() {
        let cursor = "_Exported on 8/31/2025 at 10:12:03 CDT from Cursor (1.5.9)_";
        assert_eq!(session_date(Dialect::Cursor, cursor), Some("8/31/2025".to_string()));
        let extractor = "**Exported:** 11/17/2025 9:00:00";
        assert_eq!(session_date(Dialect::Extractor, extractor), Some("11/17/2025".to_string()));
        assert_eq!(session_date(Dialect::WebChat, cursor), None);
    }

    #[test]
    fn render_module() {
        let module = TranscriptModule {
            export_name: "chatTranscript".to_string(),
            dialect: Dialect::ChatGPT,
            session_date: None,
            body: "---\n\n**User**\nhi".to_string(),
        };
        assert_eq!(
            module.render(),
            "export const chatTranscript = `# ChatGPT Conversation\n_ChatGPT session_\n\n---\n\n---\n\n**User**\nhi`;"
        );
    }
}
