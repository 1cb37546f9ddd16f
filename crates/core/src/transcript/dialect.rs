//! Transcript dialects and their detectors.

use std::fmt;
use std::str::FromStr;

use crate::patterns::EXTRACTOR_EXPORTED_RE;

/// A recognized transcript export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Claude Code terminal session (`/export` or copy/paste).
    ClaudeCode,
    /// Cursor chat export.
    Cursor,
    /// Browser-extension export of a Claude.ai conversation
    /// (`**Exported:**` header, `## Prompt:` / `## Response:` turns).
    Extractor,
    /// Plain Claude.ai copy with `Human:` / `Assistant:` markers.
    WebChat,
    /// ChatGPT copy/export.
    ChatGPT,
    /// Nothing matched; only escaping is applied.
    Unknown,
}

impl Dialect {
    /// Detection order, most specific first.
    ///
    /// Indicator sets overlap (an extractor export also contains generic
    /// role words), so the first detector that fires decides.
    pub const PRIORITY: [Dialect; 5] = [
        Dialect::ClaudeCode,
        Dialect::Cursor,
        Dialect::Extractor,
        Dialect::WebChat,
        Dialect::ChatGPT,
    ];

    /// Human-readable source name used in the emitted heading.
    pub fn source_name(&self) -> &'static str {
        match self {
            Dialect::ClaudeCode => "Claude Code",
            Dialect::Cursor => "Cursor",
            Dialect::Extractor | Dialect::WebChat => "Claude.ai",
            Dialect::ChatGPT => "ChatGPT",
            Dialect::Unknown => "Unknown",
        }
    }

    /// Does `text` look like this dialect?
    pub fn detect(&self, text: &str) -> bool {
        match self {
            Dialect::ClaudeCode => contains_any(
                text,
                &[
                    "Welcome to Claude Code",
                    "⏺",
                    "/export",
                    "from Claude Code",
                    "Claude Code session",
                ],
            ),
            Dialect::Cursor => {
                contains_any(text, &["from Cursor", "**Cursor**", "_Exported on", "Cursor (1."])
            }
            Dialect::Extractor => {
                EXTRACTOR_EXPORTED_RE.is_match(text)
                    || (text.contains("## Prompt:") && text.contains("## Response:"))
            }
            Dialect::WebChat => text.contains("Human:") && text.contains("Assistant:"),
            Dialect::ChatGPT => contains_any(text, &["ChatGPT", "GPT-4", "GPT-3.5", "OpenAI"]),
            Dialect::Unknown => false,
        }
    }

    /// First dialect in [`Dialect::PRIORITY`] whose detector fires.
    pub fn detect_first(text: &str) -> Option<Dialect> {
        Self::PRIORITY.into_iter().find(|d| d.detect(text))
    }
}

fn contains_any(text: &str, indicators: &[&str]) -> bool {
    indicators.iter().any(|i| text.contains(i))
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            Dialect::ClaudeCode => "claude-code",
            Dialect::Cursor => "cursor",
            Dialect::Extractor => "extractor",
            Dialect::WebChat => "claude-ai",
            Dialect::ChatGPT => "chatgpt",
            Dialect::Unknown => "unknown",
        };
        f.write_str(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transcript format '{0}'")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "claude-code" => Ok(Dialect::ClaudeCode),
            "cursor" => Ok(Dialect::Cursor),
            "extractor" => Ok(Dialect::Extractor),
            "claude-ai" | "web-chat" => Ok(Dialect::WebChat),
            "chatgpt" => Ok(Dialect::ChatGPT),
            other => Err(UnknownDialect(other.to_string())),
        }
    }
}
