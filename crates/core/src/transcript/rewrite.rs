//! Per-dialect rewriting into normalized markdown.
//!
//! Every rewriter makes one forward pass over the lines of its input. Turn
//! boundaries become [`TURN_SEPARATOR`] followed by a bold role label.
//! Backslashes are doubled and backticks escaped so the output can sit
//! inside a template literal; code inside a Claude Code fence keeps its
//! inline backticks and the emitter escapes those.

use crate::patterns::{
    BOX_LEFT_RE, BOX_RIGHT_RE, EXTRACTOR_META_RE, LINE_NUMBER_PREFIX_RE, SUB_BULLET_RE,
    TOOL_CALL_RE, WEB_CHAT_MARKER_RE,
};
use crate::transcript::dialect::Dialect;

/// Inserted before every role label.
pub const TURN_SEPARATOR: &str = "\n---\n";

const FENCE: &str = "```";
const BOX_CHARS: [char; 4] = ['╭', '│', '╰', '─'];

/// Rewrite `text` assuming it is in `dialect`.
pub fn rewrite(dialect: Dialect, text: &str) -> String {
    match dialect {
        Dialect::ClaudeCode => rewrite_claude_code(text),
        Dialect::Cursor => rewrite_cursor(text),
        Dialect::Extractor => rewrite_extractor(text),
        Dialect::WebChat => rewrite_web_chat(text),
        Dialect::ChatGPT => rewrite_chatgpt(text),
        Dialect::Unknown => escape_backticks(text),
    }
}

/// Double backslashes, then escape every backtick.
pub fn escape_backticks(s: &str) -> String {
    s.replace('\\', "\\\\").replace('`', "\\`")
}

/// Double backslashes, then escape fence markers only.
pub fn escape_fences(s: &str) -> String {
    s.replace('\\', "\\\\").replace(FENCE, "\\`\\`\\`")
}

fn push_turn(out: &mut String, label: &str, blank_after_label: bool) {
    out.push_str(TURN_SEPARATOR);
    out.push('\n');
    out.push_str("**");
    out.push_str(label);
    out.push_str("**\n");
    if blank_after_label {
        out.push('\n');
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Claude Code terminal transcripts.
pub fn rewrite_claude_code(text: &str) -> String {
    let mut lines: Vec<&str> = text.split('\n').collect();

    let opening: String = text.chars().take(200).collect();
    if opening.contains("Welcome to Claude Code") {
        let start = lines
            .iter()
            .enumerate()
            .position(|(i, l)| l.contains("What's new:") || (i > 10 && l.contains('>')));
        if let Some(start) = start {
            lines.drain(..start);
        }
    }

    let mut out = String::new();
    let mut in_fence = false;

    for raw in lines {
        let line = LINE_NUMBER_PREFIX_RE.replace(raw, "");
        let line = line.replace('⏺', "**Claude:**");
        let line = SUB_BULLET_RE.replace(&line, "  ").into_owned();

        if line.contains(BOX_CHARS) {
            if line.contains("Plan:") || line.contains("User rejected") {
                continue;
            }
            if line.contains('│') {
                let inner = BOX_LEFT_RE.replace(&line, "");
                let inner = BOX_RIGHT_RE.replace(&inner, "");
                if !inner.trim().is_empty() {
                    push_line(&mut out, &escape_backticks(&inner));
                }
            }
            continue;
        }

        if let Some(prompt) = line.trim().strip_prefix('>') {
            let prompt = prompt.trim();
            if prompt.is_empty() {
                continue;
            }
            out.push_str(TURN_SEPARATOR);
            out.push_str("**User**\n");
            push_line(&mut out, &escape_backticks(prompt));
            continue;
        }

        if line.contains(FENCE) {
            in_fence = !in_fence;
        }

        let summary = TOOL_CALL_RE.captures(&line).map(|caps| tool_summary(&caps[1]));
        let line = match summary {
            Some(summary) => summary.to_string(),
            None => line,
        };

        let line = if in_fence { escape_fences(&line) } else { escape_backticks(&line) };
        push_line(&mut out, &line);
    }

    out.trim().to_string()
}

fn tool_summary(tool: &str) -> &'static str {
    match tool {
        "Read" => "[Reading file]",
        "Write" => "[Writing file]",
        "Bash" => "[Running command]",
        "Search" => "[Searching]",
        _ => "[Running task]",
    }
}

/// Cursor markdown exports are already close to the target shape.
pub fn rewrite_cursor(text: &str) -> String {
    let mut out = String::new();
    for raw in text.split('\n') {
        let line = LINE_NUMBER_PREFIX_RE.replace(raw, "");
        push_line(&mut out, &escape_backticks(&line));
    }
    out.trim().to_string()
}

/// Browser-extension exports: metadata header, then `## Prompt:` /
/// `## Response:` sections.
pub fn rewrite_extractor(text: &str) -> String {
    let mut out = String::new();
    let mut in_header = true;
    let mut in_fence = false;

    for line in text.split('\n') {
        let trimmed = line.trim_start();

        if !in_fence {
            let turn = trimmed
                .strip_prefix("## Prompt:")
                .map(|rest| ("User", rest))
                .or_else(|| trimmed.strip_prefix("## Response:").map(|rest| ("Claude", rest)));
            if let Some((label, rest)) = turn {
                in_header = false;
                push_turn(&mut out, label, true);
                if !rest.trim().is_empty() {
                    push_line(&mut out, &escape_backticks(rest.trim()));
                }
                continue;
            }
        }

        if in_header
            && (trimmed.is_empty()
                || trimmed.starts_with("# ")
                || EXTRACTOR_META_RE.is_match(trimmed))
        {
            continue;
        }

        if trimmed.starts_with(FENCE) {
            in_fence = !in_fence;
        }
        push_line(&mut out, &escape_backticks(line));
    }

    out.trim().to_string()
}

/// Claude.ai copies with `Human:` / `Assistant:` markers.
///
/// Every marker opens a turn, including one in the middle of a line, so a
/// single-line copy keeps both sides of the exchange.
pub fn rewrite_web_chat(text: &str) -> String {
    let mut out = String::new();
    for line in text.split('\n') {
        let mut rest = line;
        let mut opened = false;

        while let Some(m) = WEB_CHAT_MARKER_RE.find(rest) {
            let before = rest[..m.start()].trim();
            if !before.is_empty() {
                push_line(&mut out, &escape_backticks(before));
            }
            let label = if m.as_str() == "Human:" { "User" } else { "Claude" };
            push_turn(&mut out, label, true);
            rest = &rest[m.end()..];
            opened = true;
        }

        if !opened {
            push_line(&mut out, &escape_backticks(line));
        } else if !rest.trim().is_empty() {
            push_line(&mut out, &escape_backticks(rest.trim()));
        }
    }
    out.trim().to_string()
}

/// ChatGPT copies: a bare `User` / `ChatGPT` line (or `You said:` /
/// `ChatGPT said:`) opens each turn.
pub fn rewrite_chatgpt(text: &str) -> String {
    let mut out = String::new();
    for line in text.split('\n') {
        match line.trim_end() {
            "User" | "You said:" => push_turn(&mut out, "User", false),
            "ChatGPT" | "ChatGPT said:" => push_turn(&mut out, "ChatGPT", false),
            _ => push_line(&mut out, &escape_backticks(line)),
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claude_code_turns_and_tools() {
        let text = concat!(
            "> pull from repo\n",
            "⏺ I'll pull the latest changes.\n",
            "  Bash(git pull)\n",
            "  ⎿  Already up to date.\n",
            ">\n",
            "> explain `main`\n"
        );
        let out = rewrite_claude_code(text);

        assert!(out.starts_with("---\n**User**\npull from repo"));
        assert!(out.contains("**Claude:** I'll pull the latest changes."));
        assert!(out.contains("[Running command]"));
        assert!(out.contains("  Already up to date."));
        assert!(out.contains("explain \\`main\\`"));
        assert_eq!(out.matches("**User**").count(), 2);
    }

    #[test]
    fn claude_code_strips_line_numbers() {
        let out = rewrite_claude_code("     1→fn main() {}\n    12→}");
        assert_eq!(out, "fn main() {}\n}");
    }

    #[test]
    fn claude_code_boxes() {
        let text = concat!(
            "╭──────────────╮\n",
            "│ Plan: do it  │\n",
            "│ step one     │\n",
            "│              │\n",
            "╰──────────────╯\n",
            "after\n"
        );
        let out = rewrite_claude_code(text);
        assert_eq!(out, "step one\nafter");
    }

    #[test]
    fn claude_code_skips_welcome_box() {
        let mut text = String::from("╭─────╮\n│ ✻ Welcome to Claude Code! │\n╰─────╯\n");
        text.push_str(" What's new:\n  • Settings\n> hi\n");
        let out = rewrite_claude_code(&text);
        assert!(!out.contains("Welcome"));
        assert!(out.starts_with("What's new:"));
        assert!(out.contains("**User**\nhi"));
    }

    #[test]
    fn claude_code_fence_escaping() {
        let text = "see `x`\n```rust\nlet s = `raw`;\n```\nafter `y`";
        let out = rewrite_claude_code(text);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "see \\`x\\`");
        assert_eq!(lines[1], "\\`\\`\\`rust");
        assert_eq!(lines[2], "let s = `raw`;");
        assert_eq!(lines[3], "\\`\\`\\`");
        assert_eq!(lines[4], "after \\`y\\`");
    }

    #[test]
    fn cursor_escapes_everything() {
        let out = rewrite_cursor("**User**\n\nrun `ls`\n```sh\nls\n```");
        assert_eq!(out, "**User**\n\nrun \\`ls\\`\n\\`\\`\\`sh\nls\n\\`\\`\\`");
    }

    #[test]
    fn extractor_drops_metadata_and_marks_turns() {
        let text = concat!(
            "# Cursor rules POC\n",
            "\n",
            "**User:** Jack\n",
            "**Created:** 11/17/2025 8:00:00\n",
            "**Exported:** 11/17/2025 9:00:00\n",
            "**Link:** [https://claude.ai/chat/x](https://claude.ai/chat/x)\n",
            "\n",
            "## Prompt:\n",
            "Convert the rules\n",
            "\n",
            "## Response:\n",
            "```md\n## Prompt: not a turn\n```\n"
        );
        let out = rewrite_extractor(text);

        assert!(out.starts_with("---\n\n**User**\n\nConvert the rules"));
        assert!(!out.contains("**Created:**"));
        assert!(out.contains("**Claude**"));
        assert!(out.contains("## Prompt: not a turn"));
        assert_eq!(out.matches("**User**").count(), 1);
    }

    #[test]
    fn web_chat_markers() {
        let out = rewrite_web_chat("Human: What is `x`?\n\nAssistant: It is y.");
        assert_eq!(
            out,
            "---\n\n**User**\n\nWhat is \\`x\\`?\n\n\n---\n\n**Claude**\n\nIt is y."
        );
    }

    #[test]
    fn web_chat_markers_mid_line() {
        let out = rewrite_web_chat("Human: what is 2+2? Assistant: 4");
        assert_eq!(out, "---\n\n**User**\n\nwhat is 2+2?\n\n---\n\n**Claude**\n\n4");
    }

    #[test]
    fn backslashes_are_doubled() {
        assert_eq!(escape_backticks(r"use `C:\tmp\`"), r"use \`C:\\tmp\\\`");
        assert_eq!(escape_fences(r"let p = `a\n`;"), r"let p = `a\\n`;");
    }

    #[test]
    fn chatgpt_markers() {
        let out = rewrite_chatgpt("User\nhello\nChatGPT\nhi there");
        assert_eq!(out, "---\n\n**User**\nhello\n\n---\n\n**ChatGPT**\nhi there");
    }

    #[test]
    fn unknown_only_escapes() {
        assert_eq!(rewrite(Dialect::Unknown, " a `b` "), " a \\`b\\` ");
    }
}
