//! Hugo (`+++` / TOML-style) frontmatter parsing.

use tracing::{debug, warn};

use super::types::{Frontmatter, FrontmatterValue, ParsedDocument};
use crate::patterns::{DATE_TOKEN_RE, NUMBER_TOKEN_RE, TOML_KEY_VALUE_RE, TOML_TABLE_RE};

const DELIMITER: &str = "+++";

/// Parse Hugo frontmatter from content.
///
/// Frontmatter is delimited by `+++` lines at the start of the document:
/// ```markdown
/// +++
/// title = "Hello"
/// draft = false
/// tags = ["rust", "cli"]
/// +++
/// Document content
/// ```
///
/// A document without an opening delimiter, or without a closing one, is
/// returned with `frontmatter: None` and the content untouched as body.
/// Lines inside the block that are not `key = value` pairs of a recognized
/// shape are skipped with a warning. Keys under a `[table]` header are stored
/// with a dotted prefix (`cover.image`).
pub fn parse(content: &str) -> ParsedDocument {
    let trimmed = content.trim_start();
    let mut lines = trimmed.split_inclusive('\n');

    let mut consumed = match lines.next() {
        Some(first) if first.trim() == DELIMITER => first.len(),
        _ => return ParsedDocument { frontmatter: None, body: content.to_string() },
    };

    let mut header_lines = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        consumed += line.len();
        if line.trim() == DELIMITER {
            closed = true;
            break;
        }
        header_lines.push(line.trim_end_matches(['\n', '\r']));
    }

    if !closed {
        warn!("frontmatter opened with '+++' but never closed; leaving document unchanged");
        return ParsedDocument { frontmatter: None, body: content.to_string() };
    }

    let body = trimmed[consumed..].trim_start_matches(['\n', '\r']).to_string();

    ParsedDocument { frontmatter: Some(parse_header(&header_lines)), body }
}

/// Parse the lines between the delimiters.
pub fn parse_header(lines: &[&str]) -> Frontmatter {
    let mut fm = Frontmatter::new();
    let mut table: Option<String> = None;

    for (idx, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(caps) = TOML_TABLE_RE.captures(line) {
            table = Some(caps[1].to_string());
            continue;
        }

        let Some(caps) = TOML_KEY_VALUE_RE.captures(line) else {
            warn!(line = idx + 2, text = line, "skipping unrecognized frontmatter line");
            continue;
        };

        let key = match &table {
            Some(prefix) => format!("{}.{}", prefix, &caps[1]),
            None => caps[1].to_string(),
        };

        match parse_value(&caps[2]) {
            Some(value) => {
                if fm.insert(key.clone(), value).is_some() {
                    warn!(key = %key, "duplicate frontmatter key; keeping the last value");
                }
            }
            None => {
                warn!(key = %key, value = &caps[2], "skipping frontmatter value of unknown shape");
            }
        }
    }

    debug!(fields = fm.len(), "parsed hugo frontmatter");
    fm
}

/// Parse a single raw value.
///
/// Recognizes quoted strings (basic `"..."` with escapes, literal `'...'`),
/// booleans, bracketed lists, date-like tokens and numbers. A trailing
/// `# comment` is allowed after any of them.
pub fn parse_value(raw: &str) -> Option<FrontmatterValue> {
    let raw = raw.trim();

    if raw.starts_with('"') || raw.starts_with('\'') {
        let (s, rest) = parse_quoted(raw)?;
        return is_trailer(rest).then_some(FrontmatterValue::String(s));
    }

    if let Some(inner) = raw.strip_prefix('[') {
        let (items, rest) = parse_list(inner)?;
        return is_trailer(rest).then_some(FrontmatterValue::List(items));
    }

    let token = raw.split('#').next().unwrap_or("").trim();
    if token.eq_ignore_ascii_case("true") {
        Some(FrontmatterValue::Bool(true))
    } else if token.eq_ignore_ascii_case("false") {
        Some(FrontmatterValue::Bool(false))
    } else if DATE_TOKEN_RE.is_match(token) {
        Some(FrontmatterValue::Date(token.to_string()))
    } else if NUMBER_TOKEN_RE.is_match(token) {
        Some(FrontmatterValue::Number(token.to_string()))
    } else {
        None
    }
}

/// Only whitespace or a comment may follow a complete value.
fn is_trailer(rest: &str) -> bool {
    let rest = rest.trim();
    rest.is_empty() || rest.starts_with('#')
}

/// Parse a quoted string at the start of `s`. Returns the unescaped string
/// and the remainder after the closing quote.
fn parse_quoted(s: &str) -> Option<(String, &str)> {
    let quote = s.chars().next()?;
    let mut out = String::new();
    let mut chars = s.char_indices().skip(1);

    while let Some((i, c)) = chars.next() {
        if c == quote {
            return Some((out, &s[i + c.len_utf8()..]));
        }
        if c == '\\' && quote == '"' {
            match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, '"')) => out.push('"'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return None,
            }
            continue;
        }
        out.push(c);
    }
    None
}

/// Parse list items after the opening `[`. Returns the items and the
/// remainder after the closing `]`.
fn parse_list(s: &str) -> Option<(Vec<String>, &str)> {
    let mut items = Vec::new();
    let mut rest = s;

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if let Some(after) = rest.strip_prefix(']') {
            return Some((items, after));
        }
        if rest.is_empty() {
            return None;
        }

        if rest.starts_with('"') || rest.starts_with('\'') {
            let (item, after) = parse_quoted(rest)?;
            items.push(item);
            rest = after;
        } else {
            let end = rest.find([',', ']']).unwrap_or(rest.len());
            let item = rest[..end].trim().trim_matches('"');
            if !item.is_empty() {
                items.push(item.to_string());
            }
            rest = &rest[end..];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_frontmatter() {
        let content = "# Hello\n\nSome content";
        let result = parse(content);
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, content);
    }

    #[test]
    fn parse_unclosed_frontmatter_passes_through() {
        let content = "+++\ntitle = \"x\"\n# Body";
        let result = parse(content);
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, content);
    }

    #[test]
    fn parse_simple_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\n+++\n\n# Content";
        let result = parse(content);
        let fm = result.frontmatter.unwrap();
        assert_eq!(fm.get_str("title"), Some("Hello"));
        assert_eq!(result.body, "# Content");
    }

    #[test]
    fn parse_all_value_shapes() {
        let content = concat!(
            "+++\n",
            "title = \"Say \\\"hi\\\"\"\n",
            "draft = False\n",
            "categories = [\"CTO\",\"Crafty CTO\"]\n",
            "tags = []\n",
            "date = 2024-01-15T09:30:00-05:00\n",
            "weight = 10\n",
            "+++\n",
            "Body\n"
        );
        let fm = parse(content).frontmatter.unwrap();

        assert_eq!(fm.get("title"), Some(&FrontmatterValue::String("Say \"hi\"".into())));
        assert_eq!(fm.get("draft"), Some(&FrontmatterValue::Bool(false)));
        assert_eq!(
            fm.get("categories"),
            Some(&FrontmatterValue::List(vec!["CTO".into(), "Crafty CTO".into()]))
        );
        assert_eq!(fm.get("tags"), Some(&FrontmatterValue::List(vec![])));
        assert_eq!(
            fm.get("date"),
            Some(&FrontmatterValue::Date("2024-01-15T09:30:00-05:00".into()))
        );
        assert_eq!(fm.get("weight"), Some(&FrontmatterValue::Number("10".into())));
    }

    #[test]
    fn unrecognized_lines_are_skipped() {
        let content = "+++\ntitle = \"ok\"\nthis is junk\nmode = fancy\n+++\nBody";
        let fm = parse(content).frontmatter.unwrap();
        assert_eq!(fm.len(), 1);
        assert_eq!(fm.get_str("title"), Some("ok"));
    }

    #[test]
    fn tables_prefix_keys() {
        let content = "+++\ntitle = \"x\"\n[cover]\nimage = \"cover.png\"\nalt = \"Cover\"\n+++\n";
        let fm = parse(content).frontmatter.unwrap();
        assert_eq!(fm.get_str("cover.image"), Some("cover.png"));
        assert_eq!(fm.get_str("cover.alt"), Some("Cover"));
    }

    #[test]
    fn trailing_comments_allowed() {
        assert_eq!(parse_value("true # yes"), Some(FrontmatterValue::Bool(true)));
        assert_eq!(
            parse_value("\"a\" # note"),
            Some(FrontmatterValue::String("a".into()))
        );
        assert_eq!(parse_value("\"a\" trailing"), None);
    }

    #[test]
    fn literal_strings_keep_backslashes() {
        assert_eq!(
            parse_value(r"'C:\path'"),
            Some(FrontmatterValue::String(r"C:\path".into()))
        );
    }

    #[test]
    fn unterminated_list_is_rejected() {
        assert_eq!(parse_value("[\"a\", \"b\""), None);
    }
}
