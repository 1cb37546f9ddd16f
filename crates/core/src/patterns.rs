//! Compiled regular expressions shared by the converters.
//!
//! Everything that recognizes source-specific syntax lives here so the
//! frontmatter, shortcode and transcript passes agree on the same grammar.

use std::sync::LazyLock;

use regex::Regex;

// --- Hugo frontmatter -------------------------------------------------------

/// `key = value` inside a `+++` block.
/// Captures: 1: key, 2: raw value
pub static TOML_KEY_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_\-]*)\s*=\s*(.*)$").unwrap()
});

/// `[cover]` style table header inside a `+++` block.
pub static TOML_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([A-Za-z0-9_.\-]+)\]\s*(?:#.*)?$").unwrap());

/// Bare date or datetime token: `2024-01-15`, `2024-01-15T10:00:00-05:00`.
pub static DATE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+\-]\d{2}:?\d{2})?)?$")
        .unwrap()
});

/// Bare integer or decimal.
pub static NUMBER_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+\-]?\d+(?:\.\d+)?$").unwrap());

// --- Astro frontmatter ------------------------------------------------------

/// A `---` delimited YAML block at the very start of a document.
/// Captures: 1: YAML body
pub static YAML_FRONTMATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---").unwrap());

// --- Shortcodes -------------------------------------------------------------

/// `{{< imgs size="lg" imgs="a.png,b.png" >}}`
pub static IMGS_SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{<\s*imgs\s+[^>]+>\}\}").unwrap());

/// `{{< permalink >}}`
pub static PERMALINK_SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{<\s*permalink\s*>\}\}").unwrap());

/// `key="value"` pairs inside a shortcode.
/// Captures: 1: key, 2: value
pub static SHORTCODE_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z_][A-Za-z0-9_\-]*)="([^"]*)""#).unwrap());

// --- Existing MDX -----------------------------------------------------------

/// Static image import from the legacy blog asset tree.
pub static STATIC_BLOG_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+\w+\s+from\s+['"][^'"]*/images/blog/"#).unwrap()
});

/// Whole static image import line, for cleanup.
/// Captures: 1: imported identifier
pub static STATIC_BLOG_IMPORT_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^import\s+(\w+)\s+from\s+['"][^'"]*images/blog/[^'"]*['"];"#).unwrap()
});

/// `<Image src={cover} ... />`
/// Captures: 1: expression inside `src={...}`
pub static IMAGE_COMPONENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<Image\s+src=\{([^}]+)\}[^>]*/?>").unwrap());

/// Two or more consecutive blank lines.
pub static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").unwrap());

// --- Transcripts ------------------------------------------------------------

/// Claude.ai role markers, wherever they occur in a line.
pub static WEB_CHAT_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Human:|Assistant:").unwrap());

/// Line-number gutter left by file viewers: `   123→content`.
pub static LINE_NUMBER_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+→").unwrap());

/// Claude Code tool-output sub-bullet.
pub static SUB_BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*⎿\s*").unwrap());

/// A line that is only a tool invocation, e.g. `Read(src/main.rs)`.
/// Captures: 1: tool name
pub static TOOL_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(Read|Write|Bash|Search|Task)\([^)]+\)$").unwrap()
});

/// Everything up to and including the first box border.
pub static BOX_LEFT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^│]*│\s*").unwrap());

/// Everything from the last box border onwards.
pub static BOX_RIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*│[^│]*$").unwrap());

/// Browser-extension export metadata line: `**Exported:** 11/17/2025 ...`.
/// Captures: 1: date
pub static EXTRACTOR_EXPORTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*Exported:\*\*\s*(\d{1,2}/\d{1,2}/\d{4})?").unwrap()
});

/// Metadata line in an extractor header: `**Created:** ...`.
pub static EXTRACTOR_META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*[A-Za-z ]+:\*\*").unwrap());

/// Cursor export subtitle: `_Exported on 8/31/2025 at 10:12:03 CDT from Cursor (1.5.9)_`.
/// Captures: 1: date
pub static CURSOR_EXPORTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_Exported on (\d{1,2}/\d{1,2}/\d{4})").unwrap());

/// Characters not allowed in a generated TypeScript identifier.
pub static NON_IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());
