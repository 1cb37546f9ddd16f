//! Hugo to Astro frontmatter field mapping.

use tracing::{debug, warn};

use super::parser::parse;
use super::serializer::serialize;
use super::types::{Frontmatter, FrontmatterValue};
use crate::content_type::ContentType;

/// Options for [`translate`].
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Section the source file came from; selects type-specific fields.
    pub content_type: Option<ContentType>,
    /// Offset appended to date-only `publishDate` values, e.g. `-05:00`.
    pub tz_offset: String,
    /// Prefix for the `[cover] image` path.
    pub cover_image_prefix: String,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            content_type: None,
            tz_offset: "-05:00".to_string(),
            cover_image_prefix: "~/assets/images/posts/blog/".to_string(),
        }
    }
}

/// Outcome of translating a whole document.
#[derive(Debug, Clone)]
pub enum Translation {
    /// Frontmatter was found and rewritten.
    Converted { frontmatter: Frontmatter, content: String },
    /// No Hugo header; content is unchanged.
    Unchanged(String),
}

impl Translation {
    pub fn content(&self) -> &str {
        match self {
            Translation::Converted { content, .. } => content,
            Translation::Unchanged(content) => content,
        }
    }

    pub fn into_content(self) -> String {
        match self {
            Translation::Converted { content, .. } => content,
            Translation::Unchanged(content) => content,
        }
    }
}

/// Translate a whole Hugo document into an Astro document.
///
/// Missing frontmatter is reported as a warning and the content passes
/// through unchanged.
pub fn translate_document(content: &str, opts: &TranslateOptions) -> Translation {
    let doc = parse(content);
    let Some(hugo) = doc.frontmatter else {
        warn!("no Hugo frontmatter found; passing content through unchanged");
        return Translation::Unchanged(content.to_string());
    };

    let frontmatter = translate(&hugo, opts);
    let content = serialize(&frontmatter, &doc.body);
    Translation::Converted { frontmatter, content }
}

/// Map Hugo fields onto the Astro content schema.
///
/// Fields are emitted in a fixed order: title, description, author,
/// publishDate, draft, type-specific fields, categories, tags, image.
/// Hugo fields with no Astro counterpart are dropped.
pub fn translate(hugo: &Frontmatter, opts: &TranslateOptions) -> Frontmatter {
    let mut astro = Frontmatter::new();

    for key in ["title", "description", "author"] {
        copy_field(hugo, &mut astro, key, key);
    }

    if let Some(date) = hugo.get("date").and_then(FrontmatterValue::as_str) {
        astro.insert("publishDate", FrontmatterValue::String(publish_date(date, &opts.tz_offset)));
    }

    let draft = hugo.get("draft").and_then(FrontmatterValue::as_bool).unwrap_or(false);
    astro.insert("draft", FrontmatterValue::Bool(draft));

    let extra: &[&str] = match opts.content_type {
        Some(ContentType::Elsewhere) | Some(ContentType::Quote) => &["sourceLink"],
        Some(ContentType::Imagery) => &["imageLink", "sourceLink", "sourceText"],
        _ => &[],
    };
    for key in extra {
        copy_field(hugo, &mut astro, key, key);
    }

    copy_field(hugo, &mut astro, "categories", "categories");
    copy_field(hugo, &mut astro, "tags", "tags");

    if let Some(image) = hugo.get_str("cover.image") {
        astro.insert(
            "image",
            FrontmatterValue::String(format!("{}{}", opts.cover_image_prefix, image)),
        );
    }

    debug!(from = hugo.len(), to = astro.len(), "translated frontmatter");
    astro
}

fn copy_field(from: &Frontmatter, to: &mut Frontmatter, src: &str, dst: &str) {
    if let Some(value) = from.get(src) {
        to.insert(dst, value.clone());
    }
}

/// Date-only values get midnight in the configured offset appended.
fn publish_date(raw: &str, tz_offset: &str) -> String {
    if raw.contains('T') || raw.len() != 10 {
        raw.to_string()
    } else {
        format!("{}T00:00:00{}", raw, tz_offset)
    }
}
