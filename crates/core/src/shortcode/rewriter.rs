//! Shortcode to component rewriting.
//!
//! Replacements are planned against the untouched document and then applied
//! from the highest start offset to the lowest, so applying one never shifts
//! the span of one still pending.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::patterns::YAML_FRONTMATTER_RE;
use crate::shortcode::detector::find_shortcodes;
use crate::shortcode::types::{
    Component, ConversionRecord, ImportMode, ShortcodeConversion, ShortcodeKind,
    ShortcodeMatch,
};

/// Size used when a shortcode has no `size` parameter.
pub const DEFAULT_SIZE: &str = "lg";

/// Build the component tag for one shortcode.
///
/// Returns `None` for an `imgs` shortcode without a usable `imgs` parameter;
/// such shortcodes are left in place.
pub fn convert_shortcode(m: &ShortcodeMatch, post_dir: &str) -> Option<(String, Component)> {
    match m.kind {
        ShortcodeKind::Permalink => {
            Some(("<PermalinkComponent />".to_string(), Component::Permalink))
        }
        ShortcodeKind::Imgs => {
            let images: Vec<&str> = m
                .param("imgs")?
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            let size = m.param("size").unwrap_or(DEFAULT_SIZE);

            match images.as_slice() {
                [] => None,
                [single] => Some((
                    format!(
                        r#"<SingleImage src="{}" alt="{}" size="{}" postDir="{}" />"#,
                        single,
                        alt_text_from_filename(single),
                        size,
                        post_dir
                    ),
                    Component::SingleImage,
                )),
                many => Some((
                    format!(
                        r#"<ImageGallery images={{['{}']}} alt="Gallery of {} images" size="{}" postDir="{}" />"#,
                        many.join("', '"),
                        many.len(),
                        size,
                        post_dir
                    ),
                    Component::ImageGallery,
                )),
            }
        }
    }
}

/// Derive alt text from an image filename.
///
/// `team_photo-2024.png` becomes `Team Photo 2024`.
pub fn alt_text_from_filename(name: &str) -> String {
    let stem = Path::new(name).file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    title_case(&stem.replace(['_', '-'], " "))
}

/// Uppercase the first letter of every run of letters, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

/// Plan replacements for every convertible shortcode, in document order.
///
/// Returns the records and the number of shortcodes left unconverted.
pub fn plan_conversions(content: &str, post_dir: &str) -> (Vec<ConversionRecord>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0;

    for m in find_shortcodes(content) {
        match convert_shortcode(&m, post_dir) {
            Some((replacement, component)) => records.push(ConversionRecord {
                start: m.start,
                end: m.end,
                original: m.original,
                replacement,
                component,
            }),
            None => {
                warn!(shortcode = %m.original, "could not parse imgs parameter; leaving as-is");
                skipped += 1;
            }
        }
    }

    (records, skipped)
}

/// Apply replacements back to front.
///
/// A record whose span no longer holds its original text is skipped with a
/// warning rather than corrupting the document.
pub fn apply_conversions(content: &str, records: &[ConversionRecord]) -> String {
    let mut ordered: Vec<&ConversionRecord> = records.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    let mut out = content.to_string();
    let mut last_start = usize::MAX;
    for record in ordered {
        if record.end > last_start {
            warn!(start = record.start, "overlapping replacement; skipping");
            continue;
        }
        if out.get(record.start..record.end) != Some(record.original.as_str()) {
            warn!(start = record.start, "replacement span does not match original text; skipping");
            continue;
        }
        out.replace_range(record.start..record.end, &record.replacement);
        last_start = record.start;
    }
    out
}

/// Add `import` lines for components not already imported.
///
/// Imports go right after the closing frontmatter delimiter, or at the top of
/// a document without frontmatter.
pub fn add_imports(content: &str, components: &[Component]) -> String {
    let wanted: BTreeSet<Component> = components.iter().copied().collect();
    let missing: Vec<String> = wanted
        .into_iter()
        .filter(|c| !content.contains(&format!("import {}", c.name())))
        .map(|c| c.import_line())
        .collect();

    if missing.is_empty() {
        return content.to_string();
    }

    let imports = missing.join("\n");
    match YAML_FRONTMATTER_RE.find(content) {
        Some(fm) => {
            let (head, tail) = content.split_at(fm.end());
            format!("{}\n\n{}{}", head, imports, tail)
        }
        None => format!("{}\n\n{}", imports, content),
    }
}

/// Convert every shortcode in `content` and add the needed imports.
pub fn convert_content(content: &str, post_dir: &str, mode: ImportMode) -> ShortcodeConversion {
    let (records, skipped) = plan_conversions(content, post_dir);
    if records.is_empty() {
        return ShortcodeConversion { content: content.to_string(), records, skipped };
    }

    let converted = apply_conversions(content, &records);

    let mut components: Vec<Component> = records.iter().map(|r| r.component).collect();
    if mode == ImportMode::AllImages {
        components.extend([Component::SingleImage, Component::ImageGallery]);
    }
    let content = add_imports(&converted, &components);

    debug!(converted = records.len(), skipped, "converted shortcodes");
    ShortcodeConversion { content, records, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcode::detector::parse_params;

    fn imgs(text: &str) -> ShortcodeMatch {
        ShortcodeMatch {
            kind: ShortcodeKind::Imgs,
            start: 0,
            end: text.len(),
            original: text.to_string(),
            params: parse_params(text),
        }
    }

    #[test]
    fn single_image_component() {
        let m = imgs(r#"{{< imgs size="md" imgs="my_cool-photo.png" >}}"#);
        let (tag, component) = convert_shortcode(&m, "my-post").unwrap();
        assert_eq!(component, Component::SingleImage);
        assert_eq!(
            tag,
            r#"<SingleImage src="my_cool-photo.png" alt="My Cool Photo" size="md" postDir="my-post" />"#
        );
    }

    #[test]
    fn gallery_component_with_default_size() {
        let m = imgs(r#"{{< imgs imgs="a.png, b.jpg,c.webp" >}}"#);
        let (tag, component) = convert_shortcode(&m, "p").unwrap();
        assert_eq!(component, Component::ImageGallery);
        assert_eq!(
            tag,
            r#"<ImageGallery images={['a.png', 'b.jpg', 'c.webp']} alt="Gallery of 3 images" size="lg" postDir="p" />"#
        );
    }

    #[test]
    fn missing_imgs_is_left_alone() {
        let m = imgs(r#"{{< imgs size="md" >}}"#);
        assert!(convert_shortcode(&m, "p").is_none());
    }

    #[test]
    fn alt_text_title_cases_like_words() {
        assert_eq!(alt_text_from_filename("IMG_0042.JPG"), "Img 0042");
        assert_eq!(alt_text_from_filename("dir/step2b-result.png"), "Step2B Result");
        assert_eq!(alt_text_from_filename("noext"), "Noext");
    }

    #[test]
    fn apply_replaces_all_matches() {
        let content = concat!(
            "---\ntitle: \"x\"\n---\n\n",
            "one {{< imgs imgs=\"a.png\" >}}\n",
            "two {{< imgs size=\"sm\" imgs=\"b.png,c.png\" >}}\n",
            "three {{< imgs imgs=\"d.png\" >}}\n"
        );
        let result = convert_content(content, "post", ImportMode::Used);

        assert_eq!(result.records.len(), 3);
        assert!(!result.content.contains("{{<"));
        for record in &result.records {
            assert!(result.content.contains(&record.replacement));
        }
        assert!(result.content.contains("import SingleImage"));
        assert!(result.content.contains("import ImageGallery"));
        assert!(!result.content.contains("import PermalinkComponent"));
    }

    #[test]
    fn stale_record_is_skipped() {
        let records = vec![ConversionRecord {
            start: 0,
            end: 3,
            original: "xyz".to_string(),
            replacement: "NEW".to_string(),
            component: Component::SingleImage,
        }];
        assert_eq!(apply_conversions("abc def", &records), "abc def");
    }

    #[test]
    fn imports_follow_frontmatter() {
        let content = "---\ntitle: \"x\"\n---\n\nBody";
        let out = add_imports(content, &[Component::SingleImage]);
        assert_eq!(
            out,
            "---\ntitle: \"x\"\n---\n\nimport SingleImage from '~/components/ui/SingleImage.astro';\n\nBody"
        );
    }

    #[test]
    fn existing_imports_not_duplicated() {
        let content = "---\nt: 1\n---\n\nimport SingleImage from '~/components/ui/SingleImage.astro';\n";
        assert_eq!(add_imports(content, &[Component::SingleImage]), content);
    }

    #[test]
    fn imports_without_frontmatter_go_first() {
        let out = add_imports("Body", &[Component::Permalink]);
        assert_eq!(
            out,
            "import PermalinkComponent from '~/components/ui/PermalinkComponent.astro';\n\nBody"
        );
    }

    #[test]
    fn all_images_mode_adds_both_imports() {
        let content = "---\nt: 1\n---\n\n{{< imgs imgs=\"a.png\" >}}";
        let result = convert_content(content, "p", ImportMode::AllImages);
        assert!(result.content.contains("import ImageGallery"));
    }

    #[test]
    fn nothing_to_convert_returns_input() {
        let content = "plain text";
        let result = convert_content(content, "p", ImportMode::AllImages);
        assert_eq!(result.content, content);
        assert!(result.records.is_empty());
    }
}
