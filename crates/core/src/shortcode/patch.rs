//! Patching MDX files that were converted before shortcode support.
//!
//! Early conversions dropped `{{< imgs >}}` shortcodes in one of two ways:
//! the shortcode vanished and left a run of blank lines behind, or it was
//! hand-replaced by a static `import x from '.../images/blog/...'` plus an
//! `<Image src={x} />` tag. The Hugo source still has the shortcodes, so
//! their conversions can be put back where the placeholders are.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::patterns::{
    BLANK_RUN_RE, IMAGE_COMPONENT_RE, STATIC_BLOG_IMPORT_LINE_RE, STATIC_BLOG_IMPORT_RE,
};
use crate::shortcode::detector::find_shortcodes;
use crate::shortcode::rewriter::{add_imports, convert_shortcode};
use crate::shortcode::types::{Component, ShortcodeError, ShortcodeKind};

/// Blank-line runs needed before an MDX file counts as having placeholders.
const MIN_BLANK_RUNS: usize = 4;

/// What the existing MDX file looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MdxStructure {
    pub has_static_imports: bool,
    pub has_image_components: bool,
    pub has_blank_placeholders: bool,
}

impl MdxStructure {
    pub fn detect(mdx: &str) -> Self {
        Self {
            has_static_imports: STATIC_BLOG_IMPORT_RE.is_match(mdx),
            has_image_components: IMAGE_COMPONENT_RE.is_match(mdx),
            has_blank_placeholders: BLANK_RUN_RE.find_iter(mdx).count() >= MIN_BLANK_RUNS,
        }
    }

    /// Replace `<Image>` tags when they are backed by static blog imports;
    /// otherwise fill blank-line placeholders.
    pub fn strategy(&self) -> PatchStrategy {
        if self.has_image_components && self.has_static_imports {
            PatchStrategy::ImageComponents
        } else {
            PatchStrategy::BlankLines
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStrategy {
    /// Swap `<Image src={x} />` for the conversion of the shortcode that
    /// showed the same file, then drop the unused imports.
    ImageComponents,
    /// Put conversions, in order, where two blank lines sit together.
    BlankLines,
}

impl fmt::Display for PatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchStrategy::ImageComponents => f.write_str("image component replacement"),
            PatchStrategy::BlankLines => f.write_str("blank line replacement"),
        }
    }
}

/// An `imgs` shortcode from the Hugo source and its component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchConversion {
    pub original: String,
    pub converted: String,
    /// First image of the shortcode, used to match `<Image>` imports.
    pub first_image: String,
}

/// Result of patching one MDX document.
#[derive(Debug, Clone)]
pub struct MdxPatch {
    pub content: String,
    pub structure: MdxStructure,
    pub strategy: PatchStrategy,
    pub conversions: Vec<PatchConversion>,
    /// Placeholders actually replaced.
    pub applied: usize,
}

/// Convert every usable `imgs` shortcode in the Hugo source, in order.
pub fn plan_patch(hugo: &str, post_dir: &str) -> Vec<PatchConversion> {
    find_shortcodes(hugo)
        .into_iter()
        .filter(|m| m.kind == ShortcodeKind::Imgs)
        .filter_map(|m| {
            let first_image = m
                .param("imgs")
                .and_then(|imgs| imgs.split(',').map(str::trim).find(|s| !s.is_empty()))
                .map(str::to_string);
            match (convert_shortcode(&m, post_dir), first_image) {
                (Some((converted, _)), Some(first_image)) => {
                    Some(PatchConversion { original: m.original, converted, first_image })
                }
                _ => {
                    warn!(shortcode = %m.original, "could not parse imgs parameter; skipping");
                    None
                }
            }
        })
        .collect()
}

/// Fill blank-line pairs with conversions, first pair first.
pub fn replace_blank_lines(mdx: &str, conversions: &[PatchConversion]) -> (String, usize) {
    let lines: Vec<&str> = mdx.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut pending = conversions.iter();
    let mut applied = 0;
    let mut i = 0;

    while i < lines.len() {
        let pair = lines[i].trim().is_empty()
            && lines.get(i + 1).is_some_and(|next| next.trim().is_empty());
        if pair && let Some(conversion) = pending.next() {
            out.extend(["", conversion.converted.as_str(), ""]);
            applied += 1;
            i += 2;
            continue;
        }
        out.push(lines[i]);
        i += 1;
    }

    (out.join("\n"), applied)
}

/// Replace `<Image src={x} />` tags whose import points at an image one of
/// the shortcodes showed first. Tags are replaced from last to first.
pub fn replace_image_components(mdx: &str, conversions: &[PatchConversion]) -> (String, usize) {
    let tags: Vec<(usize, usize, String)> = IMAGE_COMPONENT_RE
        .captures_iter(mdx)
        .filter_map(|c| {
            let whole = c.get(0)?;
            Some((whole.start(), whole.end(), c[1].trim().to_string()))
        })
        .collect();

    let mut out = mdx.to_string();
    let mut applied = 0;
    for (start, end, var) in tags.into_iter().rev() {
        let Some(file) = imported_file(mdx, &var) else {
            debug!(var = %var, "no static import for image component");
            continue;
        };
        if let Some(conversion) = conversions.iter().find(|c| c.first_image == file) {
            out.replace_range(start..end, &conversion.converted);
            applied += 1;
        }
    }
    (out, applied)
}

/// File name imported as `var`: `import var from '../images/blog/x/a.png'` gives `a.png`.
fn imported_file(mdx: &str, var: &str) -> Option<String> {
    let pattern = format!(r#"import\s+{}\s+from\s+['"][^'"]*/([^/'"]+)['"]"#, regex::escape(var));
    let re = Regex::new(&pattern).ok()?;
    re.captures(mdx).map(|c| c[1].to_string())
}

/// Drop static blog image imports whose identifier is no longer referenced
/// as `{name}`.
pub fn cleanup_unused_imports(content: &str) -> String {
    content
        .split('\n')
        .filter(|line| match STATIC_BLOG_IMPORT_LINE_RE.captures(line) {
            Some(c) => content.contains(&format!("{{{}}}", &c[1])),
            None => true,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Patch `mdx` with the conversions of the shortcodes in `hugo`.
pub fn patch_content(mdx: &str, hugo: &str, post_dir: &str) -> MdxPatch {
    let structure = MdxStructure::detect(mdx);
    let strategy = structure.strategy();
    let conversions = plan_patch(hugo, post_dir);

    if conversions.is_empty() {
        return MdxPatch { content: mdx.to_string(), structure, strategy, conversions, applied: 0 };
    }

    let (patched, applied) = match strategy {
        PatchStrategy::ImageComponents => {
            let (patched, applied) = replace_image_components(mdx, &conversions);
            (cleanup_unused_imports(&patched), applied)
        }
        PatchStrategy::BlankLines => replace_blank_lines(mdx, &conversions),
    };
    let content = add_imports(&patched, &[Component::SingleImage, Component::ImageGallery]);

    debug!(%strategy, found = conversions.len(), applied, "patched mdx");
    MdxPatch { content, structure, strategy, conversions, applied }
}

/// Patch the MDX file at `mdx_path` in place from its Hugo source.
///
/// Nothing is written for dry runs or when the source has no usable
/// shortcodes.
pub fn patch_file(
    mdx_path: &Path,
    hugo_path: &Path,
    post_dir: &str,
    dry_run: bool,
) -> Result<MdxPatch, ShortcodeError> {
    let mdx = read(mdx_path)?;
    let hugo = read(hugo_path)?;

    let patch = patch_content(&mdx, &hugo, post_dir);
    if !dry_run && !patch.conversions.is_empty() {
        fs::write(mdx_path, &patch.content)
            .map_err(|e| ShortcodeError::WriteError { path: mdx_path.to_path_buf(), source: e })?;
        info!(
            path = %mdx_path.display(),
            strategy = %patch.strategy,
            applied = patch.applied,
            "patched mdx file"
        );
    }
    Ok(patch)
}

fn read(path: &Path) -> Result<String, ShortcodeError> {
    if !path.exists() {
        return Err(ShortcodeError::NotFound(PathBuf::from(path)));
    }
    fs::read_to_string(path)
        .map_err(|e| ShortcodeError::ReadError { path: path.to_path_buf(), source: e })
}
