//! Hugo shortcode conversion.
//!
//! Turns `{{< imgs >}}` and `{{< permalink >}}` shortcodes into the Astro
//! `SingleImage`, `ImageGallery` and `PermalinkComponent` components and adds
//! the matching imports.

mod detector;
mod patch;
mod rewriter;
mod types;

use std::fs;
use std::path::Path;

use tracing::info;

pub use detector::{find_shortcodes, parse_params};
pub use patch::{
    MdxPatch, MdxStructure, PatchConversion, PatchStrategy, cleanup_unused_imports, patch_content,
    patch_file, plan_patch, replace_blank_lines, replace_image_components,
};
pub use rewriter::{
    DEFAULT_SIZE, add_imports, alt_text_from_filename, apply_conversions, convert_content,
    convert_shortcode, plan_conversions,
};
pub use types::*;

/// Convert all shortcodes in a file in place.
///
/// With `dry_run` the planned conversions are returned but nothing is
/// written.
pub fn convert_file(
    path: &Path,
    post_dir: &str,
    dry_run: bool,
) -> Result<FileConversion, ShortcodeError> {
    if !path.exists() {
        return Err(ShortcodeError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ShortcodeError::ReadError { path: path.to_path_buf(), source: e })?;

    let conversion = convert_content(&content, post_dir, ImportMode::Used);
    let written = !dry_run && !conversion.records.is_empty();

    if written {
        fs::write(path, &conversion.content)
            .map_err(|e| ShortcodeError::WriteError { path: path.to_path_buf(), source: e })?;
        info!(
            path = %path.display(),
            converted = conversion.records.len(),
            "converted shortcodes"
        );
    }

    Ok(FileConversion {
        path: path.to_path_buf(),
        records: conversion.records,
        skipped: conversion.skipped,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn convert_file_writes_in_place() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("post.mdx");
        fs::write(&path, "---\ntitle: \"x\"\n---\n\n{{< imgs imgs=\"a.png\" >}}\n").unwrap();

        let result = convert_file(&path, "post", false).unwrap();
        assert!(result.written);
        assert_eq!(result.records.len(), 1);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("<SingleImage src=\"a.png\""));
        assert!(written.contains("import SingleImage"));
    }

    #[test]
    fn dry_run_leaves_file_untouched() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("post.mdx");
        let original = "{{< imgs imgs=\"a.png,b.png\" >}}";
        fs::write(&path, original).unwrap();

        let result = convert_file(&path, "post", true).unwrap();
        assert!(!result.written);
        assert_eq!(result.records[0].component, Component::ImageGallery);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempdir().unwrap();
        let err = convert_file(&tmp.path().join("nope.mdx"), "p", false).unwrap_err();
        assert!(matches!(err, ShortcodeError::NotFound(_)));
    }
}
