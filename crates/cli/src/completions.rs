//! Dynamic value completers for shell completion.

use clap_complete::engine::CompletionCandidate;
use sitemigrate_core::ContentType;
use sitemigrate_core::config::{ConfigLoader, ResolvedConfig};
use sitemigrate_core::walker::find_hugo_content;
use std::ffi::OsStr;

/// Load the resolved config, returning None if it fails.
fn load_config() -> Option<ResolvedConfig> {
    ConfigLoader::load(None, None).ok()
}

/// Complete content type names.
pub fn complete_content_types(current: &OsStr) -> Vec<CompletionCandidate> {
    let current_str = current.to_str().unwrap_or("");

    [
        (ContentType::Posts, "Long-form posts"),
        (ContentType::Micro, "Short micro posts"),
        (ContentType::Elsewhere, "Curated external links"),
        (ContentType::Quote, "Quotes with attribution"),
        (ContentType::Imagery, "Image posts"),
    ]
    .into_iter()
    .filter(|(ct, _)| ct.as_str().starts_with(current_str))
    .map(|(ct, help)| CompletionCandidate::new(ct.as_str()).help(Some(help.into())))
    .collect()
}

/// Complete Hugo page bundle directories from the configured posts section.
pub fn complete_bundles(current: &OsStr) -> Vec<CompletionCandidate> {
    let current_str = current.to_str().unwrap_or("");
    let Some(cfg) = load_config() else {
        return Vec::new();
    };
    let Ok(files) = find_hugo_content(&cfg.hugo_dir(ContentType::Posts)) else {
        return Vec::new();
    };

    files
        .iter()
        .filter(|f| f.file_name().is_some_and(|n| n == "index.md"))
        .filter_map(|f| f.parent())
        .map(|dir| dir.to_string_lossy().into_owned())
        .filter(|dir| dir.starts_with(current_str))
        .take(100)
        .map(CompletionCandidate::new)
        .collect()
}
