//! Core library for sitemigrate.
//!
//! Converts Hugo content (TOML frontmatter, `{{< imgs >}}` shortcodes, page
//! bundles) into the Astro layout, reorganizes the content tree by slug, and
//! turns exported AI chat transcripts into TypeScript string modules.

pub mod config;
pub mod content_type;
pub mod convert;
pub mod frontmatter;
pub mod migrate;
pub mod patterns;
pub mod shortcode;
pub mod transcript;
pub mod walker;

pub use content_type::ContentType;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
