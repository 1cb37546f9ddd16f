//! Whole-document Hugo to Astro conversion.
//!
//! [`PostConverter`] turns a Hugo page bundle into an Astro post plus its
//! asset directory. [`BatchConverter`] converts micro content in restartable
//! windows into a review directory.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::ResolvedConfig;
use crate::content_type::ContentType;
use crate::frontmatter::{TranslateOptions, translate_document};
use crate::shortcode::{ImportMode, convert_content};
use crate::walker::{WalkError, bundle_assets, find_hugo_content, hugo_slug};

/// Media copied out of a page bundle.
pub const MEDIA_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "gif", "mp4", "webm"];

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Hugo post not found at {0}")]
    BundleNotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {from} to {to}: {source}")]
    CopyError {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] WalkError),
}

#[derive(Debug, Clone)]
pub struct PostReport {
    pub source: PathBuf,
    pub post_path: PathBuf,
    pub assets_dir: PathBuf,
    pub shortcodes: usize,
    pub skipped_shortcodes: usize,
    /// Assets copied, or that would be copied on a dry run.
    pub assets: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Converts Hugo page bundles into Astro posts.
pub struct PostConverter {
    posts_dir: PathBuf,
    assets_dir: PathBuf,
    translate: TranslateOptions,
    dry_run: bool,
}

impl PostConverter {
    pub fn new(cfg: &ResolvedConfig, dry_run: bool) -> Self {
        Self {
            posts_dir: cfg.posts_dir(),
            assets_dir: cfg.assets_dir(),
            translate: TranslateOptions {
                content_type: Some(ContentType::Posts),
                tz_offset: cfg.default_tz_offset.clone(),
                ..TranslateOptions::default()
            },
            dry_run,
        }
    }

    /// Convert `<bundle_dir>/index.md` into `<posts_dir>/<post_name>.mdx` and
    /// copy the bundle's media into `<assets_dir>/<post_name>`.
    pub fn convert_post(&self, bundle_dir: &Path, post_name: &str) -> Result<PostReport, ConvertError> {
        let source = bundle_dir.join("index.md");
        if !source.is_file() {
            return Err(ConvertError::BundleNotFound(source));
        }

        let content = fs::read_to_string(&source)
            .map_err(|e| ConvertError::ReadError { path: source.clone(), source: e })?;

        let translated = translate_document(&content, &self.translate);
        let converted = convert_content(translated.content(), post_name, ImportMode::AllImages);

        let post_path = self.posts_dir.join(format!("{}.mdx", post_name));
        let assets_dir = self.assets_dir.join(post_name);
        let assets = bundle_assets(bundle_dir, &MEDIA_EXTENSIONS)?;

        let report = PostReport {
            source,
            post_path,
            assets_dir,
            shortcodes: converted.records.len(),
            skipped_shortcodes: converted.skipped,
            assets,
            dry_run: self.dry_run,
        };

        if self.dry_run {
            debug!(post = %report.post_path.display(), "dry run; nothing written");
            return Ok(report);
        }

        write(&report.post_path, &converted.content)?;
        fs::create_dir_all(&report.assets_dir)
            .map_err(|e| ConvertError::WriteError { path: report.assets_dir.clone(), source: e })?;
        for asset in &report.assets {
            let Some(name) = asset.file_name() else { continue };
            let target = report.assets_dir.join(name);
            fs::copy(asset, &target).map_err(|e| ConvertError::CopyError {
                from: asset.clone(),
                to: target.clone(),
                source: e,
            })?;
        }

        info!(
            post = %report.post_path.display(),
            shortcodes = report.shortcodes,
            assets = report.assets.len(),
            "converted post"
        );
        Ok(report)
    }
}

#[derive(Debug, Clone)]
pub struct BatchItem {
    pub source: PathBuf,
    pub slug: String,
    /// Output path, or the error text for a failed file.
    pub result: Result<PathBuf, String>,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub content_type: ContentType,
    /// Number of content files in the section.
    pub total: usize,
    pub start: usize,
    pub items: Vec<BatchItem>,
    pub output_dir: PathBuf,
    /// Start index of the following batch, if files remain.
    pub next_start: Option<usize>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_ok()).count()
    }
}

/// Converts Hugo micro content into a review directory, a window at a time.
pub struct BatchConverter {
    hugo_content_dir: PathBuf,
    output_dir: PathBuf,
    tz_offset: String,
}

impl BatchConverter {
    pub fn new(cfg: &ResolvedConfig) -> Self {
        Self {
            hugo_content_dir: cfg.hugo_content_dir.clone(),
            output_dir: cfg.output_dir.clone(),
            tz_offset: cfg.default_tz_offset.clone(),
        }
    }

    /// Convert files `[start_index, start_index + batch_size)` of a section
    /// into `<output_dir>/<type>/<slug>.mdx`.
    ///
    /// A file that fails is recorded and the batch continues.
    pub fn convert_batch(
        &self,
        content_type: ContentType,
        batch_size: usize,
        start_index: usize,
    ) -> Result<BatchReport, ConvertError> {
        let files = find_hugo_content(&self.hugo_content_dir.join(content_type.as_str()))?;
        let total = files.len();
        let end = start_index.saturating_add(batch_size).min(total);
        let output_dir = self.output_dir.join(content_type.as_str());

        let opts = TranslateOptions {
            content_type: Some(content_type),
            tz_offset: self.tz_offset.clone(),
            ..TranslateOptions::default()
        };

        info!(content_type = %content_type, total, start = start_index, end, "converting batch");

        let mut items = Vec::new();
        for source in files.iter().take(end).skip(start_index) {
            let slug = hugo_slug(source);
            let result = convert_one(source, &slug, &output_dir, &opts).map_err(|e| {
                error!(file = %source.display(), error = %e, "conversion failed");
                e.to_string()
            });
            items.push(BatchItem { source: source.clone(), slug, result });
        }

        Ok(BatchReport {
            content_type,
            total,
            start: start_index,
            items,
            output_dir,
            next_start: (end < total).then_some(end),
        })
    }
}

fn convert_one(
    source: &Path,
    slug: &str,
    output_dir: &Path,
    opts: &TranslateOptions,
) -> Result<PathBuf, ConvertError> {
    let content = fs::read_to_string(source)
        .map_err(|e| ConvertError::ReadError { path: source.to_path_buf(), source: e })?;

    let translated = translate_document(&content, opts);
    let converted = convert_content(translated.content(), slug, ImportMode::Used);

    let output = output_dir.join(format!("{}.mdx", slug));
    write(&output, &converted.content)?;
    debug!(from = %source.display(), to = %output.display(), "converted");
    Ok(output)
}

fn write(path: &Path, content: &str) -> Result<(), ConvertError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| ConvertError::WriteError { path: parent.to_path_buf(), source: e })?;
    }
    fs::write(path, content).map_err(|e| ConvertError::WriteError { path: path.to_path_buf(), source: e })
}
