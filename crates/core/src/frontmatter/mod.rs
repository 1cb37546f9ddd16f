//! Frontmatter parsing, translation, and serialization.
//!
//! This module provides functionality to:
//! - Parse Hugo `+++` frontmatter into an ordered field map
//! - Map Hugo fields onto the Astro content schema
//! - Serialize Astro `---` frontmatter
//! - Tag existing Astro documents with a `contentType`

pub mod modifier;
pub mod parser;
pub mod serializer;
pub mod translate;
pub mod types;

pub use modifier::{TagOutcome, add_content_type};
pub use parser::{parse, parse_value};
pub use serializer::{serialize, serialize_frontmatter, serialize_value};
pub use translate::{TranslateOptions, Translation, translate, translate_document};
pub use types::{Frontmatter, FrontmatterValue, ParsedDocument};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::content_type::ContentType;
use crate::walker::{WalkError, list_files};

#[derive(Debug, Error)]
pub enum FrontmatterError {
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

    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// Translate the Hugo document at `input`, writing the result to `output`
/// when given.
pub fn translate_file(
    input: &Path,
    output: Option<&Path>,
    opts: &TranslateOptions,
) -> Result<Translation, FrontmatterError> {
    let content = read(input)?;
    let translation = translate_document(&content, opts);
    if let Some(output) = output {
        write(output, translation.content())?;
        info!(input = %input.display(), output = %output.display(), "translated frontmatter");
    }
    Ok(translation)
}

/// Tag one file with `contentType: "<tag>"`, in place unless `dry_run`.
pub fn tag_file(path: &Path, tag: &str, dry_run: bool) -> Result<TagOutcome, FrontmatterError> {
    let content = read(path)?;
    let outcome = add_content_type(&content, tag);
    match &outcome {
        TagOutcome::Added(updated) if !dry_run => write(path, updated)?,
        TagOutcome::NoFrontmatter => warn!(path = %path.display(), "no frontmatter found"),
        _ => {}
    }
    Ok(outcome)
}

/// Per-file results of tagging content directories.
#[derive(Debug, Default)]
pub struct TagReport {
    pub tagged: Vec<(ContentType, PathBuf)>,
    pub already_tagged: Vec<PathBuf>,
    pub no_frontmatter: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Tag every `*.mdx` file in each content directory with the tag of its type.
///
/// Missing directories are skipped with a warning; a file that cannot be
/// read or written is recorded and the sweep continues.
pub fn tag_directories(dirs: &[(ContentType, PathBuf)], dry_run: bool) -> TagReport {
    let mut report = TagReport::default();
    for (content_type, dir) in dirs {
        let Some(tag) = content_type.content_type_tag() else {
            continue;
        };
        let files = match list_files(dir, "mdx") {
            Ok(files) => files,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping content directory");
                continue;
            }
        };
        for file in files {
            match tag_file(&file, tag, dry_run) {
                Ok(TagOutcome::Added(_)) => report.tagged.push((*content_type, file)),
                Ok(TagOutcome::AlreadyPresent) => report.already_tagged.push(file),
                Ok(TagOutcome::NoFrontmatter) => report.no_frontmatter.push(file),
                Err(e) => report.failed.push((file, e.to_string())),
            }
        }
    }
    info!(tagged = report.tagged.len(), dry_run, "tagged content types");
    report
}

fn read(path: &Path) -> Result<String, FrontmatterError> {
    fs::read_to_string(path)
        .map_err(|e| FrontmatterError::ReadError { path: path.to_path_buf(), source: e })
}

fn write(path: &Path, content: &str) -> Result<(), FrontmatterError> {
    let result = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => fs::create_dir_all(parent).and_then(|()| fs::write(path, content)),
        None => fs::write(path, content),
    };
    result.map_err(|e| FrontmatterError::WriteError { path: path.to_path_buf(), source: e })
}
