//! Content file discovery.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("directory does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to walk directory {0}: {1}")]
    WalkError(String, #[source] walkdir::Error),
}

/// Files with `extension` directly inside `dir`, sorted by path.
///
/// Hidden files are skipped.
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, WalkError> {
    let mut files = Vec::new();
    for entry in shallow(dir)? {
        let entry = entry.map_err(|e| WalkError::WalkError(dir.display().to_string(), e))?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Hugo content files in a section directory: `<bundle>/index.md` for page
/// bundles plus loose `*.md` files, sorted by path.
///
/// The section's own `_index.md` list page is not content and is skipped.
pub fn find_hugo_content(dir: &Path) -> Result<Vec<PathBuf>, WalkError> {
    let mut files = Vec::new();
    for entry in shallow(dir)? {
        let entry = entry.map_err(|e| WalkError::WalkError(dir.display().to_string(), e))?;
        let path = entry.path();
        if entry.file_type().is_dir() {
            let index = path.join("index.md");
            if index.is_file() {
                files.push(index);
            }
        } else if has_extension(path, "md") && entry.file_name() != "_index.md" {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Non-hidden files directly inside a page bundle whose extension
/// (case-insensitive) is one of `extensions`, sorted by path.
pub fn bundle_assets(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, WalkError> {
    let mut files = Vec::new();
    for entry in shallow(dir)? {
        let entry = entry.map_err(|e| WalkError::WalkError(dir.display().to_string(), e))?;
        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)));
        if entry.file_type().is_file() && matches {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Slug of a Hugo content file: the bundle directory name for `index.md`,
/// otherwise the file stem.
pub fn hugo_slug(path: &Path) -> String {
    let name = if path.file_name().is_some_and(|n| n == "index.md") {
        path.parent().and_then(Path::file_name)
    } else {
        path.file_stem()
    };
    name.map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

fn shallow(dir: &Path) -> Result<impl Iterator<Item = walkdir::Result<DirEntry>>, WalkError> {
    if !dir.is_dir() {
        return Err(WalkError::MissingRoot(dir.display().to_string()));
    }
    Ok(WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_hidden(e)))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e == extension)
}
