//! Structural migration into the unified `content/<slug>/index.mdx` layout.
//!
//! Every attempt is recorded in a [`MigrationMap`] that is saved as JSON and
//! can be replayed backwards to undo a run.

mod types;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::config::ResolvedConfig;
use crate::content_type::ContentType;
use crate::walker::{WalkError, list_files};

pub use types::*;

/// Source and target directories of a migration.
#[derive(Debug, Clone)]
pub struct MigrationLayout {
    pub project_root: PathBuf,
    pub content_dirs: Vec<(ContentType, PathBuf)>,
    pub new_content_dir: PathBuf,
    pub legacy_image_dirs: Vec<PathBuf>,
    pub new_images_dir: PathBuf,
    pub report_dir: PathBuf,
}

impl From<&ResolvedConfig> for MigrationLayout {
    fn from(cfg: &ResolvedConfig) -> Self {
        Self {
            project_root: cfg.project_root.clone(),
            content_dirs: cfg.content_dirs(),
            new_content_dir: cfg.new_content_dir(),
            legacy_image_dirs: cfg.legacy_image_dirs(),
            new_images_dir: cfg.new_images_dir(),
            report_dir: cfg.report_dir.clone(),
        }
    }
}

pub struct ContentMigrator {
    layout: MigrationLayout,
    dry_run: bool,
    limit: Option<usize>,
    migrations: Vec<MigrationEntry>,
    errors: Vec<String>,
}

impl ContentMigrator {
    pub fn new(layout: MigrationLayout, dry_run: bool, limit: Option<usize>) -> Self {
        Self { layout, dry_run, limit, migrations: Vec::new(), errors: Vec::new() }
    }

    pub fn layout(&self) -> &MigrationLayout {
        &self.layout
    }

    /// Migrate every configured content type and return the resulting map.
    pub fn run(mut self) -> MigrationMap {
        info!(dry_run = self.dry_run, limit = ?self.limit, "starting content migration");

        let dirs = self.layout.content_dirs.clone();
        for (content_type, dir) in dirs {
            self.migrate_content_type(content_type, &dir);
        }

        let map = MigrationMap {
            timestamp: Local::now().format("%Y%m%d_%H%M%S").to_string(),
            dry_run: self.dry_run,
            limit: self.limit,
            migrations: self.migrations,
            errors: self.errors,
        };
        info!(succeeded = map.succeeded(), failed = map.failed(), "content migration finished");
        map
    }

    /// Migrate the `*.mdx` files of one content directory. Returns the number
    /// of successes.
    pub fn migrate_content_type(&mut self, content_type: ContentType, dir: &Path) -> usize {
        let mut files = match list_files(dir, "mdx") {
            Ok(files) => files,
            Err(WalkError::MissingRoot(d)) => {
                warn!(dir = %d, "content directory not found; skipping");
                return 0;
            }
            Err(e) => {
                error!(error = %e, "failed to list content directory");
                self.errors.push(e.to_string());
                return 0;
            }
        };
        if let Some(limit) = self.limit {
            files.truncate(limit);
        }

        info!(content_type = %content_type, files = files.len(), "migrating content type");
        files
            .iter()
            .filter(|file| self.migrate_file(file, content_type) == MigrationStatus::Success)
            .count()
    }

    /// Migrate one file, recording the attempt whatever the outcome.
    pub fn migrate_file(&mut self, old_path: &Path, content_type: ContentType) -> MigrationStatus {
        let slug = old_path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        let new_path = self.layout.new_content_dir.join(&slug).join("index.mdx");

        let mut entry = MigrationEntry {
            content_type,
            slug: slug.clone(),
            old_content_path: self.relative(old_path),
            new_content_path: self.relative(&new_path),
            old_images_path: None,
            new_images_path: None,
            images_migrated: false,
            status: MigrationStatus::Pending,
            error: None,
        };

        match self.copy_entry(old_path, &new_path, &mut entry) {
            Ok(()) => {
                entry.status = MigrationStatus::Success;
                debug!(slug = %slug, dry_run = self.dry_run, "migrated content");
            }
            Err(e) => {
                error!(slug = %slug, error = %e, "failed to migrate content");
                entry.status = MigrationStatus::Error;
                entry.error = Some(e.to_string());
                self.errors.push(format!("{}: {}", slug, e));
            }
        }

        let status = entry.status;
        self.migrations.push(entry);
        status
    }

    fn copy_entry(
        &self,
        old_path: &Path,
        new_path: &Path,
        entry: &mut MigrationEntry,
    ) -> Result<(), MigrateError> {
        if let Some(earlier) = self.migrations.iter().find(|m| {
            m.status == MigrationStatus::Success && m.new_content_path == entry.new_content_path
        }) {
            return Err(MigrateError::SlugTaken {
                slug: entry.slug.clone(),
                claimed_by: earlier.content_type,
            });
        }

        if !self.dry_run {
            if let Some(parent) = new_path.parent() {
                fs::create_dir_all(parent).map_err(|e| MigrateError::CreateError {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            fs::copy(old_path, new_path).map_err(|e| MigrateError::CopyError {
                from: old_path.to_path_buf(),
                to: new_path.to_path_buf(),
                source: e,
            })?;
        }

        if let Some(old_images) = self.images_dir(&entry.slug) {
            let new_images = self.layout.new_images_dir.join(&entry.slug);
            entry.old_images_path = Some(self.relative(&old_images));
            entry.new_images_path = Some(self.relative(&new_images));
            if !self.dry_run {
                copy_dir(&old_images, &new_images)?;
            }
            entry.images_migrated = true;
        }
        Ok(())
    }

    /// First legacy asset directory holding images for `slug`.
    fn images_dir(&self, slug: &str) -> Option<PathBuf> {
        self.layout.legacy_image_dirs.iter().map(|d| d.join(slug)).find(|d| d.is_dir())
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.layout.project_root).unwrap_or(path).to_path_buf()
    }
}

/// Save `map` as `migration_map_<timestamp>.json` in `report_dir`.
pub fn save_map(map: &MigrationMap, report_dir: &Path) -> Result<PathBuf, MigrateError> {
    fs::create_dir_all(report_dir)
        .map_err(|e| MigrateError::CreateError { path: report_dir.to_path_buf(), source: e })?;

    let path = report_dir.join(format!("migration_map_{}.json", map.timestamp));
    let json = serde_json::to_string_pretty(map).map_err(|e| MigrateError::WriteMap {
        path: path.clone(),
        source: std::io::Error::other(e),
    })?;
    fs::write(&path, json).map_err(|e| MigrateError::WriteMap { path: path.clone(), source: e })?;

    info!(path = %path.display(), "saved migration map");
    Ok(path)
}

pub fn load_map(path: &Path) -> Result<MigrationMap, MigrateError> {
    let s = fs::read_to_string(path)
        .map_err(|e| MigrateError::ReadMap { path: path.to_path_buf(), source: e })?;
    serde_json::from_str(&s).map_err(|e| MigrateError::ParseMap { path: path.to_path_buf(), source: e })
}

/// Undo the successful entries of `map`, newest first.
///
/// Entries that were not successful are left alone. Maps written by a dry
/// run describe nothing on disk and are ignored.
pub fn rollback(map: &MigrationMap, project_root: &Path) -> RollbackReport {
    let mut report = RollbackReport::default();
    if map.dry_run {
        warn!(timestamp = %map.timestamp, "migration map is from a dry run; nothing to roll back");
        return report;
    }

    for entry in map.migrations.iter().rev() {
        if entry.status != MigrationStatus::Success {
            continue;
        }
        match rollback_entry(entry, project_root) {
            Ok(()) => {
                debug!(slug = %entry.slug, "rolled back");
                report.rolled_back.push(entry.slug.clone());
            }
            Err(e) => {
                error!(slug = %entry.slug, error = %e, "failed to roll back");
                report.failed.push((entry.slug.clone(), e.to_string()));
            }
        }
    }

    info!(rolled_back = report.rolled_back.len(), failed = report.failed.len(), "rollback finished");
    report
}

fn rollback_entry(entry: &MigrationEntry, project_root: &Path) -> Result<(), MigrateError> {
    let content = project_root.join(&entry.new_content_path);
    if content.exists() {
        remove(&content, fs::remove_file(&content))?;
        if let Some(dir) = content.parent() {
            let empty = fs::read_dir(dir).map(|mut d| d.next().is_none()).unwrap_or(false);
            if empty {
                remove(dir, fs::remove_dir(dir))?;
            }
        }
    }

    if entry.images_migrated
        && let Some(images) = &entry.new_images_path
    {
        let images = project_root.join(images);
        if images.exists() {
            remove(&images, fs::remove_dir_all(&images))?;
        }
    }
    Ok(())
}

fn remove(path: &Path, result: std::io::Result<()>) -> Result<(), MigrateError> {
    result.map_err(|e| MigrateError::RemoveError { path: path.to_path_buf(), source: e })
}

/// Recursively copy `from` into `to`, merging with anything already there.
fn copy_dir(from: &Path, to: &Path) -> Result<(), MigrateError> {
    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry.map_err(|e| WalkError::WalkError(from.display().to_string(), e))?;
        let rel = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let target = to.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| MigrateError::CreateError { path: target.clone(), source: e })?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| MigrateError::CopyError {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                source: e,
            })?;
        }
    }
    Ok(())
}
