use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content_type::ContentType;
use crate::walker::WalkError;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("failed to create {path}: {source}")]
    CreateError {
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

    #[error("failed to remove {path}: {source}")]
    RemoveError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read migration map {path}: {source}")]
    ReadMap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse migration map {path}: {source}")]
    ParseMap {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write migration map {path}: {source}")]
    WriteMap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("slug '{slug}' was already migrated from {claimed_by} in this run")]
    SlugTaken { slug: String, claimed_by: ContentType },

    #[error(transparent)]
    Walk(#[from] WalkError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationStatus {
    Pending,
    Success,
    Error,
}

/// One attempted file migration. Paths are relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationEntry {
    pub content_type: ContentType,
    pub slug: String,
    pub old_content_path: PathBuf,
    pub new_content_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_images_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_images_path: Option<PathBuf>,
    pub images_migrated: bool,
    pub status: MigrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Record of one migration run, saved for review and rollback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationMap {
    pub timestamp: String,
    pub dry_run: bool,
    #[serde(default)]
    pub limit: Option<usize>,
    pub migrations: Vec<MigrationEntry>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl MigrationMap {
    pub fn succeeded(&self) -> usize {
        self.count(MigrationStatus::Success)
    }

    pub fn failed(&self) -> usize {
        self.count(MigrationStatus::Error)
    }

    fn count(&self, status: MigrationStatus) -> usize {
        self.migrations.iter().filter(|m| m.status == status).count()
    }
}

#[derive(Debug, Default)]
pub struct RollbackReport {
    /// Slugs whose outputs were removed.
    pub rolled_back: Vec<String>,
    /// Slugs that could not be rolled back, with the reason.
    pub failed: Vec<(String, String)>,
}
