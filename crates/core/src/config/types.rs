use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::content_type::ContentType;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    /// Root of the Astro project being migrated into.
    pub project_root: String,
    /// Hugo `content/` directory holding the source posts and micro content.
    pub hugo_content_dir: String,
    /// Where batch conversions write their `.mdx` output.
    pub output_dir: Option<String>,
    /// Where migration maps are saved. Defaults to `{{project_root}}/docs/issues`.
    pub report_dir: Option<String>,
    /// Offset appended to date-only `publishDate` values.
    pub default_tz_offset: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub const DEFAULT_OUTPUT_DIR: &str = "/tmp/micro-migration";
pub const DEFAULT_REPORT_DIR: &str = "{{project_root}}/docs/issues";
pub const DEFAULT_TZ_OFFSET: &str = "-05:00";

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub project_root: PathBuf,
    pub hugo_content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub report_dir: PathBuf,
    pub default_tz_offset: String,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    /// Defaults for a project rooted at `project_root` with Hugo content under
    /// `hugo_content_dir`.
    pub fn for_project(project_root: &Path, hugo_content_dir: &Path) -> Self {
        Self {
            active_profile: "default".to_string(),
            project_root: project_root.to_path_buf(),
            hugo_content_dir: hugo_content_dir.to_path_buf(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            report_dir: project_root.join("docs").join("issues"),
            default_tz_offset: DEFAULT_TZ_OFFSET.to_string(),
            logging: LoggingConfig::default(),
        }
    }

    fn data_dir(&self) -> PathBuf {
        self.project_root.join("src").join("data")
    }

    fn images_root(&self) -> PathBuf {
        self.project_root.join("src").join("assets").join("images")
    }

    /// Converted long-form posts.
    pub fn posts_dir(&self) -> PathBuf {
        self.data_dir().join("posts")
    }

    /// Per-post image directories for converted posts.
    pub fn assets_dir(&self) -> PathBuf {
        self.images_root().join("blog")
    }

    /// Astro collection directory for one content type.
    pub fn content_dir(&self, content_type: ContentType) -> PathBuf {
        self.data_dir().join(content_type.as_str())
    }

    /// Collection directories in migration order.
    pub fn content_dirs(&self) -> Vec<(ContentType, PathBuf)> {
        ContentType::ASTRO_SECTIONS
            .into_iter()
            .map(|ct| (ct, self.content_dir(ct)))
            .collect()
    }

    /// Unified `content/<slug>/index.mdx` tree.
    pub fn new_content_dir(&self) -> PathBuf {
        self.data_dir().join("content")
    }

    /// Asset roots searched, in order, for a slug's image directory.
    pub fn legacy_image_dirs(&self) -> Vec<PathBuf> {
        ["blog", "micro", "elsewhere"].iter().map(|d| self.images_root().join(d)).collect()
    }

    pub fn new_images_dir(&self) -> PathBuf {
        self.images_root().join("content")
    }

    /// Hugo source directory for one content type.
    pub fn hugo_dir(&self, content_type: ContentType) -> PathBuf {
        self.hugo_content_dir.join(content_type.as_str())
    }
}
