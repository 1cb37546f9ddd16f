use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use shellexpand::full;
use thiserror::Error;
use tracing::debug;

use crate::config::types::{
    ConfigFile, DEFAULT_OUTPUT_DIR, DEFAULT_REPORT_DIR, DEFAULT_TZ_OFFSET, LoggingConfig,
    Profile, ResolvedConfig,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("no profiles defined in config")]
    NoProfiles,

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("could not expand path '{0}'")]
    BadPath(String),
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(
        config_path: Option<&Path>,
        profile_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }
        if cf.profiles.is_empty() {
            return Err(ConfigError::NoProfiles);
        }

        let active = profile_override
            .map(ToOwned::to_owned)
            .or(cf.profile.clone())
            .unwrap_or_else(|| "default".to_string());

        let prof = cf
            .profiles
            .get(&active)
            .ok_or_else(|| ConfigError::ProfileNotFound(active.clone()))?;

        debug!(path = %path.display(), profile = %active, "loaded config");
        Self::resolve_profile(&active, prof, &cf.logging)
    }

    fn resolve_profile(
        active: &str,
        prof: &Profile,
        log_cfg: &LoggingConfig,
    ) -> Result<ResolvedConfig, ConfigError> {
        let project_root = expand_path(&prof.project_root)?;
        let sub = |s: &str| s.replace("{{project_root}}", &project_root.to_string_lossy());

        let hugo_content_dir = expand_path(&sub(&prof.hugo_content_dir))?;
        let output_dir =
            expand_path(&sub(prof.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)))?;
        let report_dir =
            expand_path(&sub(prof.report_dir.as_deref().unwrap_or(DEFAULT_REPORT_DIR)))?;

        let logging = match &log_cfg.file {
            Some(file) => LoggingConfig {
                file: Some(expand_path(&sub(&file.to_string_lossy()))?),
                ..log_cfg.clone()
            },
            None => log_cfg.clone(),
        };

        Ok(ResolvedConfig {
            active_profile: active.to_string(),
            project_root,
            hugo_content_dir,
            output_dir,
            report_dir,
            default_tz_offset: prof
                .default_tz_offset
                .clone()
                .unwrap_or_else(|| DEFAULT_TZ_OFFSET.to_string()),
            logging,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("sitemigrate").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("sitemigrate").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::BadPath(input.to_string()))?;
    Ok(PathBuf::from(expanded.to_string()))
}
