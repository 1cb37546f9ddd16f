pub mod content_types;
pub mod convert_batch;
pub mod convert_post;
pub mod doctor;
pub mod frontmatter;
pub mod migrate;
pub mod patch_mdx;
pub mod shortcodes;
pub mod transcript;

use sitemigrate_core::config::{ConfigError, ConfigLoader, LoggingConfig, ResolvedConfig};
use std::path::Path;

use crate::logging;

/// Load the config and start logging, exiting on failure.
pub fn load_config(config: Option<&Path>, profile: Option<&str>) -> ResolvedConfig {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            logging::init(&rc.logging);
            rc
        }
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    }
}

/// Load the config for commands that can run without one.
///
/// A missing default config is fine; an explicit `--config` that cannot be
/// loaded, or a broken config file, is not.
pub fn load_optional_config(
    config: Option<&Path>,
    profile: Option<&str>,
) -> Option<ResolvedConfig> {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            logging::init(&rc.logging);
            Some(rc)
        }
        Err(ConfigError::NotFound(_)) if config.is_none() => {
            logging::init(&LoggingConfig::default());
            None
        }
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print an error and exit with status 1.
pub fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", msg);
    exit(1);
}

/// Flush the file log, then exit.
pub fn exit(code: i32) -> ! {
    logging::shutdown();
    std::process::exit(code);
}
