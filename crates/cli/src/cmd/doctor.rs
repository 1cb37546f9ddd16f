use sitemigrate_core::config::{ConfigLoader, default_config_path};
use std::path::Path;

use crate::logging;

pub fn run(config: Option<&Path>, profile: Option<&str>) {
    let rc = match ConfigLoader::load(config, profile) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL smig doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };
    logging::init(&rc.logging);
    tracing::debug!(profile = %rc.active_profile, "config resolved");

    let path = config.map_or_else(default_config_path, Path::to_path_buf);

    println!("OK   smig doctor");
    println!("path: {}", path.display());
    println!("profile: {}", rc.active_profile);
    println!("project_root: {}", rc.project_root.display());
    println!("hugo_content_dir: {}", rc.hugo_content_dir.display());
    println!("output_dir: {}", rc.output_dir.display());
    println!("report_dir: {}", rc.report_dir.display());
    println!("default_tz_offset: {}", rc.default_tz_offset);
    println!("posts_dir: {}", rc.posts_dir().display());
    println!("assets_dir: {}", rc.assets_dir().display());
    println!("new_content_dir: {}", rc.new_content_dir().display());
    println!("new_images_dir: {}", rc.new_images_dir().display());
    for (content_type, dir) in rc.content_dirs() {
        let marker = if dir.is_dir() { "" } else { "  (missing)" };
        println!("content.{}: {}{}", content_type, dir.display(), marker);
    }
}
