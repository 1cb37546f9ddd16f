use sitemigrate_core::convert::PostConverter;
use std::path::Path;

use super::{fail, load_config};
use crate::ConvertPostArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: ConvertPostArgs) {
    let rc = load_config(config, profile);

    let converter = PostConverter::new(&rc, args.dry_run);
    let report = match converter.convert_post(&args.bundle_dir, &args.post_name) {
        Ok(r) => r,
        Err(e) => fail(e),
    };

    if report.dry_run {
        println!("DRY RUN - would create:");
        println!("  Post:   {}", report.post_path.display());
        println!("  Assets: {} ({} files)", report.assets_dir.display(), report.assets.len());
        println!("  Shortcode conversions: {}", report.shortcodes);
        return;
    }

    println!("Created: {}", report.post_path.display());
    println!("Copied {} asset file(s) to: {}", report.assets.len(), report.assets_dir.display());
    println!("Converted {} shortcode(s)", report.shortcodes);
    if report.skipped_shortcodes > 0 {
        eprintln!("Left {} shortcode(s) unconverted", report.skipped_shortcodes);
    }
}
