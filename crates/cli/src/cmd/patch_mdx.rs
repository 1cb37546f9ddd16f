use sitemigrate_core::shortcode::patch_file;
use std::path::Path;

use super::{fail, load_optional_config};
use crate::PatchMdxArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: PatchMdxArgs) {
    load_optional_config(config, profile);

    let patch = match patch_file(&args.mdx, &args.hugo_source, &args.post_dir, args.dry_run) {
        Ok(p) => p,
        Err(e) => fail(e),
    };

    if patch.conversions.is_empty() {
        println!("No Hugo shortcodes found in {}", args.hugo_source.display());
        return;
    }

    println!("Strategy: {}", patch.strategy);
    if args.dry_run {
        println!("Would insert {} of {} component(s):", patch.applied, patch.conversions.len());
        for conversion in &patch.conversions {
            println!();
            println!("  - {}", conversion.original);
            println!("  + {}", conversion.converted);
        }
        println!();
        println!("(dry-run mode - no changes made)");
    } else {
        println!(
            "Patched {} with {} converted component(s)",
            args.mdx.display(),
            patch.applied
        );
    }

    if patch.applied < patch.conversions.len() {
        eprintln!(
            "No placeholder found for {} shortcode(s)",
            patch.conversions.len() - patch.applied
        );
    }
}
