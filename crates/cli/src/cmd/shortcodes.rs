use sitemigrate_core::shortcode::convert_file;
use std::path::Path;

use super::{fail, load_optional_config};
use crate::ShortcodesArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: ShortcodesArgs) {
    load_optional_config(config, profile);

    let result = match convert_file(&args.file, &args.post_dir, args.dry_run) {
        Ok(r) => r,
        Err(e) => fail(e),
    };

    if result.records.is_empty() {
        println!("No shortcodes to convert in {}", args.file.display());
    } else if args.dry_run {
        println!("Would convert {} shortcode(s):", result.records.len());
        for record in &result.records {
            println!();
            println!("  - {}", record.original);
            println!("  + {}", record.replacement);
        }
        println!();
        println!("(dry-run mode - no changes made)");
    } else {
        println!("Converted {} shortcode(s) in {}", result.records.len(), args.file.display());
    }

    if result.skipped > 0 {
        eprintln!("Left {} shortcode(s) unconverted (missing imgs parameter)", result.skipped);
    }
}
