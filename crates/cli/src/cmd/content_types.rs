use sitemigrate_core::frontmatter::tag_directories;
use std::path::Path;

use super::{exit, load_config};
use crate::ContentTypesArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: ContentTypesArgs) {
    let rc = load_config(config, profile);

    let report = tag_directories(&rc.content_dirs(), args.dry_run);

    let verb = if args.dry_run { "Would tag" } else { "Tagged" };
    for (content_type, path) in &report.tagged {
        let tag = content_type.content_type_tag().unwrap_or_default();
        println!("{} {} -> contentType: \"{}\"", verb, display(path, &rc.project_root), tag);
    }
    for path in &report.already_tagged {
        println!("Skipped {} (already has contentType)", display(path, &rc.project_root));
    }
    for path in &report.no_frontmatter {
        eprintln!("No frontmatter: {}", display(path, &rc.project_root));
    }
    for (path, e) in &report.failed {
        eprintln!("Error: {}: {}", display(path, &rc.project_root), e);
    }

    println!();
    println!("{} {} file(s)", verb, report.tagged.len());
    if args.dry_run {
        println!("(dry-run mode - no changes made)");
    }

    if !report.failed.is_empty() {
        exit(1);
    }
}

fn display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
