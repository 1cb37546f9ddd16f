use sitemigrate_core::frontmatter::{TranslateOptions, Translation, translate_file};
use std::path::Path;

use super::{fail, load_optional_config};
use crate::FrontmatterArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: FrontmatterArgs) {
    let rc = load_optional_config(config, profile);

    let mut opts = TranslateOptions { content_type: args.content_type, ..TranslateOptions::default() };
    if let Some(rc) = &rc {
        opts.tz_offset = rc.default_tz_offset.clone();
    }

    let translation = match translate_file(&args.file, args.output.as_deref(), &opts) {
        Ok(t) => t,
        Err(e) => fail(e),
    };

    match (&translation, &args.output) {
        (Translation::Unchanged(_), _) => {
            eprintln!("No Hugo frontmatter found in {}; content unchanged.", args.file.display());
        }
        (Translation::Converted { frontmatter, .. }, Some(output)) => {
            println!("Wrote {} ({} fields)", output.display(), frontmatter.len());
        }
        (Translation::Converted { .. }, None) => {}
    }

    if args.output.is_none() {
        print!("{}", translation.content());
    }
}
