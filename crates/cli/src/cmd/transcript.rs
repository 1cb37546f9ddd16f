use sitemigrate_core::transcript::{TranscriptOptions, convert_file};
use std::path::Path;

use super::{fail, load_optional_config};
use crate::TranscriptArgs;

pub fn run(config: Option<&Path>, profile: Option<&str>, args: TranscriptArgs) {
    load_optional_config(config, profile);

    let opts = TranscriptOptions { export_name: args.export_name, format: args.format.dialect() };
    let module = match convert_file(&args.input, &args.output, &opts) {
        Ok(m) => m,
        Err(e) => fail(e),
    };

    println!("Converted {} transcript", module.dialect.source_name());
    println!("  Format: {}", module.dialect);
    println!("  Export: {}", module.export_name);
    println!("  Output: {}", args.output.display());
}
