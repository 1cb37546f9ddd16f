use sitemigrate_core::convert::BatchConverter;
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};

use super::{exit, fail, load_config};
use crate::ConvertBatchArgs;

#[derive(Tabled)]
struct BatchRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Result")]
    result: String,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: ConvertBatchArgs) {
    let rc = load_config(config, profile);

    let converter = BatchConverter::new(&rc);
    let report = match converter.convert_batch(args.content_type, args.batch_size, args.start_index) {
        Ok(r) => r,
        Err(e) => fail(e),
    };

    if report.items.is_empty() {
        println!(
            "All {} files processed (start index {} >= {})",
            report.content_type, report.start, report.total
        );
        return;
    }

    let rows: Vec<BatchRow> = report
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| BatchRow {
            index: report.start + i + 1,
            slug: item.slug.clone(),
            result: match &item.result {
                Ok(path) => format!("ok -> {}", path.display()),
                Err(e) => format!("FAILED: {}", e),
            },
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{}", table);
    println!();
    println!("Converted {}/{} ({} total)", report.succeeded(), report.items.len(), report.total);
    println!("Output directory: {}", report.output_dir.display());
    if let Some(next) = report.next_start {
        println!("Next batch: --start-index {}", next);
    }

    if report.succeeded() < report.items.len() {
        exit(1);
    }
}
