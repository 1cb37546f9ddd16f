use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use sitemigrate_core::config::ResolvedConfig;
use sitemigrate_core::migrate::{
    ContentMigrator, MigrationLayout, MigrationMap, MigrationStatus, load_map, rollback, save_map,
};
use std::io::IsTerminal;
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};

use super::{exit, fail, load_config};
use crate::MigrateArgs;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Type")]
    content_type: String,
    #[tabled(rename = "Migrated")]
    migrated: usize,
    #[tabled(rename = "Images")]
    images: usize,
    #[tabled(rename = "Errors")]
    errors: usize,
}

pub fn run(config: Option<&Path>, profile: Option<&str>, args: MigrateArgs) {
    let rc = load_config(config, profile);

    match &args.rollback {
        Some(map_path) => run_rollback(&rc, map_path, args.yes),
        None => run_migration(&rc, args.dry_run, args.limit),
    }
}

fn run_migration(rc: &ResolvedConfig, dry_run: bool, limit: Option<usize>) {
    let layout = MigrationLayout::from(rc);
    let report_dir = layout.report_dir.clone();

    println!("Content migration to unified structure");
    println!("Mode: {}", if dry_run { "DRY RUN" } else { "LIVE" });
    if let Some(limit) = limit {
        println!("Limit: {} file(s) per type", limit);
    }
    println!();

    let map = ContentMigrator::new(layout, dry_run, limit).run();

    print_summary(&map);

    match save_map(&map, &report_dir) {
        Ok(path) => println!("\nMigration map saved: {}", path.display()),
        Err(e) => fail(e),
    }

    if !map.errors.is_empty() {
        eprintln!("\nErrors: {}", map.errors.len());
        for error in map.errors.iter().take(5) {
            eprintln!("  - {}", error);
        }
        exit(1);
    }
}

fn print_summary(map: &MigrationMap) {
    let mut rows: Vec<SummaryRow> = Vec::new();
    for entry in &map.migrations {
        let name = entry.content_type.to_string();
        let idx = match rows.iter().position(|r| r.content_type == name) {
            Some(i) => i,
            None => {
                rows.push(SummaryRow { content_type: name, migrated: 0, images: 0, errors: 0 });
                rows.len() - 1
            }
        };
        let row = &mut rows[idx];
        match entry.status {
            MigrationStatus::Success => {
                row.migrated += 1;
                if entry.images_migrated {
                    row.images += 1;
                }
            }
            MigrationStatus::Error => row.errors += 1,
            MigrationStatus::Pending => {}
        }
    }

    if rows.is_empty() {
        println!("No content files found.");
        return;
    }

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{}", table);
    println!(
        "\n{} {} file(s)",
        if map.dry_run { "Would migrate" } else { "Migrated" },
        map.succeeded()
    );
}

fn run_rollback(rc: &ResolvedConfig, map_path: &Path, yes: bool) {
    let map = match load_map(map_path) {
        Ok(m) => m,
        Err(e) => fail(e),
    };

    println!(
        "Rollback of migration {}: {} successful entr{}",
        map.timestamp,
        map.succeeded(),
        if map.succeeded() == 1 { "y" } else { "ies" }
    );

    if !yes && !confirm_rollback() {
        println!("Cancelled.");
        return;
    }

    let report = rollback(&map, &rc.project_root);
    for (slug, e) in &report.failed {
        eprintln!("Error rolling back {}: {}", slug, e);
    }
    println!("Rolled back {} migration(s)", report.rolled_back.len());

    if !report.failed.is_empty() {
        exit(1);
    }
}

fn confirm_rollback() -> bool {
    if !std::io::stdin().is_terminal() {
        eprintln!("Refusing to roll back without a terminal; pass --yes to confirm.");
        return false;
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Remove the migrated files listed in this map?")
        .default(false)
        .interact()
        .unwrap_or(false)
}
