//! Import command handler

use anyhow::Result;
use colored::*;

use super::ImportCommands;
use crate::cli::{open_store, user_facing};
use guestlist_cli::api::GuestStore;
use guestlist_cli::config::Config;
use guestlist_cli::guests::{GuestCollection, GuestRecord, ImportStats, RowFailure};
use guestlist_cli::import::{GuestImporter, ImportMode, RowNormalizer, decode};

pub async fn handle_import_command(args: ImportCommands, config: &Config) -> Result<()> {
    let mode = args.mode.unwrap_or(config.default_mode);

    if !args.file.exists() {
        anyhow::bail!("File does not exist: {}", args.file.display());
    }

    println!(
        "Importing {} into event {} ({} mode)",
        args.file.display().to_string().cyan(),
        args.event.to_string().bright_green(),
        mode
    );

    if args.dry_run {
        return dry_run(&args, mode, config).await;
    }

    let store = open_store(config)?;
    let existing = store.list_guests(args.event).await.map_err(user_facing)?;
    let mut guests = GuestCollection::from_records(existing);
    let before = guests.len();

    let importer = GuestImporter::new(&store, mode, config.phone_formatter());
    let outcome = importer
        .import_file(&args.file, args.event, &mut guests)
        .await
        .map_err(user_facing)?;

    print_stats(&outcome.stats);
    print_failures(&outcome.failures);
    println!(
        "Event now has {} guests (was {})",
        guests.len().to_string().bold(),
        before
    );

    Ok(())
}

async fn dry_run(args: &ImportCommands, mode: ImportMode, config: &Config) -> Result<()> {
    let (bytes, format) = GuestImporter::read_file(&args.file).await.map_err(user_facing)?;
    let sheet = decode(&bytes, format).map_err(user_facing)?;
    let batch = RowNormalizer::new(mode, config.phone_formatter())
        .normalize_sheet(&sheet)
        .map_err(user_facing)?;

    for guest in &batch.records {
        print_guest(guest);
    }
    println!();
    print_stats(&batch.stats);
    print_failures(&batch.failures);
    println!("{}", "Dry run: nothing was saved".dimmed());

    Ok(())
}

fn print_guest(guest: &GuestRecord) {
    println!(
        "  {:<28} {:<16} {:<28} {}",
        guest.name,
        guest.phone.as_deref().unwrap_or("-"),
        guest.email.as_deref().unwrap_or("-"),
        guest.rsvp_status
    );
}

fn print_stats(stats: &ImportStats) {
    let failed = if stats.failed > 0 {
        stats.failed.to_string().red()
    } else {
        stats.failed.to_string().normal()
    };
    println!(
        "{} {} of {} guests ({} failed)",
        "Imported".green().bold(),
        stats.success,
        stats.total,
        failed
    );
}

fn print_failures(failures: &[RowFailure]) {
    for failure in failures {
        println!("  {} row {}: {}", "skipped".yellow(), failure.row, failure.reason);
    }
}
