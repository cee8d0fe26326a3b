//! Export command handler

use anyhow::Result;
use colored::*;

use super::ExportCommands;
use crate::cli::{open_store, user_facing};
use guestlist_cli::api::GuestStore;
use guestlist_cli::config::Config;
use guestlist_cli::export::GuestExporter;
use guestlist_cli::guests::GuestCollection;

pub async fn handle_export_command(args: ExportCommands, config: &Config) -> Result<()> {
    if !args.output.is_dir() {
        anyhow::bail!("Output directory does not exist: {}", args.output.display());
    }

    let store = open_store(config)?;
    let guests = GuestCollection::from_records(
        store.list_guests(args.event).await.map_err(user_facing)?,
    );

    if guests.is_empty() {
        anyhow::bail!("No guests to export for event {}", args.event);
    }

    let path = GuestExporter::with_format(args.format)
        .export_to_dir(guests.guests(), args.event, &args.output)
        .await
        .map_err(user_facing)?;

    println!(
        "{} {} guests to {}",
        "Exported".green().bold(),
        guests.len(),
        path.display().to_string().bright_green()
    );
    Ok(())
}
