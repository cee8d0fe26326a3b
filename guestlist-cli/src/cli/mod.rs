//! Command-line interface

pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::export::ExportCommands;
use commands::guests::{DeleteCommands, ListCommands, UpdateCommands};
use commands::import::ImportCommands;
use guestlist_cli::GuestError;
use guestlist_cli::api::RestGuestStore;
use guestlist_cli::config::Config;

#[derive(Parser)]
#[command(name = "guestlist", version, about = "Import and export event guest lists")]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import guests from a spreadsheet (.xlsx, .xls, .csv) into an event
    Import(ImportCommands),
    /// Export an event's guests to a spreadsheet
    Export(ExportCommands),
    /// List an event's guests
    List(ListCommands),
    /// Update one guest's details or status
    Update(UpdateCommands),
    /// Delete one guest
    Delete(DeleteCommands),
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Import(args) => commands::import::handle_import_command(args, &config).await,
        Commands::Export(args) => commands::export::handle_export_command(args, &config).await,
        Commands::List(args) => commands::guests::handle_list_command(args, &config).await,
        Commands::Update(args) => commands::guests::handle_update_command(args, &config).await,
        Commands::Delete(args) => commands::guests::handle_delete_command(args, &config).await,
    }
}

/// Backend client built from the loaded config
pub fn open_store(config: &Config) -> Result<RestGuestStore> {
    Ok(RestGuestStore::new(&config.backend()?))
}

/// Turn a pipeline error into the one-line message the user sees
pub fn user_facing(err: GuestError) -> anyhow::Error {
    log::debug!("{:?}", err);
    anyhow::anyhow!(err.user_message())
}
