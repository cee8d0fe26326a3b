//! `guestlist import`

mod handler;

use std::path::PathBuf;

use clap::Args;
use uuid::Uuid;

use guestlist_cli::import::ImportMode;

pub use handler::handle_import_command;

#[derive(Args)]
pub struct ImportCommands {
    /// Spreadsheet to import (.xlsx, .xls or .csv)
    pub file: PathBuf,

    /// Event the guests belong to
    #[arg(short, long)]
    pub event: Uuid,

    /// Failure policy; defaults to `default_mode` from the config
    #[arg(short, long, value_enum)]
    pub mode: Option<ImportMode>,

    /// Show what would be imported without saving anything
    #[arg(long)]
    pub dry_run: bool,
}
