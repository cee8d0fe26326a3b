//! `guestlist export`

mod handler;

use std::path::PathBuf;

use clap::Args;
use uuid::Uuid;

use guestlist_cli::export::ExportFormat;

pub use handler::handle_export_command;

#[derive(Args)]
pub struct ExportCommands {
    /// Event whose guests are exported
    #[arg(short, long)]
    pub event: Uuid,

    #[arg(short, long, value_enum, default_value_t = ExportFormat::Xlsx)]
    pub format: ExportFormat,

    /// Directory to write `Event_<id>_Guests.<ext>` into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}
