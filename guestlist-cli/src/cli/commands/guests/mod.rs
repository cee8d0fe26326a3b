//! `guestlist list`, `guestlist update`, `guestlist delete`

mod handler;

use clap::Args;
use uuid::Uuid;

use guestlist_cli::guests::{AsoebiStatus, RsvpStatus};

pub use handler::{handle_delete_command, handle_list_command, handle_update_command};

#[derive(Args)]
pub struct ListCommands {
    #[arg(short, long)]
    pub event: Uuid,
}

#[derive(Args)]
pub struct UpdateCommands {
    /// Guest id
    pub id: Uuid,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// pending, confirmed or declined
    #[arg(long, value_parser = parse_rsvp)]
    pub rsvp: Option<RsvpStatus>,

    /// not_ordered, ordered or delivered
    #[arg(long, value_parser = parse_asoebi)]
    pub asoebi: Option<AsoebiStatus>,
}

#[derive(Args)]
pub struct DeleteCommands {
    /// Guest id
    pub id: Uuid,
}

fn parse_rsvp(s: &str) -> Result<RsvpStatus, String> {
    RsvpStatus::parse(s).ok_or_else(|| format!("invalid RSVP status '{}'", s))
}

fn parse_asoebi(s: &str) -> Result<AsoebiStatus, String> {
    AsoebiStatus::parse(s).ok_or_else(|| format!("invalid asoebi status '{}'", s))
}
