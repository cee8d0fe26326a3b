//! Row-level guest command handlers

use anyhow::Result;
use colored::*;

use super::{DeleteCommands, ListCommands, UpdateCommands};
use crate::cli::{open_store, user_facing};
use guestlist_cli::api::GuestStore;
use guestlist_cli::config::Config;
use guestlist_cli::guests::{GuestCollection, GuestUpdate};
use guestlist_cli::import::phone::looks_like_phone;

pub async fn handle_list_command(args: ListCommands, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    let guests = GuestCollection::from_records(
        store.list_guests(args.event).await.map_err(user_facing)?,
    );

    if guests.is_empty() {
        println!("No guests for event {}", args.event);
        return Ok(());
    }

    println!(
        "{:<36}  {:<28} {:<16} {:<10} {}",
        "ID".bold(),
        "Name".bold(),
        "Phone".bold(),
        "RSVP".bold(),
        "Asoebi".bold()
    );
    for guest in guests.guests() {
        let id = guest.id.map(|id| id.to_string()).unwrap_or_default();
        println!(
            "{:<36}  {:<28} {:<16} {:<10} {}",
            id.dimmed(),
            guest.name,
            guest.phone.as_deref().unwrap_or("-"),
            guest.rsvp_status,
            guest.asoebi_status
        );
    }
    println!("\n{} guests", guests.len());
    Ok(())
}

pub async fn handle_update_command(args: UpdateCommands, config: &Config) -> Result<()> {
    let phone = match args.phone {
        Some(raw) => {
            if !looks_like_phone(&raw) {
                anyhow::bail!("Not a phone number: {}", raw);
            }
            config.phone_formatter().canonicalize(&raw)
        }
        None => None,
    };

    let update = GuestUpdate {
        name: args.name.filter(|n| !n.trim().is_empty()),
        phone,
        email: args.email,
        location: args.location,
        rsvp_status: args.rsvp,
        asoebi_status: args.asoebi,
    };
    if update.is_empty() {
        anyhow::bail!("Nothing to update: pass at least one of --name, --phone, --email, --location, --rsvp, --asoebi");
    }

    let store = open_store(config)?;
    let guest = store.update_guest(args.id, &update).await.map_err(user_facing)?;

    println!(
        "{} {} (rsvp: {}, asoebi: {})",
        "Updated".green().bold(),
        guest.name,
        guest.rsvp_status,
        guest.asoebi_status
    );
    Ok(())
}

pub async fn handle_delete_command(args: DeleteCommands, config: &Config) -> Result<()> {
    let store = open_store(config)?;
    store.delete_guest(args.id).await.map_err(user_facing)?;
    println!("{} guest {}", "Deleted".green().bold(), args.id);
    Ok(())
}
