//! Subcommand arguments and handlers

pub mod export;
pub mod guests;
pub mod import;
