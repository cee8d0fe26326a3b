//! Guest list import/export for events
//!
//! Reads guest spreadsheets (xlsx, xls, csv), normalizes contact rows into
//! [`guests::GuestRecord`]s, stores them through a [`api::GuestStore`] and
//! writes the list back out as a spreadsheet.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod guests;
pub mod import;

pub use error::{GuestError, Result};
