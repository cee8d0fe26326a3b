//! Guest domain types

mod collection;
mod models;

pub use collection::GuestCollection;
pub use models::{
    AsoebiStatus, GuestRecord, GuestSource, GuestUpdate, ImportStats, RowFailure, RsvpStatus,
};
