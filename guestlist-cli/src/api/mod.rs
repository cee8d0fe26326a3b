//! Backend access for guest records
//!
//! The pipeline only talks to the backend through [`GuestStore`]. The hosted
//! REST implementation lives in [`client`]; tests use the in-memory store.

pub mod client;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::guests::{GuestRecord, GuestUpdate};

pub use client::RestGuestStore;

/// Guest persistence offered by the backend
///
/// Every call either succeeds completely or returns an error; implementations
/// must not retry or partially apply a request.
#[async_trait]
pub trait GuestStore: Send + Sync {
    /// All guests of an event, oldest first
    async fn list_guests(&self, event_id: Uuid) -> Result<Vec<GuestRecord>>;

    /// Insert a batch in one request; returns the stored rows with server ids, in order
    async fn bulk_insert(&self, records: &[GuestRecord]) -> Result<Vec<GuestRecord>>;

    /// Apply a partial update to one guest and return the stored row
    async fn update_guest(&self, id: Uuid, update: &GuestUpdate) -> Result<GuestRecord>;

    async fn delete_guest(&self, id: Uuid) -> Result<()>;
}
