//! Submit a normalized batch to the guest store

use chrono::Utc;
use uuid::Uuid;

use crate::api::GuestStore;
use crate::error::{GuestError, Result};
use crate::guests::GuestRecord;

/// Attaches the owning event to a batch and inserts it in one request
pub struct BulkPersister<'a> {
    store: &'a dyn GuestStore,
}

impl<'a> BulkPersister<'a> {
    pub fn new(store: &'a dyn GuestStore) -> Self {
        Self { store }
    }

    /// Insert `records` for `event_id` and return what the backend confirmed
    ///
    /// An empty batch never reaches the backend. A failed request is returned
    /// as-is; nothing is retried and no part of the batch is assumed saved.
    pub async fn persist(&self, event_id: Uuid, records: Vec<GuestRecord>) -> Result<Vec<GuestRecord>> {
        if records.is_empty() {
            log::debug!("Nothing to persist for event {}", event_id);
            return Ok(Vec::new());
        }

        let created_at = Utc::now();
        let batch: Vec<GuestRecord> = records
            .into_iter()
            .map(|mut record| {
                record.id = None;
                record.event_id = Some(event_id);
                record.created_at = Some(created_at);
                record
            })
            .collect();

        let submitted = batch.len();
        log::info!("Inserting {} guests for event {}", submitted, event_id);

        let confirmed = self.store.bulk_insert(&batch).await?;

        if confirmed.len() != submitted {
            return Err(GuestError::Persistence(format!(
                "backend confirmed {} of {} guests",
                confirmed.len(),
                submitted
            )));
        }
        if let Some(stray) = confirmed.iter().find(|g| g.event_id != Some(event_id)) {
            return Err(GuestError::Persistence(format!(
                "backend returned guest '{}' for a different event",
                stray.name
            )));
        }

        Ok(confirmed)
    }
}
