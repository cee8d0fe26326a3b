//! In-memory guest store for tests

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::GuestStore;
use crate::error::{GuestError, Result};
use crate::guests::{GuestRecord, GuestUpdate};

#[derive(Default)]
struct State {
    guests: Vec<GuestRecord>,
    insert_calls: usize,
    fail_next_insert: Option<GuestError>,
    unique_phones: bool,
}

/// Behaves like the hosted table: assigns ids, optionally enforces `(event_id, phone)` uniqueness
#[derive(Default)]
pub struct MemoryGuestStore {
    state: Mutex<State>,
}

impl MemoryGuestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unique_phones() -> Self {
        let store = Self::default();
        store.state.lock().unwrap().unique_phones = true;
        store
    }

    pub fn fail_next_insert(&self, err: GuestError) {
        self.state.lock().unwrap().fail_next_insert = Some(err);
    }

    pub fn insert_calls(&self) -> usize {
        self.state.lock().unwrap().insert_calls
    }

    pub fn stored(&self) -> Vec<GuestRecord> {
        self.state.lock().unwrap().guests.clone()
    }
}

#[async_trait]
impl GuestStore for MemoryGuestStore {
    async fn list_guests(&self, event_id: Uuid) -> Result<Vec<GuestRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .guests
            .iter()
            .filter(|g| g.event_id == Some(event_id))
            .cloned()
            .collect())
    }

    async fn bulk_insert(&self, records: &[GuestRecord]) -> Result<Vec<GuestRecord>> {
        let mut state = self.state.lock().unwrap();
        state.insert_calls += 1;

        if let Some(err) = state.fail_next_insert.take() {
            return Err(err);
        }

        if state.unique_phones {
            let mut seen: Vec<(Option<Uuid>, &str)> = state
                .guests
                .iter()
                .filter_map(|g| g.phone.as_deref().map(|p| (g.event_id, p)))
                .collect();
            for record in records {
                if let Some(phone) = record.phone.as_deref() {
                    if seen.contains(&(record.event_id, phone)) {
                        return Err(GuestError::Duplicate(format!(
                            "Key (event_id, phone)=({:?}, {}) already exists.",
                            record.event_id, phone
                        )));
                    }
                    seen.push((record.event_id, phone));
                }
            }
        }

        let inserted: Vec<GuestRecord> = records
            .iter()
            .cloned()
            .map(|mut record| {
                record.id = Some(Uuid::new_v4());
                record
            })
            .collect();
        state.guests.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn update_guest(&self, id: Uuid, update: &GuestUpdate) -> Result<GuestRecord> {
        let mut state = self.state.lock().unwrap();
        let guest = state
            .guests
            .iter_mut()
            .find(|g| g.id == Some(id))
            .ok_or_else(|| GuestError::Persistence(format!("guest {} not found", id)))?;
        update.apply_to(guest);
        Ok(guest.clone())
    }

    async fn delete_guest(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.guests.len();
        state.guests.retain(|g| g.id != Some(id));
        if state.guests.len() == before {
            return Err(GuestError::Persistence(format!("guest {} not found", id)));
        }
        Ok(())
    }
}
