//! In-memory guest list for one event

use std::collections::HashMap;

use uuid::Uuid;

use super::models::{GuestRecord, GuestUpdate};

/// Ordered guest list keyed by server-assigned id
///
/// Merging is monotonic: a confirmed record is inserted once, in the order it
/// was first seen, and later confirmations of the same id replace it in place.
/// Records without an id were never confirmed by the backend and are ignored.
#[derive(Debug, Clone, Default)]
pub struct GuestCollection {
    guests: Vec<GuestRecord>,
    index: HashMap<Uuid, usize>,
}

impl GuestCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from a backend listing
    pub fn from_records(records: Vec<GuestRecord>) -> Self {
        let mut collection = Self::new();
        collection.merge_confirmed(records);
        collection
    }

    /// Merge backend-confirmed records. Returns how many were new.
    pub fn merge_confirmed(&mut self, records: impl IntoIterator<Item = GuestRecord>) -> usize {
        let mut added = 0;
        for record in records {
            let Some(id) = record.id else {
                log::warn!("Ignoring unconfirmed guest '{}' (no server id)", record.name);
                continue;
            };

            match self.index.get(&id) {
                Some(&pos) => self.guests[pos] = record,
                None => {
                    self.index.insert(id, self.guests.len());
                    self.guests.push(record);
                    added += 1;
                }
            }
        }
        added
    }

    pub fn get(&self, id: Uuid) -> Option<&GuestRecord> {
        self.index.get(&id).map(|&pos| &self.guests[pos])
    }

    /// Apply a partial update locally; returns false when the id is unknown
    pub fn apply_update(&mut self, id: Uuid, update: &GuestUpdate) -> bool {
        match self.index.get(&id) {
            Some(&pos) => {
                update.apply_to(&mut self.guests[pos]);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<GuestRecord> {
        let pos = self.index.remove(&id)?;
        let removed = self.guests.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn guests(&self) -> &[GuestRecord] {
        &self.guests
    }

    pub fn len(&self) -> usize {
        self.guests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }
}
