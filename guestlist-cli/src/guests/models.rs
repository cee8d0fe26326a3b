//! Guest record types shared by the import pipeline, the exporter and the backend client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// RSVP state of a guest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Confirmed => "confirmed",
            RsvpStatus::Declined => "declined",
        }
    }

    /// Parse a spreadsheet or CLI value, tolerant of case and spacing
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_token(s).as_str() {
            "pending" => Some(RsvpStatus::Pending),
            "confirmed" => Some(RsvpStatus::Confirmed),
            "declined" => Some(RsvpStatus::Declined),
            _ => None,
        }
    }
}

impl std::fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asoebi (matching outfit) order state of a guest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsoebiStatus {
    #[default]
    NotOrdered,
    Ordered,
    Delivered,
}

impl AsoebiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AsoebiStatus::NotOrdered => "not_ordered",
            AsoebiStatus::Ordered => "ordered",
            AsoebiStatus::Delivered => "delivered",
        }
    }

    /// Parse a spreadsheet or CLI value, tolerant of case and spacing
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_token(s).as_str() {
            "not_ordered" => Some(AsoebiStatus::NotOrdered),
            "ordered" => Some(AsoebiStatus::Ordered),
            "delivered" => Some(AsoebiStatus::Delivered),
            _ => None,
        }
    }
}

impl std::fmt::Display for AsoebiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "Not Ordered", "not-ordered" and "NOT_ORDERED" all become "not_ordered"
fn normalize_token(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Where a guest record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestSource {
    ExcelImport,
    WhatsappImport,
}

/// A guest attached to an event
///
/// Records produced by the normalizer have no `id`, `event_id` or `created_at`;
/// the persister and the backend fill those in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub rsvp_status: RsvpStatus,
    #[serde(default)]
    pub asoebi_status: AsoebiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<GuestSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl GuestRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            event_id: None,
            name: name.into(),
            phone: None,
            email: None,
            location: None,
            rsvp_status: RsvpStatus::default(),
            asoebi_status: AsoebiStatus::default(),
            source: None,
            created_at: None,
        }
    }
}

/// Partial update for a single guest (row-level status edits)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GuestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsvp_status: Option<RsvpStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asoebi_status: Option<AsoebiStatus>,
}

impl GuestUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.location.is_none()
            && self.rsvp_status.is_none()
            && self.asoebi_status.is_none()
    }

    /// Apply the populated fields to a record in place
    pub fn apply_to(&self, record: &mut GuestRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            record.phone = Some(phone.clone());
        }
        if let Some(email) = &self.email {
            record.email = Some(email.clone());
        }
        if let Some(location) = &self.location {
            record.location = Some(location.clone());
        }
        if let Some(rsvp) = self.rsvp_status {
            record.rsvp_status = rsvp;
        }
        if let Some(asoebi) = self.asoebi_status {
            record.asoebi_status = asoebi;
        }
    }
}

/// Outcome tally of one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

impl ImportStats {
    pub fn record_success(&mut self) {
        self.success += 1;
        self.total += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
        self.total += 1;
    }
}

/// A row that was counted as failed during a best-effort import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// 1-based row number in the sheet
    pub row: usize,
    pub reason: String,
}
