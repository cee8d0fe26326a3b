//! Turn raw sheet rows into guest records
//!
//! Handles both import flavours with one code path:
//! - [`ImportMode::Strict`]: generic spreadsheet import. Every non-empty row
//!   must carry a name; one bad row rejects the whole batch.
//! - [`ImportMode::BestEffort`]: contact exports (WhatsApp style). Names are
//!   synthesized when missing, rows without a usable phone are counted as
//!   failed and dropped, the rest go through.

use std::collections::HashMap;

use serde::Deserialize;

use super::decoder::{Cell, Row, Sheet};
use super::phone::{PhoneFormatter, looks_like_phone};
use crate::error::{GuestError, Result};
use crate::guests::{AsoebiStatus, GuestRecord, GuestSource, ImportStats, RowFailure, RsvpStatus};

/// Failure policy for an import run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ImportMode {
    /// Fail fast: a row without a name aborts the import
    Strict,
    /// Count and continue: rows without a phone are skipped and reported
    #[default]
    BestEffort,
}

impl ImportMode {
    pub fn source(&self) -> GuestSource {
        match self {
            ImportMode::Strict => GuestSource::ExcelImport,
            ImportMode::BestEffort => GuestSource::WhatsappImport,
        }
    }
}

impl std::fmt::Display for ImportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportMode::Strict => write!(f, "strict"),
            ImportMode::BestEffort => write!(f, "best-effort"),
        }
    }
}

/// Semantic column of a guest sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Field {
    Name,
    Phone,
    Email,
    Location,
    Rsvp,
    Asoebi,
}

impl Field {
    /// Match a header cell: case-insensitive, whitespace runs read as `_`
    fn from_header(cell: &str) -> Option<Self> {
        let key = cell
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");

        match key.as_str() {
            "name" => Some(Field::Name),
            "phone" => Some(Field::Phone),
            "email" => Some(Field::Email),
            "location" => Some(Field::Location),
            "rsvp_status" | "rsvp" => Some(Field::Rsvp),
            "asoebi_status" | "asoebi" => Some(Field::Asoebi),
            _ => None,
        }
    }
}

/// Where each field lives in a row
#[derive(Debug, Clone, PartialEq, Eq)]
enum Layout {
    /// Row 0 was a header; fields map to the columns it named
    Header(HashMap<Field, usize>),
    /// No header: column 0 is the name, column 1 the phone
    Positional,
}

impl Layout {
    fn detect(first_row: Option<&Row>) -> Self {
        let Some(row) = first_row else {
            return Layout::Positional;
        };

        let mut columns = HashMap::new();
        let mut populated = 0;
        for (col, cell) in row.iter().enumerate() {
            let Some(cell) = cell.as_ref().filter(|c| c.is_populated()) else {
                continue;
            };
            populated += 1;

            let field = match cell {
                Cell::Text(s) => Field::from_header(s),
                _ => None,
            };
            match field {
                Some(field) => {
                    columns.entry(field).or_insert(col);
                }
                None => return Layout::Positional,
            }
        }

        if populated == 0 {
            Layout::Positional
        } else {
            Layout::Header(columns)
        }
    }

    fn data_start(&self) -> usize {
        match self {
            Layout::Header(_) => 1,
            Layout::Positional => 0,
        }
    }
}

/// Field values pulled out of one row, before cleaning
#[derive(Debug, Default)]
struct RawGuest {
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    location: Option<String>,
    rsvp: Option<String>,
    asoebi: Option<String>,
}

/// Result of normalizing one sheet
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub records: Vec<GuestRecord>,
    pub stats: ImportStats,
    pub failures: Vec<RowFailure>,
    /// Blank rows that were skipped without counting
    pub skipped: usize,
}

/// Maps raw rows to guest records according to an [`ImportMode`]
#[derive(Debug, Clone)]
pub struct RowNormalizer {
    mode: ImportMode,
    phone: PhoneFormatter,
}

impl RowNormalizer {
    pub fn new(mode: ImportMode, phone: PhoneFormatter) -> Self {
        Self { mode, phone }
    }

    pub fn mode(&self) -> ImportMode {
        self.mode
    }

    /// Normalize a decoded sheet; row numbers in failures are sheet rows
    pub fn normalize_sheet(&self, sheet: &Sheet) -> Result<NormalizedBatch> {
        self.normalize_rows(&sheet.rows, sheet.row_offset)
    }

    pub fn normalize(&self, rows: &[Row]) -> Result<NormalizedBatch> {
        self.normalize_rows(rows, 0)
    }

    fn normalize_rows(&self, rows: &[Row], row_offset: usize) -> Result<NormalizedBatch> {
        // header row or positional columns
        let layout = Layout::detect(rows.first());
        let data_start = layout.data_start();
        log::debug!(
            "Normalizing {} rows in {} mode ({})",
            rows.len().saturating_sub(data_start),
            self.mode,
            if data_start == 1 { "header detected" } else { "positional" }
        );

        let mut batch = NormalizedBatch::default();

        for (idx, row) in rows.iter().enumerate().skip(data_start) {
            let sheet_row = row_offset + idx + 1;
            let position = idx - data_start + 1;

            // blank rows are skipped without counting
            let populated: Vec<(usize, &Cell)> = row
                .iter()
                .enumerate()
                .filter_map(|(col, cell)| cell.as_ref().filter(|c| c.is_populated()).map(|c| (col, c)))
                .collect();

            if populated.is_empty() {
                batch.skipped += 1;
                continue;
            }

            // pull raw field values out of the row
            let raw = match &layout {
                Layout::Header(columns) => extract_by_header(row, columns),
                Layout::Positional => extract_positional(row, &populated),
            };

            match self.build_record(raw, sheet_row, position)? {
                Ok(record) => {
                    batch.stats.record_success();
                    batch.records.push(record);
                }
                Err(failure) => {
                    log::warn!("Row {}: {}", failure.row, failure.reason);
                    batch.stats.record_failure();
                    batch.failures.push(failure);
                }
            }
        }

        log::info!(
            "Normalized {} guests ({} failed, {} blank rows skipped)",
            batch.stats.success,
            batch.stats.failed,
            batch.skipped
        );
        Ok(batch)
    }

    /// Outer error aborts the batch; inner error is a counted row failure
    fn build_record(
        &self,
        raw: RawGuest,
        sheet_row: usize,
        position: usize,
    ) -> Result<std::result::Result<GuestRecord, RowFailure>> {
        // name: kept verbatim, whitespace-only counts as missing
        let name = raw.name.filter(|n| !n.trim().is_empty());
        let name = match (name, self.mode) {
            (Some(name), _) => name,
            (None, ImportMode::BestEffort) => format!("Guest {}", position),
            (None, ImportMode::Strict) => {
                return Err(GuestError::Validation {
                    row: sheet_row,
                    message: "guest name is required".to_string(),
                });
            }
        };

        // phone: only phone-shaped values are canonicalized
        let phone = raw
            .phone
            .as_deref()
            .filter(|p| looks_like_phone(p))
            .and_then(|p| self.phone.canonicalize(p));

        if phone.is_none() {
            if let Some(value) = raw.phone.as_deref() {
                log::debug!("Row {}: '{}' is not a phone number", sheet_row, value);
            }
            if self.mode == ImportMode::BestEffort {
                return Ok(Err(RowFailure {
                    row: sheet_row,
                    reason: format!("no usable phone number for '{}'", name),
                }));
            }
        }

        // email and location pass through untouched
        let mut record = GuestRecord::new(name);
        record.phone = phone;
        record.email = raw.email;
        record.location = raw.location;
        record.rsvp_status = parse_status(raw.rsvp, sheet_row, RsvpStatus::parse);
        record.asoebi_status = parse_status(raw.asoebi, sheet_row, AsoebiStatus::parse);
        record.source = Some(self.mode.source());

        Ok(Ok(record))
    }
}

fn parse_status<T: Default>(value: Option<String>, row: usize, parse: fn(&str) -> Option<T>) -> T {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return T::default();
    };
    parse(&value).unwrap_or_else(|| {
        log::warn!("Row {}: unrecognized status '{}', using default", row, value);
        T::default()
    })
}

/// Literal cell content; the decoder already drops empty cells
fn cell_text(row: &Row, col: usize) -> Option<String> {
    row.get(col).and_then(|c| c.as_ref()).map(Cell::as_text)
}

fn extract_by_header(row: &Row, columns: &HashMap<Field, usize>) -> RawGuest {
    let get = |field: Field| columns.get(&field).and_then(|&col| cell_text(row, col));
    RawGuest {
        name: get(Field::Name),
        phone: get(Field::Phone),
        email: get(Field::Email),
        location: get(Field::Location),
        rsvp: get(Field::Rsvp),
        asoebi: get(Field::Asoebi),
    }
}

fn extract_positional(row: &Row, populated: &[(usize, &Cell)]) -> RawGuest {
    if let [(_, only)] = populated {
        let value = only.as_text();
        if looks_like_phone(&value) {
            return RawGuest {
                phone: Some(value),
                ..Default::default()
            };
        }
    }

    RawGuest {
        name: cell_text(row, 0),
        phone: cell_text(row, 1),
        ..Default::default()
    }
}
