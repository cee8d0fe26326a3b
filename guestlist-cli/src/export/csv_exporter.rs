//! CSV export of a guest list, same columns as the xlsx export

use csv::Writer;

use super::{COLUMNS, guest_row};
use crate::error::{GuestError, Result};
use crate::guests::GuestRecord;

pub fn to_csv(guests: &[GuestRecord]) -> Result<Vec<u8>> {
    let mut wtr = Writer::from_writer(Vec::new());

    wtr.write_record(COLUMNS)
        .map_err(|e| GuestError::Export(format!("Failed to write CSV header: {}", e)))?;

    for guest in guests {
        wtr.write_record(guest_row(guest))
            .map_err(|e| GuestError::Export(format!("Failed to write guest '{}': {}", guest.name, e)))?;
    }

    wtr.into_inner()
        .map_err(|e| GuestError::Export(format!("Failed to flush CSV writer: {}", e)))
}
