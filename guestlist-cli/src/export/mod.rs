//! Guest list export (xlsx, csv)
//!
//! The column layout is fixed so that an exported file imports back cleanly:
//! every header label normalizes to a field the importer recognizes.

pub mod csv_exporter;

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use uuid::Uuid;

use crate::error::{GuestError, Result};
use crate::guests::GuestRecord;

/// Header labels, in column order
pub const COLUMNS: [&str; 6] = ["Name", "Email", "Phone", "Location", "RSVP Status", "Asoebi Status"];

pub const SHEET_NAME: &str = "Guests";

/// Column indices (must match COLUMNS)
mod cols {
    pub const NAME: u16 = 0;
    pub const EMAIL: u16 = 1;
    pub const PHONE: u16 = 2;
    pub const LOCATION: u16 = 3;
    pub const RSVP: u16 = 4;
    pub const ASOEBI: u16 = 5;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// File name for an event's export, e.g. `Event_<id>_Guests.xlsx`
pub fn export_file_name(event_id: Uuid, format: ExportFormat) -> String {
    format!("Event_{}_Guests.{}", event_id, format.extension())
}

/// One guest as the six export cells; missing optional fields become empty strings
pub fn guest_row(guest: &GuestRecord) -> [&str; 6] {
    [
        guest.name.as_str(),
        guest.email.as_deref().unwrap_or(""),
        guest.phone.as_deref().unwrap_or(""),
        guest.location.as_deref().unwrap_or(""),
        guest.rsvp_status.as_str(),
        guest.asoebi_status.as_str(),
    ]
}

/// Serializes a guest list to spreadsheet bytes
#[derive(Debug, Clone, Default)]
pub struct GuestExporter {
    format: ExportFormat,
}

impl GuestExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: ExportFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Serialize in the configured format
    pub fn render(&self, guests: &[GuestRecord]) -> Result<Vec<u8>> {
        match self.format {
            ExportFormat::Xlsx => self.to_xlsx(guests),
            ExportFormat::Csv => csv_exporter::to_csv(guests),
        }
    }

    /// Write `Event_<id>_Guests.<ext>` into `dir` and return its path
    pub async fn export_to_dir(
        &self,
        guests: &[GuestRecord],
        event_id: Uuid,
        dir: &Path,
    ) -> Result<PathBuf> {
        // render before touching the filesystem
        let bytes = self.render(guests)?;
        let path = dir.join(export_file_name(event_id, self.format));
        tokio::fs::write(&path, bytes).await?;
        log::info!("Exported {} guests to {}", guests.len(), path.display());
        Ok(path)
    }

    pub fn to_xlsx(&self, guests: &[GuestRecord]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        // header row, then one row per guest
        write_header(worksheet)?;
        for (idx, guest) in guests.iter().enumerate() {
            write_guest(worksheet, (idx + 1) as u32, guest)?;
        }

        // save to memory
        workbook
            .save_to_buffer()
            .map_err(|e| GuestError::Export(format!("Failed to build workbook: {}", e)))
    }
}

fn write_header(ws: &mut Worksheet) -> Result<()> {
    let header_format = Format::new().set_bold();
    for (col, label) in COLUMNS.iter().enumerate() {
        ws.write_string_with_format(0, col as u16, *label, &header_format)?;
    }

    // widen the free-text columns
    ws.set_column_width(cols::NAME, 28.0)?;
    ws.set_column_width(cols::EMAIL, 30.0)?;
    ws.set_column_width(cols::PHONE, 18.0)?;
    ws.set_column_width(cols::LOCATION, 20.0)?;
    Ok(())
}

fn write_guest(ws: &mut Worksheet, row: u32, guest: &GuestRecord) -> Result<()> {
    ws.write_string(row, cols::NAME, &guest.name)?;
    // empty optionals stay blank cells
    if let Some(email) = guest.email.as_deref().filter(|s| !s.is_empty()) {
        ws.write_string(row, cols::EMAIL, email)?;
    }
    if let Some(phone) = guest.phone.as_deref().filter(|s| !s.is_empty()) {
        ws.write_string(row, cols::PHONE, phone)?;
    }
    if let Some(location) = guest.location.as_deref().filter(|s| !s.is_empty()) {
        ws.write_string(row, cols::LOCATION, location)?;
    }
    ws.write_string(row, cols::RSVP, guest.rsvp_status.as_str())?;
    ws.write_string(row, cols::ASOEBI, guest.asoebi_status.as_str())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guests::RsvpStatus;
    use crate::import::{Cell, SheetFormat, decode};

    fn text(s: &str) -> Option<Cell> {
        Some(Cell::Text(s.to_string()))
    }

    #[test]
    fn test_file_name() {
        let id = Uuid::parse_str("0b7f2d53-3a8e-4d0e-8f3c-8c3c1f9f5a10").unwrap();
        assert_eq!(
            export_file_name(id, ExportFormat::Xlsx),
            "Event_0b7f2d53-3a8e-4d0e-8f3c-8c3c1f9f5a10_Guests.xlsx"
        );
        assert!(export_file_name(id, ExportFormat::Csv).ends_with("_Guests.csv"));
    }

    #[test]
    fn test_empty_export_has_only_header() {
        let bytes = GuestExporter::new().to_xlsx(&[]).unwrap();
        let sheet = decode(&bytes, SheetFormat::Xlsx).unwrap();

        assert_eq!(sheet.name, "Guests");
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(
            sheet.rows[0],
            COLUMNS.iter().map(|c| text(c)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let mut guest = GuestRecord::new("Kemi");
        guest.rsvp_status = RsvpStatus::Confirmed;

        assert_eq!(guest_row(&guest), ["Kemi", "", "", "", "confirmed", "not_ordered"]);

        let bytes = GuestExporter::new().to_xlsx(&[guest]).unwrap();
        let sheet = decode(&bytes, SheetFormat::Xlsx).unwrap();
        assert_eq!(
            sheet.rows[1],
            vec![text("Kemi"), None, None, None, text("confirmed"), text("not_ordered")]
        );
    }

    #[tokio::test]
    async fn test_export_to_dir_writes_named_file() {
        let dir = std::env::temp_dir();
        let event_id = Uuid::new_v4();
        let exporter = GuestExporter::with_format(ExportFormat::Csv);

        let path = exporter
            .export_to_dir(&[GuestRecord::new("Kemi")], event_id, &dir)
            .await
            .unwrap();
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(path.file_name().unwrap().to_str().unwrap(), export_file_name(event_id, ExportFormat::Csv));
        assert!(content.starts_with("Name,Email,Phone,Location,RSVP Status,Asoebi Status"));
    }
}
