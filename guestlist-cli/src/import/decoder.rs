//! Decode spreadsheet bytes (xlsx, xls, csv) into raw rows

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Reader, Xls, Xlsx};

use crate::error::{GuestError, Result};

/// A raw cell value as stored in the sheet
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// Cell content as text; whole numbers print without a fractional part
    pub fn as_text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    (*n as i64).to_string()
                } else {
                    n.to_string()
                }
            }
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// Whether the cell holds anything besides whitespace
    pub fn is_populated(&self) -> bool {
        match self {
            Cell::Text(s) => !s.trim().is_empty(),
            _ => true,
        }
    }
}

/// One sheet row; absent cells are `None`, trailing absent cells are dropped
pub type Row = Vec<Option<Cell>>;

/// The decoded first sheet of a workbook
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
    /// Sheet rows above `rows[0]` (blank rows outside the used range)
    pub row_offset: usize,
}

/// Declared spreadsheet format, taken from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Xls,
    Csv,
}

impl SheetFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "xlsx" => Some(SheetFormat::Xlsx),
            "xls" => Some(SheetFormat::Xls),
            "csv" => Some(SheetFormat::Csv),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| {
                GuestError::Decode(format!(
                    "Unsupported file type: {} (expected .xlsx, .xls or .csv)",
                    path.display()
                ))
            })
    }
}

impl std::fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetFormat::Xlsx => write!(f, "xlsx"),
            SheetFormat::Xls => write!(f, "xls"),
            SheetFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Decode a spreadsheet buffer into the rows of its first sheet
pub fn decode(bytes: &[u8], format: SheetFormat) -> Result<Sheet> {
    let sheet = match format {
        SheetFormat::Xlsx => {
            let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
                .map_err(|e| GuestError::Decode(format!("Not a valid xlsx workbook: {}", e)))?;
            decode_first_sheet(workbook)?
        }
        SheetFormat::Xls => {
            let workbook: Xls<_> = Xls::new(Cursor::new(bytes))
                .map_err(|e| GuestError::Decode(format!("Not a valid xls workbook: {}", e)))?;
            decode_first_sheet(workbook)?
        }
        SheetFormat::Csv => decode_csv(bytes)?,
    };

    log::debug!(
        "Decoded {} sheet '{}' with {} rows",
        format,
        sheet.name,
        sheet.rows.len()
    );
    Ok(sheet)
}

fn decode_first_sheet<R, RS>(mut workbook: R) -> Result<Sheet>
where
    R: Reader<RS>,
    RS: Read + Seek,
    R::Error: std::fmt::Display,
{
    let sheet_name = first_sheet_name(&workbook.sheet_names())?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| GuestError::Decode(format!("Failed to read sheet '{}': {}", sheet_name, e)))?;

    // used range may start below row 1
    let row_offset = range.start().map_or(0, |(row, _)| row as usize);

    let rows = range
        .rows()
        .map(|row| trim_row(row.iter().map(data_to_cell).collect()))
        .collect();

    Ok(Sheet {
        name: sheet_name,
        rows,
        row_offset,
    })
}

/// Only the first sheet is imported; a workbook without sheets is undecodable
fn first_sheet_name(names: &[String]) -> Result<String> {
    names
        .first()
        .cloned()
        .ok_or_else(|| GuestError::Decode("Workbook has no sheets".to_string()))
}

fn data_to_cell(data: &Data) -> Option<Cell> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(Cell::Text(s.clone())),
        Data::Int(i) => Some(Cell::Number(*i as f64)),
        Data::Float(f) => Some(Cell::Number(*f)),
        Data::Bool(b) => Some(Cell::Bool(*b)),
        Data::DateTime(dt) => Some(Cell::Text(format!("{}", dt))),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Cell::Text(s.clone())),
    }
}

fn decode_csv(bytes: &[u8]) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| GuestError::Decode(format!("Invalid CSV at line {}: {}", idx + 1, e)))?;
        rows.push(trim_row(record.iter().map(csv_field_to_cell).collect()));
    }

    Ok(Sheet {
        name: "Sheet1".to_string(),
        rows,
        row_offset: 0,
    })
}

fn csv_field_to_cell(field: &str) -> Option<Cell> {
    if field.is_empty() {
        return None;
    }
    if is_plain_number(field) {
        if let Ok(n) = field.parse::<f64>() {
            return Some(Cell::Number(n));
        }
    }
    Some(Cell::Text(field.to_string()))
}

/// Decimal numbers that survive a round trip through f64 unchanged.
/// Leading zeros (phone numbers, ids) stay text.
fn is_plain_number(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    if int_part.len() > 1 && int_part.starts_with('0') {
        return false;
    }
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }
    int_part.len() + frac_part.map_or(0, str::len) <= 15
}

fn trim_row(mut row: Row) -> Row {
    while matches!(row.last(), Some(None)) {
        row.pop();
    }
    row
}
