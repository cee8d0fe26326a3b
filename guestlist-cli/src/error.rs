//! Error type for the guest import/export pipeline

/// Errors surfaced by the pipeline and the backend client
///
/// Row-level failures in best-effort imports are not errors; they are reported
/// as [`crate::guests::RowFailure`] alongside the import stats.
#[derive(Debug)]
pub enum GuestError {
    /// The buffer is not a spreadsheet we can read
    Decode(String),
    /// A row in a strict import lacks a required field; the whole batch is rejected
    Validation { row: usize, message: String },
    /// The backend rejected a request
    Persistence(String),
    /// The backend rejected a batch because a guest already exists
    Duplicate(String),
    /// The guest list could not be serialized
    Export(String),
    /// Reading or writing a local file failed
    Io(std::io::Error),
}

impl GuestError {
    /// Message shown to the user at the CLI boundary
    pub fn user_message(&self) -> String {
        match self {
            GuestError::Decode(msg) => format!("Could not read spreadsheet: {}", msg),
            GuestError::Validation { row, message } => {
                format!("Import rejected, row {}: {}", row, message)
            }
            GuestError::Persistence(msg) => format!("Failed to save guests: {}", msg),
            GuestError::Duplicate(msg) => format!("Some guests already exist for this event: {}", msg),
            GuestError::Export(_) => "Failed to export guest list".to_string(),
            GuestError::Io(err) => format!("File error: {}", err),
        }
    }
}

impl std::fmt::Display for GuestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuestError::Decode(msg) => write!(f, "decode error: {}", msg),
            GuestError::Validation { row, message } => {
                write!(f, "validation error at row {}: {}", row, message)
            }
            GuestError::Persistence(msg) => write!(f, "persistence error: {}", msg),
            GuestError::Duplicate(msg) => write!(f, "duplicate guest: {}", msg),
            GuestError::Export(msg) => write!(f, "export error: {}", msg),
            GuestError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for GuestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GuestError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GuestError {
    fn from(err: std::io::Error) -> Self {
        GuestError::Io(err)
    }
}

impl From<rust_xlsxwriter::XlsxError> for GuestError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        GuestError::Export(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GuestError>;
