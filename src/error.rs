//! Error types for diamond_export

use std::fmt;

/// Unified error type for diamond_export operations
#[derive(Debug)]
pub enum ExportError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// Failed to parse a JSON document
    Parse(serde_json::Error),
    /// Response body did not have the expected shape
    UnexpectedShape {
        endpoint: &'static str,
        field: &'static str,
    },
    /// Config file missing, unreadable, or invalid
    Config(String),
    /// File I/O failed
    Io(std::io::Error),
    /// Workbook write failed
    Workbook(rust_xlsxwriter::XlsxError),
    /// Two sheet names truncated to the same 31-character name
    SheetNameCollision(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Network(e) => write!(f, "Network error: {}", e),
            ExportError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            ExportError::Parse(e) => write!(f, "Parse error: {}", e),
            ExportError::UnexpectedShape { endpoint, field } => {
                write!(f, "Unexpected response shape from {}: missing {}", endpoint, field)
            }
            ExportError::Config(msg) => write!(f, "Config error: {}", msg),
            ExportError::Io(e) => write!(f, "I/O error: {}", e),
            ExportError::Workbook(e) => write!(f, "Workbook error: {}", e),
            ExportError::SheetNameCollision(name) => {
                write!(f, "Sheet name collides after truncation: {}", name)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Network(e) => Some(e),
            ExportError::HttpStatus(_) => None,
            ExportError::Parse(e) => Some(e),
            ExportError::UnexpectedShape { .. } => None,
            ExportError::Config(_) => None,
            ExportError::Io(e) => Some(e),
            ExportError::Workbook(e) => Some(e),
            ExportError::SheetNameCollision(_) => None,
        }
    }
}

impl From<reqwest::Error> for ExportError {
    fn from(err: reqwest::Error) -> Self {
        ExportError::Network(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Parse(err)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err)
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Workbook(err)
    }
}

/// Result alias for diamond_export operations
pub type Result<T> = std::result::Result<T, ExportError>;
