//! Error types for the tabular document adapter.

use thiserror::Error;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while reading or writing spreadsheet documents
#[derive(Debug, Error)]
pub enum DataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Failed to open workbook
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    /// Sheet not found in workbook
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Failed to write the output document
    #[error("Failed to write document: {0}")]
    Write(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Calamine error
    #[error("Excel error: {0}")]
    Calamine(String),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<calamine::Error> for DataError {
    fn from(err: calamine::Error) -> Self {
        DataError::Calamine(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for DataError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        DataError::Write(err.to_string())
    }
}
