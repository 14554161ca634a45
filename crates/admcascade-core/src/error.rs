//! Fatal errors for a conversion run.
//!
//! Conditions that only degrade the output (a missing column, an empty
//! level, an orphaned record) are not errors; they are reported as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s in the run report.

use std::path::PathBuf;

use admcascade_data::DataError;
use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, CascadeError>;

/// Errors that abort a conversion run
#[derive(Debug, Error)]
pub enum CascadeError {
    /// Input path does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Output path exists and overwriting was not requested
    #[error("Output file already exists: {} (use --overwrite to replace it)", .0.display())]
    OutputAlreadyExists(PathBuf),

    /// No sheet matches the inferred naming prefix
    #[error("No admin-level sheet found among: {}", .0.join(", "))]
    NoMatchingSheet(Vec<String>),

    /// Configuration file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Spreadsheet adapter error
    #[error(transparent)]
    Data(#[from] DataError),
}

impl From<toml::de::Error> for CascadeError {
    fn from(err: toml::de::Error) -> Self {
        CascadeError::Config(err.to_string())
    }
}
