//! admcascade CLI - Command-line interface library
//!
//! Converts an administrative-boundary workbook into a cascading selection
//! sheet.
//!
//! # Library Usage
//!
//! ```ignore
//! use admcascade_cli::{convert_command, ConvertOptions};
//!
//! let report = convert_command(&input, &output, &ConvertOptions::default())?;
//! assert!(report.complete);
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Convert to XLSX
//! admcascade cod_ab.xlsx cascade.xlsx
//!
//! # Replace an existing CSV output and print the run report as JSON
//! admcascade cod_ab.xlsx cascade.csv --overwrite --format json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{
    convert_command, render_text, run_cli, warning_summary, ConvertOptions, OutputFormat,
};
