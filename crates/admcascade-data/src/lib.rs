//! # admcascade-data
//!
//! Tabular document adapter for admcascade. The transformation core only
//! talks to the two capability traits defined here, so any spreadsheet
//! backend can be substituted without touching it.
//!
//! ## Features
//!
//! - **Reading**: `.xlsx`, `.xlsm`, `.xls` and `.ods` workbooks via `calamine`
//! - **Writing**: `.xlsx` via `rust_xlsxwriter`, `.csv` via `csv`
//! - **In-memory**: [`MemorySource`] and [`MemorySink`] for tests and embedding
//!
//! ## Example
//!
//! ```rust,ignore
//! use admcascade_data::{open_sink, DataSource, ExcelSource, TableSink};
//!
//! let source = ExcelSource::new("cod_ab.xlsx")?;
//! let grid = source.read_sheet("Admin2")?;
//! println!("{}", grid.cell(0, 0));
//!
//! let mut sink = open_sink("cascade.xlsx", "choices")?;
//! sink.set_cell(0, 0, "list_name")?;
//! sink.save()?;
//! ```

pub mod error;
pub mod grid;
pub mod memory;
pub mod sinks;
pub mod sources;

// Re-exports
pub use error::{DataError, Result};
pub use grid::{column_name, SheetGrid};
pub use memory::{MemorySink, MemorySource};
pub use sinks::{open_sink, CsvSink, TableSink, XlsxSink};
pub use sources::{DataSource, ExcelSource};
