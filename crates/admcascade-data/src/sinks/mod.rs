//! Output document implementations.
//!
//! Sinks buffer nothing on disk until [`TableSink::save`] is called, so a
//! failed run never leaves a half-written output file behind.

pub mod csv;
pub mod xlsx;

pub use self::csv::CsvSink;
pub use self::xlsx::XlsxSink;

use std::path::Path;

use crate::error::Result;

/// Trait for documents that accept cell writes
pub trait TableSink {
    /// Write a string value at a 0-indexed (row, column)
    fn set_cell(&mut self, row: u32, col: u16, value: &str) -> Result<()>;

    /// Persist the document
    fn save(&mut self) -> Result<()>;
}

impl<T: TableSink + ?Sized> TableSink for Box<T> {
    fn set_cell(&mut self, row: u32, col: u16, value: &str) -> Result<()> {
        (**self).set_cell(row, col, value)
    }

    fn save(&mut self) -> Result<()> {
        (**self).save()
    }
}

/// Create a sink for `path`, choosing the format from its extension
///
/// `.csv` produces a CSV file; anything else produces an XLSX workbook with
/// a single sheet named `sheet_name`.
pub fn open_sink(path: impl AsRef<Path>, sheet_name: &str) -> Result<Box<dyn TableSink>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        Ok(Box::new(CsvSink::create(path)))
    } else {
        Ok(Box::new(XlsxSink::create(path, sheet_name)?))
    }
}
