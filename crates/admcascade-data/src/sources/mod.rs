//! Data source implementations.
//!
//! This module contains adapters that open spreadsheet documents for reading.

pub mod excel;

pub use excel::ExcelSource;

use crate::error::Result;
use crate::grid::SheetGrid;

/// Trait for documents that can provide whole worksheets
pub trait DataSource {
    /// List available sheets in workbook order
    fn list_sheets(&self) -> Result<Vec<String>>;

    /// Load a sheet fully into memory
    ///
    /// # Arguments
    /// * `sheet` - Sheet name as returned by [`DataSource::list_sheets`]
    fn read_sheet(&self, sheet: &str) -> Result<SheetGrid>;
}
