//! XLSX output using rust_xlsxwriter.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tracing::debug;

use crate::error::Result;
use crate::sinks::TableSink;

/// Single-sheet XLSX workbook written on [`TableSink::save`]
pub struct XlsxSink {
    path: PathBuf,
    workbook: Workbook,
}

impl XlsxSink {
    /// Prepare a new workbook with one sheet named `sheet_name`
    pub fn create(path: impl AsRef<Path>, sheet_name: &str) -> Result<Self> {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name(sheet_name)?;

        Ok(Self {
            path: path.as_ref().to_path_buf(),
            workbook,
        })
    }
}

impl TableSink for XlsxSink {
    fn set_cell(&mut self, row: u32, col: u16, value: &str) -> Result<()> {
        let worksheet = self.workbook.worksheet_from_index(0)?;
        worksheet.write_string(row, col, value)?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.workbook.save(&self.path)?;
        debug!(path = %self.path.display(), "saved workbook");
        Ok(())
    }
}
