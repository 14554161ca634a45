//! Spreadsheet data source using calamine.
//!
//! Format detection is by extension (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`).

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::debug;

use crate::error::{DataError, Result};
use crate::grid::SheetGrid;
use crate::sources::DataSource;

/// Spreadsheet workbook data source
pub struct ExcelSource {
    /// Path to the workbook
    path: PathBuf,
    /// Sheet names cache
    sheet_names: Vec<String>,
}

impl ExcelSource {
    /// Open a workbook from a file path
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()));
        }

        let workbook = open_workbook_auto(path)
            .map_err(|e| DataError::WorkbookOpen(format!("{}: {}", path.display(), e)))?;

        let sheet_names = workbook.sheet_names().to_vec();
        debug!(path = %path.display(), sheets = sheet_names.len(), "opened workbook");

        Ok(Self {
            path: path.to_path_buf(),
            sheet_names,
        })
    }

    /// Path the source was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Convert a calamine cell to a string
    pub(crate) fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                // Codes stored as numbers must not pick up a ".0"
                if f.fract() == 0.0 {
                    format!("{:.0}", f)
                } else {
                    f.to_string()
                }
            }
            Data::Bool(b) => b.to_string(),
            Data::Error(e) => format!("#ERROR: {:?}", e),
            Data::DateTime(dt) => format!("{}", dt),
            Data::DateTimeIso(s) => s.clone(),
            Data::DurationIso(s) => s.clone(),
        }
    }

    /// Expand a calamine Range into absolute row/column positions
    ///
    /// calamine ranges start at the first used cell, so leading empty rows or
    /// columns are restored here to keep row 0 the sheet's first row.
    fn range_to_rows(range: &Range<Data>) -> Vec<Vec<String>> {
        let (start_row, start_col) = match range.start() {
            Some((r, c)) => (r as usize, c as usize),
            None => return Vec::new(),
        };
        let (height, width) = range.get_size();

        let mut rows = vec![vec![String::new(); start_col + width]; start_row + height];
        for (row, col, cell) in range.cells() {
            rows[start_row + row][start_col + col] = Self::cell_to_string(cell);
        }
        rows
    }
}

impl DataSource for ExcelSource {
    fn list_sheets(&self) -> Result<Vec<String>> {
        Ok(self.sheet_names.clone())
    }

    fn read_sheet(&self, sheet: &str) -> Result<SheetGrid> {
        // Re-open workbook for reading (calamine requires this pattern)
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| DataError::WorkbookOpen(format!("{}: {}", self.path.display(), e)))?;

        if !self.sheet_names.iter().any(|s| s == sheet) {
            return Err(DataError::SheetNotFound(sheet.to_string()));
        }

        // The sheet exists, so a failure here is a damaged sheet
        let range = workbook.worksheet_range(sheet)?;

        let rows = Self::range_to_rows(&range);
        debug!(sheet, rows = rows.len(), "loaded sheet");
        Ok(SheetGrid::new(sheet, rows))
    }
}
