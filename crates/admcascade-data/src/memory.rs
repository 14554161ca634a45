//! In-memory source and sink.

use std::collections::BTreeMap;

use crate::error::{DataError, Result};
use crate::grid::SheetGrid;
use crate::sinks::TableSink;
use crate::sources::DataSource;

/// A workbook held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: Vec<SheetGrid>,
}

impl MemorySource {
    /// Create an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet, keeping insertion order
    pub fn with_sheet(mut self, sheet: SheetGrid) -> Self {
        self.sheets.push(sheet);
        self
    }
}

impl DataSource for MemorySource {
    fn list_sheets(&self) -> Result<Vec<String>> {
        Ok(self.sheets.iter().map(|s| s.name().to_string()).collect())
    }

    fn read_sheet(&self, sheet: &str) -> Result<SheetGrid> {
        self.sheets
            .iter()
            .find(|s| s.name() == sheet)
            .cloned()
            .ok_or_else(|| DataError::SheetNotFound(sheet.to_string()))
    }
}

/// A sink that keeps written cells in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    cells: BTreeMap<(u32, u16), String>,
    saved: bool,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`TableSink::save`] has been called
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Read back a written cell; unwritten cells read as ""
    pub fn cell(&self, row: u32, col: u16) -> &str {
        self.cells.get(&(row, col)).map(String::as_str).unwrap_or("")
    }

    /// Number of rows spanned by written cells
    pub fn row_count(&self) -> u32 {
        self.cells.keys().map(|(r, _)| r + 1).max().unwrap_or(0)
    }

    /// Materialise the written cells as a grid
    pub fn to_grid(&self, name: &str) -> SheetGrid {
        let width = self
            .cells
            .keys()
            .map(|(_, c)| *c as usize + 1)
            .max()
            .unwrap_or(0);
        let mut rows = vec![vec![String::new(); width]; self.row_count() as usize];
        for ((r, c), value) in &self.cells {
            rows[*r as usize][*c as usize] = value.clone();
        }
        SheetGrid::new(name, rows)
    }
}

impl TableSink for MemorySink {
    fn set_cell(&mut self, row: u32, col: u16, value: &str) -> Result<()> {
        self.cells.insert((row, col), value.to_string());
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.saved = true;
        Ok(())
    }
}
