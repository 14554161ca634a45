//! CSV output.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::sinks::TableSink;

/// CSV file written on [`TableSink::save`]
///
/// Every record is padded to the widest row so blank separator rows come
/// out as a run of empty fields.
pub struct CsvSink {
    path: PathBuf,
    rows: Vec<Vec<String>>,
}

impl CsvSink {
    /// Prepare a CSV document at `path`
    pub fn create(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            rows: Vec::new(),
        }
    }

    fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl TableSink for CsvSink {
    fn set_cell(&mut self, row: u32, col: u16, value: &str) -> Result<()> {
        let (row, col) = (row as usize, col as usize);
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let record = &mut self.rows[row];
        if record.len() <= col {
            record.resize(col + 1, String::new());
        }
        record[col] = value.to_string();
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let width = self.width();
        let mut writer = csv::Writer::from_path(&self.path)?;
        for row in &self.rows {
            let mut record = row.clone();
            record.resize(width, String::new());
            writer.write_record(&record)?;
        }
        writer.flush()?;
        debug!(path = %self.path.display(), rows = self.rows.len(), "saved csv");
        Ok(())
    }
}
