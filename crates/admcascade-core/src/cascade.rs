//! Cascading selection output
//!
//! Flattens the per-level records into one sheet of
//! `list_name, name, label, <prefix>0 .. <prefix>(N-1)` rows. Each level is
//! one block; blocks are separated by a single blank row. A record at level
//! L > 0 carries its parent code in the `<prefix>(L-1)` column, which is how
//! dependent dropdowns filter child lists.

use admcascade_data::{DataError, TableSink};
use serde::Serialize;

use crate::error::Result;
use crate::hierarchy::Hierarchy;

/// Columns present before the ancestry columns
pub const FIXED_COLUMNS: [&str; 3] = ["list_name", "name", "label"];

/// One output row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeRow {
    /// List the choice belongs to (`<prefix>L`)
    pub list_name: String,
    /// Choice value (the record's code)
    pub name: String,
    /// Choice label
    pub label: String,
    /// One cell per level shallower than the deepest; only the parent's
    /// level is filled
    pub parent_refs: Vec<String>,
}

/// The complete output sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CascadeSheet {
    header: Vec<String>,
    /// `None` is a blank separator row
    rows: Vec<Option<CascadeRow>>,
}

impl CascadeSheet {
    /// Header row
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Body rows, `None` for separators
    pub fn rows(&self) -> &[Option<CascadeRow>] {
        &self.rows
    }

    /// Total rows including the header row
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Write the sheet to `sink`, header at row 0; returns rows written
    ///
    /// Fails without touching the sink when the sheet is wider or longer
    /// than a worksheet can address.
    pub fn write_to<S: TableSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        column_at(self.header.len().saturating_sub(1))?;
        row_at(self.rows.len())?;

        for (col, value) in self.header.iter().enumerate() {
            sink.set_cell(0, column_at(col)?, value)?;
        }

        for (idx, row) in self.rows.iter().enumerate() {
            let Some(row) = row else {
                continue;
            };
            let r = row_at(idx + 1)?;
            sink.set_cell(r, 0, &row.list_name)?;
            sink.set_cell(r, 1, &row.name)?;
            sink.set_cell(r, 2, &row.label)?;
            for (offset, parent) in row.parent_refs.iter().enumerate() {
                if !parent.is_empty() {
                    sink.set_cell(r, column_at(FIXED_COLUMNS.len() + offset)?, parent)?;
                }
            }
        }

        Ok(self.row_count())
    }
}

fn column_at(idx: usize) -> Result<u16> {
    u16::try_from(idx).map_err(|_| {
        DataError::Write(format!("column {} is beyond the sheet's last column", idx + 1)).into()
    })
}

fn row_at(idx: usize) -> Result<u32> {
    u32::try_from(idx).map_err(|_| {
        DataError::Write(format!("row {} is beyond the sheet's last row", idx + 1)).into()
    })
}

/// Lay out the hierarchy as a cascading selection sheet
///
/// `list_prefix` names the lists (`<prefix>0`, `<prefix>1`, ...) and the
/// ancestry columns.
pub fn layout_cascade(hierarchy: &Hierarchy, list_prefix: &str) -> CascadeSheet {
    let ancestry = hierarchy.levels().len().saturating_sub(1);

    let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend((0..ancestry).map(|level| format!("{}{}", list_prefix, level)));

    let mut rows = Vec::new();
    for (idx, level) in hierarchy.levels().iter().enumerate() {
        if idx > 0 {
            rows.push(None);
        }
        let list_name = format!("{}{}", list_prefix, level.level());
        for record in level.records() {
            let mut parent_refs = vec![String::new(); ancestry];
            if idx > 0 {
                parent_refs[idx - 1] = record.parent_code.clone();
            }
            rows.push(Some(CascadeRow {
                list_name: list_name.clone(),
                name: record.code.clone(),
                label: record.label.clone(),
                parent_refs,
            }));
        }
    }

    CascadeSheet { header, rows }
}
