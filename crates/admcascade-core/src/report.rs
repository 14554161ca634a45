//! Run report
//!
//! Summary of one conversion, printed by the CLI as text or JSON.

use admcascade_data::column_name;
use serde::Serialize;

use crate::diagnostics::{codes, Diagnostic};
use crate::pattern::{ColumnPattern, LocaleSuffix};

/// Per-level outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    /// Admin level
    pub level: u32,
    /// List name used in the output
    pub list_name: String,
    /// Deduplicated record count
    pub records: usize,
    /// Code column letter in the source sheet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_column: Option<String>,
    /// Name column letter in the source sheet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_column: Option<String>,
}

impl LevelSummary {
    pub(crate) fn new(
        level: u32,
        list_name: String,
        records: usize,
        code: Option<usize>,
        name: Option<usize>,
    ) -> Self {
        Self {
            level,
            list_name,
            records,
            code_column: code.map(column_name),
            name_column: name.map(column_name),
        }
    }
}

/// Outcome of a conversion run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Sheet the records were read from
    pub sheet: String,
    /// Deepest admin level (N)
    pub deepest_level: u32,
    /// Inferred column conventions
    pub pattern: ColumnPattern,
    /// Locale used for name columns
    pub locale: Option<LocaleSuffix>,
    /// One entry per level, shallowest first
    pub levels: Vec<LevelSummary>,
    /// Rows in the output sheet, header and separators included
    pub rows_written: usize,
    /// Every level produced at least one record
    pub complete: bool,
    /// Non-fatal findings
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    /// Levels that produced no records
    pub fn empty_levels(&self) -> Vec<u32> {
        self.levels
            .iter()
            .filter(|l| l.records == 0)
            .map(|l| l.level)
            .collect()
    }

    /// Total records across all levels
    pub fn total_records(&self) -> usize {
        self.levels.iter().map(|l| l.records).sum()
    }

    /// Whether any record was reported without a parent
    pub fn has_orphans(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.has_code(codes::ORPHAN_RECORD))
    }

    /// Warning-level diagnostics
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}
