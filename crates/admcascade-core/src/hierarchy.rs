//! Hierarchy building
//!
//! One pass over the data rows of the deepest-level sheet. Each row carries
//! the full ancestry of its unit, so every level is deduplicated by code and
//! the parent of a record is read from the level above on the same row.

use std::collections::HashSet;

use admcascade_data::SheetGrid;
use serde::Serialize;
use tracing::debug;

use crate::diagnostics::{codes, Diagnostic};
use crate::locate::LevelColumns;

/// Orphan notes listed per level before the rest are summarised
const MAX_ORPHAN_NOTES: usize = 5;

/// One administrative unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminRecord {
    /// Unique code within the level (PCode)
    pub code: String,
    /// Display name
    pub label: String,
    /// Code of the enclosing unit at level - 1, empty at level 0
    pub parent_code: String,
}

/// Deduplicated records of one level in first-seen order
#[derive(Debug, Clone, Default)]
pub struct LevelRecords {
    level: u32,
    records: Vec<AdminRecord>,
    seen: HashSet<String>,
}

impl LevelRecords {
    fn new(level: u32) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Append a record unless its code was already seen
    fn insert(&mut self, record: AdminRecord) -> bool {
        if self.seen.contains(&record.code) {
            return false;
        }
        self.seen.insert(record.code.clone());
        self.records.push(record);
        true
    }

    /// Admin level
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Records in first-seen order
    pub fn records(&self) -> &[AdminRecord] {
        &self.records
    }

    /// Whether a code exists at this level
    pub fn contains(&self, code: &str) -> bool {
        self.seen.contains(code)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// No records at this level
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Per-level records for levels 0..=N
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    levels: Vec<LevelRecords>,
}

impl Hierarchy {
    /// Levels, shallowest first
    pub fn levels(&self) -> &[LevelRecords] {
        &self.levels
    }

    /// Records of one level
    pub fn level(&self, level: u32) -> Option<&LevelRecords> {
        self.levels.get(level as usize)
    }

    /// Record count per level
    pub fn record_counts(&self) -> Vec<usize> {
        self.levels.iter().map(LevelRecords::len).collect()
    }

    /// Levels that produced no records
    pub fn empty_levels(&self) -> Vec<u32> {
        self.levels
            .iter()
            .filter(|l| l.is_empty())
            .map(LevelRecords::level)
            .collect()
    }

    /// Every level produced at least one record
    pub fn is_complete(&self) -> bool {
        !self.levels.is_empty() && self.levels.iter().all(|l| !l.is_empty())
    }

    /// Records whose parent code is not a code of the level above
    pub fn orphans(&self) -> Vec<(u32, &AdminRecord)> {
        let mut orphans = Vec::new();
        for pair in self.levels.windows(2) {
            let (parents, children) = (&pair[0], &pair[1]);
            for record in children.records() {
                if !parents.contains(&record.parent_code) {
                    orphans.push((children.level(), record));
                }
            }
        }
        orphans
    }

    /// Empty-level and orphan findings
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for level in self.empty_levels() {
            diagnostics.push(
                Diagnostic::warning(format!("Level {} produced no records", level))
                    .with_code(codes::EMPTY_LEVEL)
                    .with_level(level),
            );
        }

        let orphans = self.orphans();
        for level in 1..self.levels.len() as u32 {
            let at_level: Vec<&AdminRecord> = orphans
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, r)| *r)
                .collect();
            if at_level.is_empty() {
                continue;
            }

            let mut diag = Diagnostic::warning(format!(
                "{} record(s) at level {} have no parent at level {}",
                at_level.len(),
                level,
                level - 1
            ))
            .with_code(codes::ORPHAN_RECORD)
            .with_level(level)
            .with_help("Check that every row has its ancestor codes filled in");
            for record in at_level.iter().take(MAX_ORPHAN_NOTES) {
                let parent = if record.parent_code.is_empty() {
                    "(empty)"
                } else {
                    record.parent_code.as_str()
                };
                diag = diag.with_note(format!("{} -> parent {}", record.code, parent));
            }
            if at_level.len() > MAX_ORPHAN_NOTES {
                diag = diag.with_note(format!("... and {} more", at_level.len() - MAX_ORPHAN_NOTES));
            }
            diagnostics.push(diag);
        }

        diagnostics
    }
}

/// Build the per-level record collections from the data rows of `grid`
///
/// Levels missing either column produce no records. A missing parent code
/// column yields empty parent codes rather than an error.
pub fn build_hierarchy(grid: &SheetGrid, columns: &[LevelColumns]) -> Hierarchy {
    let mut levels: Vec<LevelRecords> = columns.iter().map(|c| LevelRecords::new(c.level)).collect();

    for (row, _) in grid.data_rows() {
        for (idx, level_columns) in columns.iter().enumerate() {
            let (Some(code_col), Some(name_col)) = (level_columns.code, level_columns.name) else {
                continue;
            };

            let code = grid.cell(row, code_col).trim();
            if code.is_empty() || levels[idx].contains(code) {
                continue;
            }

            let parent_code = idx
                .checked_sub(1)
                .and_then(|parent| columns[parent].code)
                .map(|col| grid.cell(row, col).trim().to_string())
                .unwrap_or_default();

            levels[idx].insert(AdminRecord {
                code: code.to_string(),
                label: grid.cell(row, name_col).trim().to_string(),
                parent_code,
            });
        }
    }

    for level in &levels {
        debug!(level = level.level(), records = level.len(), "built level");
    }

    Hierarchy { levels }
}
