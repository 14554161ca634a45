//! admcascade-core - admin boundary tables to cascading selects
//!
//! Turns an administrative-boundary reference workbook (one sheet per admin
//! level, a code and one or more localized name columns per level) into a
//! flat `list_name, name, label, <parent>...` sheet for dependent dropdown
//! questions.
//!
//! The pipeline runs in five steps, each consuming only the previous step's
//! output plus the source sheet:
//!
//! 1. [`select::select_sheet`] picks the deepest-level sheet
//! 2. [`pattern::infer_headers`] learns the column naming convention and locale
//! 3. [`locate::locate_columns`] finds the code/name column of every level
//! 4. [`hierarchy::build_hierarchy`] deduplicates records and links parents
//! 5. [`cascade::layout_cascade`] flattens the levels into the output sheet
//!
//! # Example
//!
//! ```
//! use admcascade_core::{convert, Settings};
//! use admcascade_data::{MemorySink, MemorySource, SheetGrid};
//!
//! let source = MemorySource::new().with_sheet(SheetGrid::from_str_rows(
//!     "Admin1",
//!     &[
//!         &["Admin0Name_en", "Admin0Pcode", "Admin1Name_en", "Admin1Pcode"],
//!         &["Country", "AA", "District 1", "AA01"],
//!     ],
//! ));
//! let mut sink = MemorySink::new();
//!
//! let report = convert(&source, &mut sink, &Settings::default()).unwrap();
//! assert!(report.complete);
//! assert_eq!(sink.cell(1, 0), "Admin0");
//! ```

pub mod cascade;
pub mod diagnostics;
pub mod error;
pub mod hierarchy;
pub mod locate;
pub mod pattern;
pub mod report;
pub mod select;
pub mod settings;

use std::path::Path;

use admcascade_data::{DataSource, TableSink};
use crate::diagnostics::codes;
use tracing::{debug, info, warn};

// Re-export main types and functions
pub use cascade::{layout_cascade, CascadeRow, CascadeSheet};
pub use diagnostics::{Diagnostic, Severity};
pub use error::{CascadeError, Result};
pub use hierarchy::{build_hierarchy, AdminRecord, Hierarchy};
pub use locate::{locate_columns, ColumnLayout, LevelColumns};
pub use pattern::{infer_headers, Affix, ColumnPattern, InferredHeaders, LocaleSuffix};
pub use report::{LevelSummary, RunReport};
pub use select::{most_common, select_sheet, SheetSelection};
pub use settings::{SheetOrder, Settings};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything learned from the source before any output is written
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Selected sheet and deepest level
    pub selection: SheetSelection,
    /// Column conventions and the locale actually used
    pub headers: InferredHeaders,
    /// Located columns, locale notices and locator findings
    pub layout: ColumnLayout,
    /// Per-level records
    pub hierarchy: Hierarchy,
}

impl Extraction {
    /// Flatten the hierarchy into the output sheet
    pub fn cascade(&self) -> CascadeSheet {
        layout_cascade(&self.hierarchy, self.headers.pattern.list_prefix())
    }

    /// Locale, locator, empty-level and orphan findings, in that order
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.layout.diagnostics.clone();
        diagnostics.extend(self.hierarchy.diagnostics());
        diagnostics
    }

    /// Summarise the run
    pub fn report(&self, rows_written: usize) -> RunReport {
        let prefix = self.headers.pattern.list_prefix();
        let levels = self
            .hierarchy
            .levels()
            .iter()
            .zip(&self.layout.levels)
            .map(|(records, columns)| {
                LevelSummary::new(
                    records.level(),
                    format!("{}{}", prefix, records.level()),
                    records.len(),
                    columns.code,
                    columns.name,
                )
            })
            .collect();

        RunReport {
            sheet: self.selection.sheet_name.clone(),
            deepest_level: self.selection.deepest_level,
            pattern: self.headers.pattern.clone(),
            locale: self.headers.locale.clone(),
            levels,
            rows_written,
            complete: self.hierarchy.is_complete(),
            diagnostics: self.diagnostics(),
        }
    }
}

/// Run selection, inference, location and hierarchy building on `source`
pub fn extract<S: DataSource + ?Sized>(source: &S, settings: &Settings) -> Result<Extraction> {
    let sheets = source.list_sheets()?;
    let selection = select_sheet(&sheets, settings.selection.sheet_order)?;
    info!(
        sheet = %selection.sheet_name,
        deepest_level = selection.deepest_level,
        "selected sheet"
    );

    let grid = source.read_sheet(&selection.sheet_name)?;
    let mut headers = infer_headers(grid.header(), selection.deepest_level);
    let mut notices = Vec::new();

    if let Some(preferred) = &settings.locale.preferred {
        let locale = LocaleSuffix::parse(preferred).ok_or_else(|| {
            CascadeError::Config(format!(
                "locale must be two ASCII letters, got '{}'",
                preferred
            ))
        })?;
        debug!(inferred = ?headers.locale, preferred = %locale, "locale override");
        let replaced = headers
            .locale
            .as_ref()
            .map_or(true, |inferred| !inferred.as_str().eq_ignore_ascii_case(locale.as_str()));
        if replaced {
            let inferred = headers
                .locale
                .as_ref()
                .map_or_else(|| "none".to_string(), |l| format!("'{}'", l));
            notices.push(
                Diagnostic::info(format!(
                    "Using configured locale '{}' (headers suggest {})",
                    locale, inferred
                ))
                .with_code(codes::LOCALE_OVERRIDE),
            );
        }
        headers.locale = Some(locale);
    }
    info!(pattern = ?headers.pattern, locale = ?headers.locale, "inferred headers");

    let mut layout = locate_columns(
        grid.header(),
        selection.deepest_level,
        &headers.pattern,
        headers.locale.as_ref(),
        settings.locale.fallback,
    );
    let hierarchy = build_hierarchy(&grid, &layout.levels);
    notices.append(&mut layout.diagnostics);
    layout.diagnostics = notices;

    Ok(Extraction {
        selection,
        headers,
        layout,
        hierarchy,
    })
}

/// Convert `source` into a cascading selection sheet written to `sink`
///
/// The sink is saved even when some levels are empty; check
/// [`RunReport::complete`] for a fully successful run.
pub fn convert<S, W>(source: &S, sink: &mut W, settings: &Settings) -> Result<RunReport>
where
    S: DataSource + ?Sized,
    W: TableSink + ?Sized,
{
    let extraction = extract(source, settings)?;
    let sheet = extraction.cascade();
    let rows_written = sheet.write_to(sink)?;
    sink.save()?;

    let report = extraction.report(rows_written);
    for diagnostic in report.warnings() {
        warn!(code = ?diagnostic.code, level = ?diagnostic.level, "{}", diagnostic.message);
    }
    info!(
        rows = rows_written,
        records = report.total_records(),
        complete = report.complete,
        "conversion finished"
    );
    Ok(report)
}

/// Fail before any processing when the input is missing or the output
/// would be overwritten without permission
pub fn check_paths(input: &Path, output: &Path, overwrite: bool) -> Result<()> {
    if !input.exists() {
        return Err(CascadeError::InputNotFound(input.to_path_buf()));
    }
    if output.exists() && !overwrite {
        return Err(CascadeError::OutputAlreadyExists(output.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_check_paths_missing_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = check_paths(&dir.path().join("in.xlsx"), &dir.path().join("out.xlsx"), false);
        assert!(matches!(result, Err(CascadeError::InputNotFound(_))));
    }

    #[test]
    fn test_check_paths_existing_output() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.xlsx");
        let output = dir.path().join("out.xlsx");
        fs::write(&input, b"in").unwrap();
        fs::write(&output, b"out").unwrap();

        assert!(matches!(
            check_paths(&input, &output, false),
            Err(CascadeError::OutputAlreadyExists(_))
        ));
        assert!(check_paths(&input, &output, true).is_ok());
        assert_eq!(fs::read(&output).unwrap(), b"out");
    }
}
