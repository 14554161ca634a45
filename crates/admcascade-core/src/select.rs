//! Sheet selection
//!
//! Source workbooks usually carry one sheet per admin level, named with a
//! shared prefix and the level number (`Admin0`, `Admin1`, ... or
//! `xxx_pop_adm0`, `xxx_pop_adm1`, ...). The sheet of the deepest level
//! holds the full ancestry on every row, so it is the only one read.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{CascadeError, Result};
use crate::settings::SheetOrder;

/// The sheet chosen for extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSelection {
    /// Name of the selected sheet
    pub sheet_name: String,
    /// Naming prefix shared by the admin-level sheets
    pub prefix: String,
    /// Deepest admin level (N)
    pub deepest_level: u32,
}

/// Most frequent value, ties broken by first appearance
///
/// Returns `None` for an empty input.
pub fn most_common<I, S>(values: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for value in values {
        let value = value.as_ref();
        match counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                counts.insert(value.to_string(), 1);
                order.push(value.to_string());
            }
        }
    }

    let mut best: Option<(&String, usize)> = None;
    for value in &order {
        let count = counts[value];
        // Strictly greater keeps the earliest value on ties
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v.clone())
}

/// Remove every ASCII digit from `s`
pub(crate) fn strip_digits(s: &str) -> String {
    s.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Level number made of every ASCII digit in `s`, if any
pub(crate) fn level_number(s: &str) -> Option<u32> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Pick the sheet holding the deepest admin level
///
/// The naming prefix is the most common sheet name once digits are removed.
/// Among sheets starting with that prefix and carrying a level number, the
/// deepest is chosen according to `order`.
pub fn select_sheet(sheet_names: &[String], order: SheetOrder) -> Result<SheetSelection> {
    let prefix = most_common(sheet_names.iter().map(|s| strip_digits(s)))
        .ok_or_else(|| CascadeError::NoMatchingSheet(sheet_names.to_vec()))?;

    let candidates: Vec<(u32, &String)> = sheet_names
        .iter()
        .filter(|name| name.starts_with(&prefix))
        .filter_map(|name| level_number(name).map(|level| (level, name)))
        .collect();
    debug!(prefix = %prefix, candidates = candidates.len(), "sheet naming prefix");

    let deepest = match order {
        SheetOrder::Numeric => candidates
            .into_iter()
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1))),
        SheetOrder::Lexicographic => candidates.into_iter().max_by(|a, b| a.1.cmp(b.1)),
    };

    let (deepest_level, sheet_name) =
        deepest.ok_or_else(|| CascadeError::NoMatchingSheet(sheet_names.to_vec()))?;

    Ok(SheetSelection {
        sheet_name: sheet_name.clone(),
        prefix,
        deepest_level,
    })
}
