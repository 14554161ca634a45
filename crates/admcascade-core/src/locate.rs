//! Column location
//!
//! Resolves, for every level 0..=N, which header column holds the level's
//! code and which holds its localized name.

use admcascade_data::column_name;
use serde::Serialize;
use tracing::debug;

use crate::diagnostics::{codes, Diagnostic};
use crate::pattern::{split_locale_tag, ColumnPattern, LocaleSuffix};

/// Column indices for one admin level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelColumns {
    /// Admin level
    pub level: u32,
    /// Index of the code column, if found
    pub code: Option<usize>,
    /// Index of the name column, if found
    pub name: Option<usize>,
}

impl LevelColumns {
    /// Both columns are present
    pub fn is_complete(&self) -> bool {
        self.code.is_some() && self.name.is_some()
    }
}

/// Located columns plus the findings made while locating them
#[derive(Debug, Clone, Default)]
pub struct ColumnLayout {
    /// One entry per level, shallowest first
    pub levels: Vec<LevelColumns>,
    /// Missing-column and locale findings
    pub diagnostics: Vec<Diagnostic>,
}

impl ColumnLayout {
    /// Columns for `level`
    pub fn level(&self, level: u32) -> Option<&LevelColumns> {
        self.levels.get(level as usize)
    }
}

fn position(header: &[String], target: &str) -> Option<usize> {
    header.iter().position(|h| h == target)
}

/// Exact match first, then ignoring ASCII case (`_fr` finds `_FR`)
fn position_any_case(header: &[String], target: &str) -> Option<usize> {
    position(header, target)
        .or_else(|| header.iter().position(|h| h.eq_ignore_ascii_case(target)))
}

/// First name column for the level tagged with any locale
fn any_tagged(header: &[String], stem: &str) -> Option<usize> {
    header.iter().position(|h| {
        split_locale_tag(h).is_some_and(|(head, _)| head == stem)
    })
}

/// Locate the code and name columns for levels `0..=deepest_level`
///
/// Code columns are matched exactly against the code pattern. Name columns
/// are matched against the pattern plus `_` plus the locale, ignoring ASCII
/// case in a second pass. When that header is absent and `fallback` is set,
/// the first name column of the level in another locale is used, then the
/// untagged name column. Without a locale only the untagged name column is
/// accepted.
pub fn locate_columns(
    header: &[String],
    deepest_level: u32,
    pattern: &ColumnPattern,
    locale: Option<&LocaleSuffix>,
    fallback: bool,
) -> ColumnLayout {
    let mut layout = ColumnLayout::default();

    for level in 0..=deepest_level {
        let code_header = pattern.code_header(level);
        let code = code_header.as_deref().and_then(|h| position(header, h));

        let stem = pattern.name_stem(level);
        let exact = match (locale, stem.as_deref()) {
            (Some(locale), Some(_)) => pattern.name_header(level, locale),
            (None, Some(stem)) => Some(stem.to_string()),
            (_, None) => None,
        };
        let mut name = exact.as_deref().and_then(|h| position_any_case(header, h));

        if name.is_none() && fallback {
            if let (Some(stem), Some(locale)) = (stem.as_deref(), locale) {
                name = any_tagged(header, stem).or_else(|| position(header, stem));
                if let Some(idx) = name {
                    layout.diagnostics.push(
                        Diagnostic::warning(format!(
                            "No '{}' name column for level {}; using '{}' instead",
                            locale, level, header[idx]
                        ))
                        .with_code(codes::LOCALE_FALLBACK)
                        .with_level(level)
                        .with_note(format!("column {}", column_name(idx))),
                    );
                }
            }
        }

        if code.is_none() {
            layout.diagnostics.push(missing_column(level, "code", code_header));
        }
        if name.is_none() {
            layout.diagnostics.push(missing_column(level, "name", exact));
        }

        debug!(level, ?code, ?name, "located columns");
        layout.levels.push(LevelColumns { level, code, name });
    }

    layout
}

fn missing_column(level: u32, kind: &str, expected: Option<String>) -> Diagnostic {
    let diag = Diagnostic::warning(format!("No {} column found for level {}", kind, level))
        .with_code(codes::MISSING_COLUMN)
        .with_level(level)
        .with_help("This level will produce no records");
    match expected {
        Some(header) => diag.with_note(format!("expected a header named '{}'", header)),
        None => diag.with_note(format!("no {} column convention was inferred", kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{infer_headers, Affix};

    fn header(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn adm_pattern() -> ColumnPattern {
        ColumnPattern {
            code: Some(Affix::new("ADM", "_PCODE")),
            name: Some(Affix::new("ADM", "")),
        }
    }

    #[test]
    fn test_locate_exact_columns() {
        let h = header(&["ADM1_EN", "ADM1_PCODE", "ADM0_EN", "ADM0_PCODE"]);
        let en = LocaleSuffix::parse("EN").unwrap();
        let layout = locate_columns(&h, 1, &adm_pattern(), Some(&en), true);

        assert_eq!(
            layout.levels,
            vec![
                LevelColumns { level: 0, code: Some(3), name: Some(2) },
                LevelColumns { level: 1, code: Some(1), name: Some(0) },
            ]
        );
        assert!(layout.diagnostics.is_empty());
    }

    #[test]
    fn test_locate_header_round_trip() {
        let h = header(&["Admin0Name_en", "Admin0Pcode", "Admin1Name_en", "Admin1Pcode"]);
        let inferred = infer_headers(&h, 1);
        let layout = locate_columns(&h, 1, &inferred.pattern, inferred.locale.as_ref(), true);

        assert_eq!(layout.level(0).unwrap().name, Some(0));
        assert_eq!(layout.level(0).unwrap().code, Some(1));
        assert_eq!(layout.level(1).unwrap().name, Some(2));
        assert_eq!(layout.level(1).unwrap().code, Some(3));
    }

    #[test]
    fn test_code_match_is_exact() {
        let h = header(&["ADM0_EN", "ADM0_PCODE_OLD", "adm0_pcode"]);
        let en = LocaleSuffix::parse("EN").unwrap();
        let layout = locate_columns(&h, 0, &adm_pattern(), Some(&en), true);

        assert_eq!(layout.levels[0].code, None);
        assert!(layout.diagnostics[0].has_code(codes::MISSING_COLUMN));
        assert!(layout.diagnostics[0].message.contains("code"));
    }

    #[test]
    fn test_locale_tag_case_is_ignored() {
        let h = header(&["ADM0_EN", "ADM0_FR", "ADM0_PCODE"]);
        let fr = LocaleSuffix::parse("fr").unwrap();
        let layout = locate_columns(&h, 0, &adm_pattern(), Some(&fr), true);

        assert_eq!(layout.levels[0].name, Some(1));
        assert!(layout.diagnostics.is_empty());
    }

    #[test]
    fn test_locale_fallback_to_other_locale() {
        let h = header(&["ADM1_EN", "ADM1_PCODE", "ADM0_FR", "ADM0_PCODE"]);
        let en = LocaleSuffix::parse("EN").unwrap();
        let layout = locate_columns(&h, 1, &adm_pattern(), Some(&en), true);

        assert_eq!(layout.levels[0].name, Some(2));
        assert_eq!(layout.diagnostics.len(), 1);
        assert!(layout.diagnostics[0].has_code(codes::LOCALE_FALLBACK));
        assert_eq!(layout.diagnostics[0].level, Some(0));
        assert_eq!(layout.diagnostics[0].notes, vec!["column C".to_string()]);
    }

    #[test]
    fn test_locale_fallback_to_untagged() {
        let h = header(&["Admin1Name_en", "Admin1Pcode", "Admin0Name", "Admin0Pcode"]);
        let pattern = ColumnPattern {
            code: Some(Affix::new("Admin", "Pcode")),
            name: Some(Affix::new("Admin", "Name")),
        };
        let en = LocaleSuffix::parse("en").unwrap();
        let layout = locate_columns(&h, 1, &pattern, Some(&en), true);

        assert_eq!(layout.levels[0].name, Some(2));
        assert!(layout.diagnostics[0].has_code(codes::LOCALE_FALLBACK));
    }

    #[test]
    fn test_locale_fallback_disabled() {
        let h = header(&["ADM1_EN", "ADM1_PCODE", "ADM0_FR", "ADM0_PCODE"]);
        let en = LocaleSuffix::parse("EN").unwrap();
        let layout = locate_columns(&h, 1, &adm_pattern(), Some(&en), false);

        assert_eq!(layout.levels[0].name, None);
        assert!(!layout.levels[0].is_complete());
        assert!(layout.levels[1].is_complete());
        assert_eq!(layout.diagnostics.len(), 1);
        assert!(layout.diagnostics[0].has_code(codes::MISSING_COLUMN));
        assert_eq!(layout.diagnostics[0].notes, vec!["expected a header named 'ADM0_EN'".to_string()]);
    }

    #[test]
    fn test_untagged_convention_without_locale() {
        let h = header(&["Province0Name", "Province0_PCODE", "Province1Name", "Province1_PCODE"]);
        let pattern = ColumnPattern {
            code: Some(Affix::new("Province", "_PCODE")),
            name: Some(Affix::new("Province", "Name")),
        };
        let layout = locate_columns(&h, 1, &pattern, None, true);

        assert!(layout.levels.iter().all(LevelColumns::is_complete));
        assert!(layout.diagnostics.is_empty());
    }

    #[test]
    fn test_no_locale_never_guesses_a_tagged_column() {
        let h = header(&["ADM0_EN", "ADM0_PCODE"]);
        let layout = locate_columns(&h, 0, &adm_pattern(), None, true);

        assert_eq!(layout.levels[0].name, None);
        assert_eq!(layout.diagnostics.len(), 1);
        assert!(layout.diagnostics[0].has_code(codes::MISSING_COLUMN));
        assert_eq!(layout.diagnostics[0].notes, vec!["expected a header named 'ADM0'".to_string()]);
    }

    #[test]
    fn test_missing_pattern_reports_every_level() {
        let h = header(&["name", "code"]);
        let layout = locate_columns(&h, 2, &ColumnPattern::default(), None, true);

        assert_eq!(layout.levels.len(), 3);
        assert!(layout.levels.iter().all(|l| l.code.is_none() && l.name.is_none()));
        assert_eq!(layout.diagnostics.len(), 6);
    }
}
