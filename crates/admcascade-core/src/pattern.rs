//! Header pattern inference
//!
//! Admin boundary tables name their columns by convention rather than by
//! schema: `ADM1_PCODE` / `ADM1_EN`, `Admin1Pcode` / `Admin1Name_en`, and so
//! on. Given the deepest level N, every header containing the digits of N is
//! split around them to learn the text surrounding the level number for the
//! code column and for the name column. The locale tag (`_en`, `_FR`, ...)
//! on name columns is learned separately across all levels.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::select::most_common;

/// Literal text around the level number in a column header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affix {
    /// Text before the level number
    pub prefix: String,
    /// Text after the level number
    pub suffix: String,
}

impl Affix {
    /// Create an affix pair
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Rebuild the header for `level`
    pub fn header(&self, level: u32) -> String {
        format!("{}{}{}", self.prefix, level, self.suffix)
    }
}

/// Code and name column conventions of a source sheet
///
/// Either side may be missing when no header matched; lookups for that side
/// then find nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnPattern {
    /// Affixes of the code column (`ADM` + L + `_PCODE`)
    pub code: Option<Affix>,
    /// Affixes of the name column, locale tag excluded
    pub name: Option<Affix>,
}

impl ColumnPattern {
    /// Exact header of the code column for `level`
    pub fn code_header(&self, level: u32) -> Option<String> {
        self.code.as_ref().map(|affix| affix.header(level))
    }

    /// Header of the name column for `level` without any locale tag
    pub fn name_stem(&self, level: u32) -> Option<String> {
        self.name.as_ref().map(|affix| affix.header(level))
    }

    /// Exact header of the name column for `level` in `locale`
    pub fn name_header(&self, level: u32, locale: &LocaleSuffix) -> Option<String> {
        self.name_stem(level)
            .map(|stem| format!("{}_{}", stem, locale.as_str()))
    }

    /// Prefix used for list names in the cascade output
    ///
    /// Falls back to the code prefix, then to `admin`, when no name
    /// column convention was found.
    pub fn list_prefix(&self) -> &str {
        self.name
            .as_ref()
            .or(self.code.as_ref())
            .map(|affix| affix.prefix.as_str())
            .unwrap_or("admin")
    }
}

/// Two-letter locale tag selecting one language variant of the name columns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LocaleSuffix(String);

impl LocaleSuffix {
    /// Accept exactly two ASCII letters, case preserved
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.len() == 2 && tag.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Self(tag.to_string()))
        } else {
            None
        }
    }

    /// The tag as written in the headers
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of header inference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InferredHeaders {
    /// Column conventions
    pub pattern: ColumnPattern,
    /// Dominant locale on name columns, if any name column is tagged
    pub locale: Option<LocaleSuffix>,
}

/// Split a trailing `_xx` locale tag off a header
///
/// Returns `(stem, tag)`; `None` when the header does not end in an
/// underscore followed by two ASCII letters.
pub(crate) fn split_locale_tag(header: &str) -> Option<(&str, &str)> {
    let bytes = header.as_bytes();
    let len = bytes.len();
    if len < 3 {
        return None;
    }
    let tagged = bytes[len - 3] == b'_'
        && bytes[len - 2].is_ascii_alphabetic()
        && bytes[len - 1].is_ascii_alphabetic();
    // The last three bytes are ASCII, so these are char boundaries
    tagged.then(|| (&header[..len - 3], &header[len - 2..]))
}

/// Learn the code and name column affixes from the header row
///
/// Headers containing the digits of `deepest_level` are split around the
/// first occurrence. `PCODE` headers give the code affixes; `ALT`/`REF`
/// headers (alternate and reference names) are skipped; any other header is
/// taken as the name column, with its locale tag removed. The first match
/// of each kind wins.
pub fn infer_pattern(header: &[String], deepest_level: u32) -> ColumnPattern {
    let digits = deepest_level.to_string();
    let mut pattern = ColumnPattern::default();

    for text in header {
        let Some((before, after)) = text.split_once(digits.as_str()) else {
            continue;
        };
        let upper = text.to_ascii_uppercase();

        if upper.contains("PCODE") {
            if pattern.code.is_none() {
                debug!(header = %text, "code column pattern");
                pattern.code = Some(Affix::new(before, after));
            }
        } else if upper.contains("ALT") || upper.contains("REF") {
            continue;
        } else if pattern.name.is_none() {
            let suffix = split_locale_tag(after).map_or(after, |(stem, _)| stem);
            debug!(header = %text, "name column pattern");
            pattern.name = Some(Affix::new(before, suffix));
        }
    }

    pattern
}

/// Find the most frequent locale tag on name columns across levels `0..=N`
///
/// Matching is case-insensitive; the winner is returned in the casing it
/// first appeared with.
pub fn infer_locale(
    header: &[String],
    deepest_level: u32,
    pattern: &ColumnPattern,
) -> Option<LocaleSuffix> {
    let mut tags: Vec<&str> = Vec::new();

    for level in 0..=deepest_level {
        let Some(stem) = pattern.name_stem(level) else {
            return None;
        };
        for text in header {
            if let Some((head, tag)) = split_locale_tag(text) {
                if head.eq_ignore_ascii_case(&stem) {
                    tags.push(tag);
                }
            }
        }
    }

    let winner = most_common(tags.iter().map(|t| t.to_ascii_lowercase()))?;
    tags.iter()
        .find(|t| t.eq_ignore_ascii_case(&winner))
        .and_then(|t| LocaleSuffix::parse(t))
}

/// Infer the column pattern and locale from a header row
pub fn infer_headers(header: &[String], deepest_level: u32) -> InferredHeaders {
    let pattern = infer_pattern(header, deepest_level);
    let locale = infer_locale(header, deepest_level, &pattern);
    InferredHeaders { pattern, locale }
}
