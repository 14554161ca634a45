//! Run settings
//!
//! Settings can be loaded from a TOML file; every key is optional:
//!
//! ```toml
//! [selection]
//! sheet_order = "numeric"
//!
//! [locale]
//! preferred = "en"
//! fallback = true
//!
//! [output]
//! sheet_name = "choices"
//! ```

use std::fs;
use std::path::Path;

use admcascade_data::DataError;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How candidate sheets are ranked to find the deepest admin level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SheetOrder {
    /// By the level number parsed from the sheet name
    #[default]
    Numeric,
    /// By plain string comparison of sheet names
    Lexicographic,
}

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Sheet selection settings
    pub selection: SelectionSettings,
    /// Locale settings
    pub locale: LocaleSettings,
    /// Output document settings
    pub output: OutputSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(DataError::from)?;
        Self::from_toml_str(&content)
    }
}

/// Sheet selection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SelectionSettings {
    /// Ranking used to pick the deepest level sheet
    pub sheet_order: SheetOrder,
}

/// Locale configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleSettings {
    /// Two-letter locale to use instead of the inferred one
    pub preferred: Option<String>,
    /// Fall back to another locale (or an untagged name column) when the
    /// chosen locale is missing for a level
    pub fallback: bool,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            preferred: None,
            fallback: true,
        }
    }
}

/// Output document configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Name of the single sheet in an XLSX output
    pub sheet_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            sheet_name: "choices".to_string(),
        }
    }
}
