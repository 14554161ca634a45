//! Non-fatal findings collected during a conversion run.
//!
//! A run keeps going when a level cannot be populated or when a record's
//! parent is missing; those findings end up here and in the run report.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable diagnostic codes
pub mod codes {
    /// A level's name or code column could not be located
    pub const MISSING_COLUMN: &str = "ADM001";
    /// A level produced no records
    pub const EMPTY_LEVEL: &str = "ADM002";
    /// A record's parent code does not exist at the level above
    pub const ORPHAN_RECORD: &str = "ADM003";
    /// The name column for a level was found under another locale
    pub const LOCALE_FALLBACK: &str = "ADM004";
    /// A configured locale replaced the one inferred from the headers
    pub const LOCALE_OVERRIDE: &str = "ADM005";
}

/// A diagnostic message from a conversion run
///
/// # Example
///
/// ```
/// use admcascade_core::diagnostics::{codes, Diagnostic, Severity};
///
/// let diag = Diagnostic::warning("Level 2 produced no records")
///     .with_code(codes::EMPTY_LEVEL)
///     .with_level(2);
/// assert_eq!(diag.severity, Severity::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level of the diagnostic
    pub severity: Severity,

    /// The diagnostic message
    pub message: String,

    /// Diagnostic code (see [`codes`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Admin level the diagnostic refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    /// Additional help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Related notes (sheet rows, header names)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// Severity level of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// The output is usable but degraded
    Warning,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            code: None,
            level: None,
            help: None,
            notes: Vec::new(),
        }
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Create an info diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Set the diagnostic code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the admin level
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Check if this is a warning-level diagnostic
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }

    /// Check whether the diagnostic carries the given code
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = &self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;
        for note in &self.notes {
            write!(f, "\n  = note: {}", note)?;
        }
        if let Some(help) = &self.help {
            write!(f, "\n  = help: {}", help)?;
        }
        Ok(())
    }
}
