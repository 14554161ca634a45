//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use admcascade_core::diagnostics::codes;
use admcascade_core::{check_paths, convert, RunReport, Settings, SheetOrder};
use admcascade_data::{open_sink, ExcelSource};

/// Output format for the run report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON run report for tool consumption
    Json,
}

/// Sheet ranking accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SheetOrderArg {
    /// By the level number in the sheet name
    Numeric,
    /// By plain string comparison
    Lexicographic,
}

impl From<SheetOrderArg> for SheetOrder {
    fn from(arg: SheetOrderArg) -> Self {
        match arg {
            SheetOrderArg::Numeric => SheetOrder::Numeric,
            SheetOrderArg::Lexicographic => SheetOrder::Lexicographic,
        }
    }
}

#[derive(Parser)]
#[command(name = "admcascade")]
#[command(author, version, about = "Admin boundary tables to cascading select lists", long_about = None)]
struct Cli {
    /// Source workbook (.xlsx, .xls, .ods)
    input: PathBuf,

    /// Output file (.csv for CSV, anything else for XLSX)
    output: PathBuf,

    /// Replace the output file if it already exists
    #[arg(long)]
    overwrite: bool,

    /// Print trace output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Report format (text or json)
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Two-letter locale for name columns (overrides the inferred one)
    #[arg(long)]
    locale: Option<String>,

    /// How to rank sheets when picking the deepest level
    #[arg(long, value_enum)]
    sheet_order: Option<SheetOrderArg>,
}

/// Options for a single conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Replace an existing output file
    pub overwrite: bool,
    /// TOML settings file
    pub config: Option<PathBuf>,
    /// Locale override
    pub locale: Option<String>,
    /// Sheet ranking override
    pub sheet_order: Option<SheetOrder>,
}

impl ConvertOptions {
    /// Settings from the config file (or defaults) with CLI overrides applied
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => Settings::default(),
        };
        if let Some(locale) = &self.locale {
            settings.locale.preferred = Some(locale.clone());
        }
        if let Some(order) = self.sheet_order {
            settings.selection.sheet_order = order;
        }
        Ok(settings)
    }
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ConvertOptions {
        overwrite: cli.overwrite,
        config: cli.config,
        locale: cli.locale,
        sheet_order: cli.sheet_order.map(SheetOrder::from),
    };

    let report = convert_command(&cli.input, &cli.output, &options)?;

    match cli.format {
        OutputFormat::Text => {
            print!("{}", render_text(&report, &cli.output, cli.verbose));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
    }

    for line in warning_summary(&report) {
        eprintln!("{}", line);
    }

    Ok(())
}

/// One stderr line per kind of degraded output
///
/// Empty levels, orphaned records and locale fallbacks are summarised here
/// so they show up without `--verbose`.
pub fn warning_summary(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.complete {
        lines.push(format!(
            "Warning: not every admin level produced records (empty levels: {})",
            join_levels(&report.empty_levels())
        ));
    }

    let orphans = levels_with(report, codes::ORPHAN_RECORD);
    if !orphans.is_empty() {
        lines.push(format!(
            "Warning: some records have no parent at the level above (levels: {}); \
             run with --verbose for details",
            join_levels(&orphans)
        ));
    }

    let fallbacks = levels_with(report, codes::LOCALE_FALLBACK);
    if !fallbacks.is_empty() {
        lines.push(format!(
            "Warning: names taken from another locale's column (levels: {})",
            join_levels(&fallbacks)
        ));
    }

    lines
}

/// Levels carrying a diagnostic with `code`, in report order
fn levels_with(report: &RunReport, code: &str) -> Vec<u32> {
    let mut levels: Vec<u32> = report
        .diagnostics
        .iter()
        .filter(|d| d.has_code(code))
        .filter_map(|d| d.level)
        .collect();
    levels.dedup();
    levels
}

/// Install the stderr subscriber; silent unless `verbose` or `RUST_LOG`
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    };

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute a conversion from `input` to `output`
///
/// Fails before reading anything when the input is missing or the output
/// exists without `overwrite`.
pub fn convert_command(input: &Path, output: &Path, options: &ConvertOptions) -> Result<RunReport> {
    check_paths(input, output, options.overwrite)?;
    let settings = options.settings()?;
    debug!(?settings, "effective settings");

    let source = ExcelSource::new(input)
        .with_context(|| format!("Failed to open workbook: {}", input.display()))?;
    let mut sink = open_sink(output, &settings.output.sheet_name)
        .with_context(|| format!("Failed to prepare output: {}", output.display()))?;

    let report = convert(&source, &mut sink, &settings)
        .with_context(|| format!("Failed to convert: {}", input.display()))?;

    Ok(report)
}

/// Render the run report for humans
///
/// Diagnostics are only listed when `verbose` is set.
pub fn render_text(report: &RunReport, output: &Path, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "admcascade v{}", admcascade_core::VERSION);
    let _ = writeln!(
        out,
        "  Sheet: {} (deepest level {})",
        report.sheet, report.deepest_level
    );
    if let Some(locale) = &report.locale {
        let _ = writeln!(out, "  Locale: {}", locale);
    }
    for level in &report.levels {
        let _ = writeln!(
            out,
            "  Level {} ({}): {} record(s)",
            level.level, level.list_name, level.records
        );
    }
    if verbose {
        for diagnostic in &report.diagnostics {
            let _ = writeln!(out, "{}", diagnostic);
        }
    }
    let _ = writeln!(out, "  Created: {}", output.display());
    out
}

fn join_levels(levels: &[u32]) -> String {
    levels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
