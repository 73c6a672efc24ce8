// crates/qz_cli/src/args.rs
//
// Offline CLI argument surface and pre-flight checks.
// - All inputs are local files (reject any scheme:// path)
// - --table and --answers are required; --settings is optional (engine defaults)
// - --validate-only loads and checks inputs without resolving

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    Json,
    Text,
}

/// Parsed CLI arguments.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "qz",
    disable_help_subcommand = true,
    about = "Score a preference quiz and resolve it against a lookup table"
)]
pub struct Args {
    // --- Inputs ---
    /// Settings JSON (engine config, initials, max weight, link templates).
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Lookup table JSON (decimal code → records).
    #[arg(long)]
    pub table: PathBuf,
    /// Answer sheet JSON (flat array or array of pages).
    #[arg(long)]
    pub answers: PathBuf,

    // --- Output ---
    /// Write the rendered result here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
    /// Include final scores and rank tiers in the output.
    #[arg(long)]
    pub show_scores: bool,

    // --- Control ---
    /// Load and validate inputs only; do not resolve.
    #[arg(long)]
    pub validate_only: bool,
    /// Only log warnings and errors.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            CliError::NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    match fs::metadata(p) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(CliError::NotFound(format!("{label} {}", p.display()))),
    }
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

fn validate(args: Args) -> Result<Args, CliError> {
    if let Some(s) = &args.settings {
        ensure_local_exists(s, "--settings")?;
    }
    ensure_local_exists(&args.table, "--table")?;
    ensure_local_exists(&args.answers, "--answers")?;
    if let Some(out) = &args.out {
        ensure_local_path(out)?;
    }
    Ok(args)
}
