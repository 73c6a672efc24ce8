// crates/qz_cli/src/main.rs
//
// Load settings, table and answers → accumulate page by page → resolve → render.
// Exit codes are stable for scripts; see `exitcodes`.

mod args;
mod render;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Bad flags, malformed JSON, or input outside its domain.
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    /// Engine refused a step (state or category).
    pub const ENGINE: i32 = 5;
}

use std::fs;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use args::{parse_and_validate as parse_cli, Args, CliError};
use qz_io::prelude::*;
use qz_pipeline::{EngineError, QuizEngine};
use render::{render, RenderOptions};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    Validation(String),
    Io(String),
    Engine(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) | MainError::Io(m) | MainError::Engine(m) => f.write_str(m),
        }
    }
}

impl From<IoError> for MainError {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Path(m) => MainError::Io(format!("path: {m}")),
            IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
            IoError::Invalid(m) => MainError::Validation(format!("invalid: {m}")),
        }
    }
}

impl From<EngineError> for MainError {
    fn from(e: EngineError) -> Self {
        MainError::Engine(e.to_string())
    }
}

impl From<CliError> for MainError {
    fn from(e: CliError) -> Self {
        match e {
            CliError::NotFound(_) => MainError::Io(e.to_string()),
            CliError::NonLocalPath(_) => MainError::Validation(e.to_string()),
        }
    }
}

fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Engine(_) => ENGINE,
    }
}

fn init_tracing(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qz=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> ExitCode {
    let rc = match parse_cli() {
        Ok(args) => {
            init_tracing(args.quiet);
            match run(&args) {
                Ok(()) => exitcodes::OK,
                Err(e) => {
                    error!("{e}");
                    map_error(&e)
                }
            }
        }
        Err(e) => {
            // Logging is not set up before flags are known.
            eprintln!("qz: error: {e}");
            map_error(&MainError::from(e))
        }
    };
    ExitCode::from(rc as u8)
}

fn run(args: &Args) -> Result<(), MainError> {
    let settings = match &args.settings {
        Some(p) => load_settings(p)?,
        None => Settings::default(),
    };
    let table = load_table(&args.table, settings.engine.radix())?;
    let sheet = load_answers(&args.answers, &settings)?;
    info!(codes = table.len(), pages = sheet.pages.len(), answers = sheet.answer_count(), "inputs loaded");

    if args.validate_only {
        info!("validate-only: inputs OK");
        return Ok(());
    }

    let mut engine = QuizEngine::new(settings.engine.clone(), settings.initials.clone(), table);
    for page in &sheet.pages {
        engine.record_batch(page)?;
    }
    let res = engine.finish()?;

    let opts = RenderOptions {
        format: args.format,
        show_scores: args.show_scores,
        labels: &settings.initials,
        links: &settings.links,
    };
    let text = render(res, &opts).map_err(|e| MainError::Io(format!("render: {e}")))?;

    match &args.out {
        Some(path) => {
            fs::write(path, text).map_err(|e| MainError::Io(format!("write {}: {e}", path.display())))?;
            info!(path = %path.display(), "result written");
        }
        None => print!("{text}"),
    }
    Ok(())
}
