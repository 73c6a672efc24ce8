//! qz_pipeline: deterministic pipeline surface (accumulate→rank→enumerate→resolve→label).
//! This crate stays I/O-free: the lookup table arrives fully materialized and
//! file formats live in `qz_io`. Progress is reported through `tracing` only.

use std::fmt;

use qz_core::CoreError;

pub mod cascade;
pub mod engine;
pub mod resolve;

pub use cascade::{run_cascade, CaseAttempt, CascadeOutcome};
pub use engine::{resolve_scores, EngineState, QuizEngine, Resolution};
pub use resolve::{LabeledResult, LookupTable, ResultResolver};

pub use qz_algo::{Answer, RankTiers, ScoreVector, Tier, TieCase};
pub use qz_core::{Category, CategoryLabels, EngineConfig, PreferenceCode, ResultRecord, ResultTable};

/// Single error surface for the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// Domain failure from the core (e.g. an out-of-range category).
    Core(CoreError),
    /// `record`/`finish` called after the run already resolved.
    AlreadyResolved,
    /// Results requested before `finish`.
    NotResolved,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Core(e) => write!(f, "{e}"),
            EngineError::AlreadyResolved => write!(f, "quiz run already resolved; reset to start a new run"),
            EngineError::NotResolved => write!(f, "quiz run not resolved yet"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<CoreError> for EngineError {
    fn from(e: CoreError) -> Self {
        EngineError::Core(e)
    }
}
