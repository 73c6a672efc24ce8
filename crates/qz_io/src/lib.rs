//! crates/qz_io/src/lib.rs
//! Local, offline inputs for the quiz engine.
//!
//! - `settings`: engine configuration, category initials, weight cap, link templates
//! - `table`: code → records lookup table
//! - `answers`: answer sheets (flat list or pages)
//!
//! Shared error type (`IoError`) with `From` conversions used across modules.
//! No network I/O; every loader takes a local path or an in-memory string.

#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Unified error for qz_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors.
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON deserialization errors with a JSON Pointer-ish location.
    #[error("json error at {pointer}: {msg}")]
    Json {
        pointer: String,
        msg: String,
    },

    /// Well-formed JSON that breaks a domain rule.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json does not track a pointer; report the root and keep line/column in msg.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

/// Read a local UTF-8 file, tagging failures with the path.
pub(crate) fn read_to_string(path: &Path) -> IoResult<String> {
    fs::read_to_string(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))
}

pub mod answers;
pub mod settings;
pub mod table;

pub mod prelude {
    pub use crate::{IoError, IoResult};

    pub use crate::answers::{load_answers, parse_answers, AnswerSheet};
    pub use crate::settings::{load_settings, parse_settings, LinkTemplates, Settings};
    pub use crate::table::{load_table, parse_table};
}
