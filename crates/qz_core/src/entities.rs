//! Answer and result-record entities.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{Category, PreferenceCode};

/// One submitted response: the question's category and the selected
/// preference strength. Ephemeral; folded into scores and dropped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Answer {
    pub category: Category,
    pub weight: u32,
}

impl Answer {
    pub const fn new(category: Category, weight: u32) -> Self {
        Self { category, weight }
    }
}

/// A published record reachable from one preference code. Read-only.
///
/// Fields beyond the fixed four go in `extra`; any other key is rejected.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ResultRecord {
    pub code_1: String,
    pub title_1: String,
    pub code_2: String,
    pub title_2: String,
    /// Trailing display fields beyond the fixed four, in source order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub extra: Vec<String>,
}

impl ResultRecord {
    pub fn new(
        code_1: impl Into<String>,
        title_1: impl Into<String>,
        code_2: impl Into<String>,
        title_2: impl Into<String>,
    ) -> Self {
        Self {
            code_1: code_1.into(),
            title_1: title_1.into(),
            code_2: code_2.into(),
            title_2: title_2.into(),
            extra: Vec::new(),
        }
    }
}

/// Fully materialized code → records table (key order is code order).
pub type ResultTable = BTreeMap<PreferenceCode, Vec<ResultRecord>>;
