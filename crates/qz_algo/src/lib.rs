// crates/qz_algo/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

// Core IDs and entities
pub use qz_core::{Answer, Category, CoreError, EngineConfig, PreferenceCode};

// ----------------------------- Accumulation -----------------------------------------

/// Per-category cumulative scores for one quiz run.
pub mod accumulate;
pub use accumulate::{ScoreAccumulator, ScoreVector};

// ----------------------------- Ranking ----------------------------------------------

/// Distinct-score tiers (ties grouped together), highest first.
pub mod rank;
pub use rank::{rank_tiers, RankTiers, Tier};

// ----------------------------- Code enumeration -------------------------------------

/// Tie cases and the candidate preference codes each one generates.
pub mod codes;
pub use codes::{permutations, Candidate, TieCase};
