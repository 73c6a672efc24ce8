// --------------------------------------------------------------------------------
// FILE: crates/qz_algo/src/accumulate.rs
// --------------------------------------------------------------------------------
//! Score accumulation (deterministic, integers-only).
//!
//! Inputs:
//! - a stream of `Answer { category, weight }`
//!
//! Output:
//! - `ScoreVector`: one cumulative `u64` per configured category, index order.
//!
//! Rules in this layer:
//! - Reject categories outside `0..category_count` with no partial update.
//! - Weights are not bounded here (the caller validates preference levels).
//! - Sums saturate instead of wrapping.
//!
//! Accumulation is a commutative fold: feed order does not change the vector.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use qz_core::{Answer, Category, CoreError, EngineConfig};

/// Immutable per-category score snapshot (index = category).
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ScoreVector(Vec<u64>);

impl ScoreVector {
    pub fn zeros(category_count: u8) -> Self {
        Self(vec![0; usize::from(category_count)])
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn as_slice(&self) -> &[u64] { &self.0 }

    pub fn get(&self, c: Category) -> Option<u64> {
        self.0.get(c.index()).copied()
    }

    /// `(category, score)` pairs in category order.
    ///
    /// Stops at the last index a `Category` can name; entries past it are not
    /// categories.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map_while(|(i, &s)| u8::try_from(i).ok().map(|i| (Category::new(i), s)))
    }
}

impl From<Vec<u64>> for ScoreVector {
    fn from(v: Vec<u64>) -> Self { Self(v) }
}

/// Owns the score vector of one quiz run.
#[derive(Clone, Debug)]
pub struct ScoreAccumulator {
    category_count: u8,
    scores: Vec<u64>,
}

impl ScoreAccumulator {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self::with_category_count(cfg.category_count())
    }

    pub fn with_category_count(category_count: u8) -> Self {
        Self { category_count, scores: vec![0; usize::from(category_count)] }
    }

    pub fn category_count(&self) -> u8 { self.category_count }

    /// Zero every score (start of a run).
    pub fn reset(&mut self) {
        self.scores.iter_mut().for_each(|s| *s = 0);
    }

    /// Fold one answer in. Out-of-domain categories leave the vector untouched.
    pub fn record(&mut self, answer: Answer) -> Result<(), CoreError> {
        let idx = self.check(answer.category)?;
        self.add(idx, answer.weight);
        Ok(())
    }

    /// Fold a whole page of answers in, or none of them.
    pub fn record_batch(&mut self, answers: &[Answer]) -> Result<(), CoreError> {
        for a in answers {
            self.check(a.category)?;
        }
        for a in answers {
            self.add(a.category.index(), a.weight);
        }
        Ok(())
    }

    /// Read-only view of the live scores.
    pub fn scores(&self) -> &[u64] { &self.scores }

    /// Copy for downstream ranking; does not reset.
    pub fn snapshot(&self) -> ScoreVector {
        ScoreVector(self.scores.clone())
    }

    fn check(&self, c: Category) -> Result<usize, CoreError> {
        if c.get() < self.category_count {
            Ok(c.index())
        } else {
            Err(CoreError::InvalidCategory {
                category: u32::from(c.get()),
                category_count: self.category_count,
            })
        }
    }

    #[inline]
    fn add(&mut self, idx: usize, weight: u32) {
        let s = &mut self.scores[idx];
        *s = s.saturating_add(u64::from(weight));
    }
}
