// --------------------------------------------------------------------------------
// FILE: crates/qz_algo/src/rank.rs
// --------------------------------------------------------------------------------
//! Rank tiers: group categories by distinct score, highest score first.
//!
//! - Tier `i` holds every category whose score equals the i-th highest
//!   distinct value, in ascending category order.
//! - Only the top `depth` distinct values are kept. Fewer distinct values
//!   give fewer tiers; nothing is padded.
//!
//! No RNG, no floats.

extern crate alloc;

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use qz_core::Category;

use crate::accumulate::ScoreVector;

/// One group of categories tied at `score`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    pub score: u64,
    pub members: Vec<Category>,
}

/// Ordered, disjoint, non-empty tiers. Built once per snapshot; never mutated.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RankTiers(Vec<Tier>);

impl RankTiers {
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn tiers(&self) -> &[Tier] { &self.0 }

    /// Members of tier `i`; a missing tier reads as empty.
    pub fn members(&self, i: usize) -> &[Category] {
        self.0.get(i).map(|t| t.members.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tier> {
        self.0.iter()
    }
}

/// Build the top `depth` tiers from a score snapshot.
pub fn rank_tiers(scores: &ScoreVector, depth: usize) -> RankTiers {
    let distinct: BTreeSet<u64> = scores.iter().map(|(_, s)| s).collect();

    let tiers = distinct
        .into_iter()
        .rev()
        .take(depth)
        .map(|score| Tier {
            score,
            members: scores
                .iter()
                .filter(|&(_, s)| s == score)
                .map(|(c, _)| c)
                .collect(),
        })
        .collect();

    RankTiers(tiers)
}
