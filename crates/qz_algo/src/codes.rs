// crates/qz_algo/src/codes.rs
//
// Preference-code enumeration from rank tiers.
//
// Each `TieCase` describes one structural tie situation and generates the
// ordered candidate codes consistent with it. Cases are listed in `TieCase::ALL`
// in the priority order the resolver must try them; a case that does not
// apply to the given tiers yields no candidates.
//
// Permutations follow lexicographic order of positions within a tier, so the
// candidate order is fully determined by the tiers.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use qz_core::{Category, CoreError, PreferenceCode};

use crate::rank::RankTiers;

/// One generated code with the ordered categories that produced it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Candidate {
    pub code: PreferenceCode,
    pub triple: [Category; 3],
}

impl Candidate {
    pub fn new(triple: [Category; 3], radix: u16) -> Result<Self, CoreError> {
        Ok(Self { code: PreferenceCode::encode(triple, radix)?, triple })
    }
}

/// The tie-break cascade steps, most information-rich first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TieCase {
    /// Three or more categories tied for first: 3-permutations of tier 0.
    ThreeWayFirst,
    /// Two tied for first: both orders of tier 0, third from tier 1.
    TwoWayFirst,
    /// Single winner, two or more tied for second: 2-permutations of tier 1.
    TiedSecond,
    /// Single winner, second = first member of tier 1, third from tier 2.
    ClearThird,
    /// As `ClearThird`, third from tier 3.
    ClearFourth,
}

impl TieCase {
    pub const ALL: [TieCase; 5] = [
        TieCase::ThreeWayFirst,
        TieCase::TwoWayFirst,
        TieCase::TiedSecond,
        TieCase::ClearThird,
        TieCase::ClearFourth,
    ];

    /// Stable machine-readable token.
    pub fn as_str(self) -> &'static str {
        match self {
            TieCase::ThreeWayFirst => "three_way_first",
            TieCase::TwoWayFirst => "two_way_first",
            TieCase::TiedSecond => "tied_second",
            TieCase::ClearThird => "clear_third",
            TieCase::ClearFourth => "clear_fourth",
        }
    }

    /// Tier index each slot of (first, second, third) was drawn from.
    pub fn source_tiers(self) -> [usize; 3] {
        match self {
            TieCase::ThreeWayFirst => [0, 0, 0],
            TieCase::TwoWayFirst => [0, 0, 1],
            TieCase::TiedSecond => [0, 1, 1],
            TieCase::ClearThird => [0, 1, 2],
            TieCase::ClearFourth => [0, 1, 3],
        }
    }

    /// Ordered candidates for this case; empty when the case does not apply.
    pub fn candidates(self, tiers: &RankTiers, radix: u16) -> Result<Vec<Candidate>, CoreError> {
        let t0 = tiers.members(0);
        let t1 = tiers.members(1);

        let triples: Vec<[Category; 3]> = match self {
            TieCase::ThreeWayFirst if t0.len() >= 3 => permutations(t0, 3)
                .into_iter()
                .map(|p| [p[0], p[1], p[2]])
                .collect(),
            TieCase::TwoWayFirst if t0.len() == 2 => permutations(t0, 2)
                .into_iter()
                .flat_map(|p| t1.iter().map(move |&third| [p[0], p[1], third]))
                .collect(),
            TieCase::TiedSecond if t0.len() == 1 && t1.len() >= 2 => permutations(t1, 2)
                .into_iter()
                .map(|p| [t0[0], p[0], p[1]])
                .collect(),
            TieCase::ClearThird | TieCase::ClearFourth if t0.len() == 1 && !t1.is_empty() => {
                let from = if self == TieCase::ClearThird { 2 } else { 3 };
                tiers
                    .members(from)
                    .iter()
                    .map(|&third| [t0[0], t1[0], third])
                    .collect()
            }
            _ => Vec::new(),
        };

        triples.into_iter().map(|t| Candidate::new(t, radix)).collect()
    }
}

impl fmt::Display for TieCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All ordered `k`-permutations of `items`, lexicographic by position.
pub fn permutations<T: Copy>(items: &[T], k: usize) -> Vec<Vec<T>> {
    fn go<T: Copy>(items: &[T], k: usize, used: &mut [bool], cur: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
        if cur.len() == k {
            out.push(cur.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            cur.push(items[i]);
            go(items, k, used, cur, out);
            cur.pop();
            used[i] = false;
        }
    }

    let mut out = Vec::new();
    if k > items.len() {
        return out;
    }
    let mut used = alloc::vec![false; items.len()];
    let mut cur = Vec::with_capacity(k);
    go(items, k, &mut used, &mut cur, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulate::ScoreVector;
    use crate::rank::rank_tiers;
    use alloc::vec;

    fn c(i: u8) -> Category { Category::new(i) }

    fn codes(case: TieCase, scores: Vec<u64>) -> Vec<u32> {
        let tiers = rank_tiers(&ScoreVector::from(scores), 4);
        case.candidates(&tiers, 8).unwrap().iter().map(|x| x.code.value()).collect()
    }

    #[test]
    fn permutations_are_positional_lexicographic() {
        assert_eq!(
            permutations(&[2, 5, 6], 3),
            vec![vec![2, 5, 6], vec![2, 6, 5], vec![5, 2, 6], vec![5, 6, 2], vec![6, 2, 5], vec![6, 5, 2]]
        );
        assert_eq!(permutations(&[1, 4], 2), vec![vec![1, 4], vec![4, 1]]);
        assert_eq!(permutations(&[1, 2, 3, 4], 2).len(), 12);
        assert!(permutations(&[1], 2).is_empty());
    }

    #[test]
    fn three_way_tie_for_first_uses_tier_zero_only() {
        // categories 2, 5, 6 tied on top
        let got = codes(TieCase::ThreeWayFirst, vec![0, 1, 9, 2, 3, 9, 9]);
        assert_eq!(got, vec![174, 181, 342, 370, 405, 426]);
    }

    #[test]
    fn four_way_tie_permutes_instead_of_truncating() {
        let got = codes(TieCase::ThreeWayFirst, vec![5, 5, 5, 5, 0, 0, 0]);
        assert_eq!(got.len(), 24);
    }

    #[test]
    fn two_way_tie_pairs_each_order_with_every_second_tier_member() {
        // tier0 = {1, 3}, tier1 = {0, 4}
        let got = codes(TieCase::TwoWayFirst, vec![6, 8, 1, 8, 6, 0, 0]);
        let expect = [[1, 3, 0], [1, 3, 4], [3, 1, 0], [3, 1, 4]]
            .iter()
            .map(|t| t[0] * 64 + t[1] * 8 + t[2])
            .collect::<Vec<u32>>();
        assert_eq!(got, expect);
    }

    #[test]
    fn single_winner_with_tied_second_then_clear_fallbacks() {
        // tier0 = {3}, tier1 = {1, 4}, tier2 = {0}, tier3 = {2}
        let scores = vec![2, 5, 1, 9, 5, 0, 0];
        assert_eq!(codes(TieCase::TiedSecond, scores.clone()), vec![3 * 64 + 8 + 4, 3 * 64 + 32 + 1]);
        assert_eq!(codes(TieCase::ClearThird, scores.clone()), vec![3 * 64 + 8]);
        assert_eq!(codes(TieCase::ClearFourth, scores), vec![3 * 64 + 8 + 2]);
    }

    #[test]
    fn cases_that_do_not_apply_are_empty() {
        let single = vec![0, 1, 2, 3, 4, 5, 6];
        assert!(codes(TieCase::ThreeWayFirst, single.clone()).is_empty());
        assert!(codes(TieCase::TwoWayFirst, single.clone()).is_empty());
        assert!(codes(TieCase::TiedSecond, single).is_empty());

        // only two distinct scores: no tier 2 / tier 3 to fall back on
        let short = vec![1, 0, 0, 0, 0, 0, 0];
        assert!(codes(TieCase::ClearThird, short.clone()).is_empty());
        assert!(codes(TieCase::ClearFourth, short).is_empty());
    }

    #[test]
    fn candidates_carry_their_triple() {
        let tiers = rank_tiers(&ScoreVector::from(vec![0, 0, 3, 2, 1]), 4);
        let got = TieCase::ClearThird.candidates(&tiers, 8).unwrap();
        assert_eq!(got, vec![Candidate { code: PreferenceCode::encode([c(2), c(3), c(4)], 8).unwrap(), triple: [c(2), c(3), c(4)] }]);
    }

    #[test]
    fn tokens_are_stable() {
        let toks: Vec<&str> = TieCase::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(toks, vec!["three_way_first", "two_way_first", "tied_second", "clear_third", "clear_fourth"]);
    }
}
