//! TIE-BREAK cascade: try each tie case in fixed priority order and stop at
//! the first one whose aggregated result list is non-empty.
//!
//! Every case is tried in full (all of its candidates are looked up) before
//! the non-empty check. Cases that do not apply to the tiers, or whose tiers
//! are missing, simply produce nothing. An exhausted cascade is an empty
//! result list, not an error.

use tracing::debug;

use qz_algo::{RankTiers, TieCase};
use qz_core::{CoreError, PreferenceCode};

use crate::resolve::{LabeledResult, LookupTable, ResultResolver};

/// Audit row for one case the cascade reached.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CaseAttempt {
    pub case: TieCase,
    /// Codes looked up, in order.
    pub codes: Vec<PreferenceCode>,
    /// Number of labeled results the case produced.
    pub hits: usize,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CascadeOutcome {
    pub results: Vec<LabeledResult>,
    /// The case that produced `results`; `None` when exhausted.
    pub resolved_by: Option<TieCase>,
    pub attempts: Vec<CaseAttempt>,
}

/// Run the cascade over `tiers`, in `TieCase::ALL` order.
pub fn run_cascade<T: LookupTable + ?Sized>(
    tiers: &RankTiers,
    radix: u16,
    resolver: &ResultResolver<'_, T>,
) -> Result<CascadeOutcome, CoreError> {
    let mut out = CascadeOutcome::default();

    for case in TieCase::ALL {
        let candidates = case.candidates(tiers, radix)?;
        if candidates.is_empty() {
            continue;
        }

        let results = resolver.aggregate(&candidates, case);
        debug!(case = %case, tried = candidates.len(), hits = results.len(), "tie case attempted");
        out.attempts.push(CaseAttempt {
            case,
            codes: candidates.iter().map(|c| c.code).collect(),
            hits: results.len(),
        });

        if !results.is_empty() {
            out.results = results;
            out.resolved_by = Some(case);
            return Ok(out);
        }
    }

    debug!(attempts = out.attempts.len(), "tie cascade exhausted");
    Ok(out)
}
