//! Quiz engine: owns one run's scores and drives the pipeline at quiz end.
//!
//! States: Accumulating → (finish, once) → Resolved → (reset) → Accumulating.

use tracing::info;

use qz_algo::{rank_tiers, Answer, RankTiers, ScoreAccumulator, ScoreVector, TieCase};
use qz_core::{CategoryLabels, CoreError, EngineConfig};

use crate::cascade::{run_cascade, CaseAttempt};
use crate::resolve::{LabeledResult, LookupTable, ResultResolver};
use crate::EngineError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EngineState {
    Accumulating,
    Resolved,
}

/// Everything computed when a run resolves. Read-only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolution {
    pub scores: ScoreVector,
    pub tiers: RankTiers,
    pub results: Vec<LabeledResult>,
    pub resolved_by: Option<TieCase>,
    pub attempts: Vec<CaseAttempt>,
}

/// Rank a score snapshot and resolve it against `table`. Pure and deterministic.
///
/// `scores` must hold exactly one entry per configured category.
pub fn resolve_scores<T: LookupTable + ?Sized>(
    cfg: &EngineConfig,
    labels: &CategoryLabels,
    table: &T,
    scores: ScoreVector,
) -> Result<Resolution, CoreError> {
    if scores.len() != usize::from(cfg.category_count()) {
        return Err(CoreError::DomainOutOfRange("score vector length"));
    }
    let tiers = rank_tiers(&scores, cfg.tier_depth());
    let resolver = ResultResolver::new(table, labels, cfg.label_separator());
    let outcome = run_cascade(&tiers, cfg.radix(), &resolver)?;

    Ok(Resolution {
        scores,
        tiers,
        results: outcome.results,
        resolved_by: outcome.resolved_by,
        attempts: outcome.attempts,
    })
}

pub struct QuizEngine<T> {
    cfg: EngineConfig,
    labels: CategoryLabels,
    table: T,
    acc: ScoreAccumulator,
    resolution: Option<Resolution>,
}

impl<T: LookupTable> QuizEngine<T> {
    /// A fresh run in the Accumulating state.
    pub fn new(cfg: EngineConfig, labels: CategoryLabels, table: T) -> Self {
        let acc = ScoreAccumulator::new(&cfg);
        Self { cfg, labels, table, acc, resolution: None }
    }

    pub fn config(&self) -> &EngineConfig { &self.cfg }
    pub fn labels(&self) -> &CategoryLabels { &self.labels }
    pub fn table(&self) -> &T { &self.table }

    pub fn state(&self) -> EngineState {
        if self.resolution.is_some() { EngineState::Resolved } else { EngineState::Accumulating }
    }

    /// Live scores of the current run.
    pub fn scores(&self) -> &[u64] { self.acc.scores() }

    /// Start a new run: zero scores, drop any resolution.
    pub fn reset(&mut self) {
        self.acc.reset();
        self.resolution = None;
    }

    pub fn record(&mut self, answer: Answer) -> Result<(), EngineError> {
        self.ensure_accumulating()?;
        self.acc.record(answer).map_err(EngineError::from)
    }

    /// Commit one page of answers atomically.
    pub fn record_batch(&mut self, answers: &[Answer]) -> Result<(), EngineError> {
        self.ensure_accumulating()?;
        self.acc.record_batch(answers).map_err(EngineError::from)
    }

    /// Close the run: rank, enumerate, resolve. Allowed once per run.
    pub fn finish(&mut self) -> Result<&Resolution, EngineError> {
        self.ensure_accumulating()?;
        let res = resolve_scores(&self.cfg, &self.labels, &self.table, self.acc.snapshot())?;
        info!(
            results = res.results.len(),
            resolved_by = res.resolved_by.map(TieCase::as_str).unwrap_or("exhausted"),
            "quiz run resolved"
        );
        let res: &Resolution = self.resolution.insert(res);
        Ok(res)
    }

    pub fn resolution(&self) -> Result<&Resolution, EngineError> {
        self.resolution.as_ref().ok_or(EngineError::NotResolved)
    }

    fn ensure_accumulating(&self) -> Result<(), EngineError> {
        match self.state() {
            EngineState::Accumulating => Ok(()),
            EngineState::Resolved => Err(EngineError::AlreadyResolved),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qz_algo::Candidate;
    use qz_core::{Category, ResultRecord, ResultTable};

    fn ans(c: u8, w: u32) -> Answer {
        Answer::new(Category::new(c), w)
    }

    fn engine_with(entries: &[([u8; 3], &str)]) -> QuizEngine<ResultTable> {
        let mut t = ResultTable::new();
        for (triple, tag) in entries {
            let [a, b, c] = *triple;
            let code = Candidate::new([Category::new(a), Category::new(b), Category::new(c)], 8).unwrap().code;
            t.entry(code).or_default().push(ResultRecord::new(*tag, "t1", "c2", "t2"));
        }
        QuizEngine::new(EngineConfig::default(), CategoryLabels::new(["-", "R", "I", "A", "S", "E", "C"]), t)
    }

    #[test]
    fn runs_through_both_states() {
        let mut e = engine_with(&[([3, 1, 4], "hit")]);
        assert_eq!(e.state(), EngineState::Accumulating);
        assert_eq!(e.resolution().unwrap_err(), EngineError::NotResolved);

        e.record_batch(&[ans(3, 4), ans(1, 3), ans(4, 3)]).unwrap();
        e.record(ans(0, 1)).unwrap();

        let res = e.finish().unwrap();
        assert_eq!(res.resolved_by, Some(TieCase::TiedSecond));
        assert_eq!(res.results.len(), 1);
        assert_eq!(res.results[0].rank_label, "A-R-S");
        assert_eq!(e.state(), EngineState::Resolved);
    }

    #[test]
    fn resolved_engine_rejects_more_answers_until_reset() {
        let mut e = engine_with(&[]);
        e.record(ans(2, 1)).unwrap();
        e.finish().unwrap();

        assert_eq!(e.record(ans(2, 1)), Err(EngineError::AlreadyResolved));
        assert_eq!(e.finish().map(|_| ()), Err(EngineError::AlreadyResolved));

        e.reset();
        assert_eq!(e.state(), EngineState::Accumulating);
        assert!(e.scores().iter().all(|&s| s == 0));
        e.record(ans(2, 1)).unwrap();
    }

    #[test]
    fn invalid_category_propagates_and_keeps_scores() {
        let mut e = engine_with(&[]);
        e.record(ans(1, 2)).unwrap();
        let err = e.record(ans(9, 1)).unwrap_err();
        assert_eq!(err, EngineError::Core(CoreError::InvalidCategory { category: 9, category_count: 7 }));
        assert_eq!(e.scores(), &[0, 2, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn score_vector_must_match_category_count() {
        // an entry for category 7 would reach code (7, 1, 4) if it were ranked
        let mut t = ResultTable::new();
        t.insert(
            Candidate::new([Category::new(7), Category::new(1), Category::new(4)], 8).unwrap().code,
            vec![ResultRecord::new("ghost", "t1", "c2", "t2")],
        );
        let labels = CategoryLabels::default();
        let cfg = EngineConfig::default();

        let long = ScoreVector::from(vec![0, 5, 0, 0, 5, 0, 0, 9]);
        assert_eq!(
            resolve_scores(&cfg, &labels, &t, long),
            Err(CoreError::DomainOutOfRange("score vector length"))
        );
        let short = ScoreVector::from(vec![1, 2, 3]);
        assert!(resolve_scores(&cfg, &labels, &t, short).is_err());
        assert!(resolve_scores(&cfg, &labels, &t, ScoreVector::zeros(7)).is_ok());
    }

    #[test]
    fn empty_table_resolves_to_empty_list() {
        let mut e = engine_with(&[]);
        e.record_batch(&[ans(1, 4), ans(2, 2), ans(3, 1)]).unwrap();
        let res = e.finish().unwrap();
        assert!(res.results.is_empty());
        assert!(res.resolved_by.is_none());
        assert!(!res.attempts.is_empty());
    }
}
