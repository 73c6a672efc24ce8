//! RESOLVE stage: look candidate codes up in the injected table and label
//! every matched record.
//!
//! - A code with no entry is a normal miss: it contributes nothing.
//! - Aggregation keeps candidate order, then table order within a code.
//! - No dedup across codes: a record reachable from two codes appears twice,
//!   each copy with its own rank label.

use serde::{Serialize, Serializer};
use tracing::debug;

use qz_algo::{Candidate, TieCase};
use qz_core::{Category, CategoryLabels, PreferenceCode, ResultRecord, ResultTable};

// ----- Lookup table seam ---------------------------------------------------------------------

/// Read-only code → records mapping supplied by the host.
pub trait LookupTable {
    /// Records published for `code`; empty when the code is absent.
    fn records(&self, code: PreferenceCode) -> &[ResultRecord];
}

impl LookupTable for ResultTable {
    fn records(&self, code: PreferenceCode) -> &[ResultRecord] {
        self.get(&code).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl<T: LookupTable + ?Sized> LookupTable for &T {
    fn records(&self, code: PreferenceCode) -> &[ResultRecord] {
        (**self).records(code)
    }
}

// ----- Output ---------------------------------------------------------------------------------

/// A record republished with the ranking that reached it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LabeledResult {
    #[serde(flatten)]
    pub record: ResultRecord,
    /// Display identifiers of `categories`, joined by the configured separator.
    pub rank_label: String,
    #[serde(serialize_with = "serialize_case")]
    pub affinity: TieCase,
    pub code: PreferenceCode,
    pub categories: [Category; 3],
}

fn serialize_case<S: Serializer>(case: &TieCase, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(case.as_str())
}

// ----- Resolver -------------------------------------------------------------------------------

pub struct ResultResolver<'a, T: ?Sized> {
    table: &'a T,
    labels: &'a CategoryLabels,
    separator: &'a str,
}

impl<'a, T: LookupTable + ?Sized> ResultResolver<'a, T> {
    pub fn new(table: &'a T, labels: &'a CategoryLabels, separator: &'a str) -> Self {
        Self { table, labels, separator }
    }

    /// Label every record published for one candidate code.
    pub fn resolve(&self, candidate: &Candidate, affinity: TieCase) -> Vec<LabeledResult> {
        let records = self.table.records(candidate.code);
        if records.is_empty() {
            debug!(code = candidate.code.value(), case = %affinity, "no records for code");
            return Vec::new();
        }

        let rank_label = self.labels.join(&candidate.triple, self.separator);
        records
            .iter()
            .map(|record| LabeledResult {
                record: record.clone(),
                rank_label: rank_label.clone(),
                affinity,
                code: candidate.code,
                categories: candidate.triple,
            })
            .collect()
    }

    /// Resolve candidates in order and concatenate.
    pub fn aggregate(&self, candidates: &[Candidate], affinity: TieCase) -> Vec<LabeledResult> {
        candidates
            .iter()
            .flat_map(|c| self.resolve(c, affinity))
            .collect()
    }
}
