//! Extraction overlap scoring.
//!
//! Information-extraction runs return free-form strings (user demands,
//! feature requests). After normalization, expected and predicted strings
//! are compared by exact text using the binary confusion scorer over their
//! union: matched strings are true positives, missed ones false negatives,
//! spurious ones false positives. There are never true negatives.

mod report;

pub use report::ExtractReport;

use std::collections::HashSet;

use serde::Serialize;

use crate::confusion::{f1_score, score_confusion, ConfusionCounts, Metrics};
use crate::ir::{ItemId, LabelSet};

/// Trims, drops empty strings and de-duplicates, keeping first-seen order.
pub fn normalize_items<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut set = LabelSet::new();
    for item in items {
        set.insert(item.as_ref().trim());
    }
    set.into_vec()
}

/// Overlap between expected and predicted extractions.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExtractionScore {
    pub expected: Vec<String>,
    pub predicted: Vec<String>,
    /// Predicted strings that were expected.
    pub matched: Vec<String>,
    /// Expected strings that were not predicted.
    pub missed: Vec<String>,
    /// Predicted strings that were not expected.
    pub spurious: Vec<String>,
    pub counts: ConfusionCounts,
    pub metrics: Metrics,
    pub f1: f64,
}

/// Normalizes both sides and scores their exact-text overlap.
pub fn score_extraction<E, P>(expected: &[E], predicted: &[P]) -> ExtractionScore
where
    E: AsRef<str>,
    P: AsRef<str>,
{
    let expected = normalize_items(expected);
    let predicted = normalize_items(predicted);

    // Universe: expected first, then predicted-only strings, in order.
    let mut universe: Vec<ItemId> = expected.iter().cloned().map(ItemId::Str).collect();
    let expected_set: HashSet<ItemId> = universe.iter().cloned().collect();
    universe.extend(
        predicted
            .iter()
            .cloned()
            .map(ItemId::Str)
            .filter(|id| !expected_set.contains(id)),
    );
    let predicted_set: HashSet<ItemId> = predicted.iter().cloned().map(ItemId::Str).collect();

    let partition = score_confusion(&universe, &expected_set, &predicted_set);
    let counts = partition.counts();
    let metrics = counts.metrics();

    ExtractionScore {
        matched: into_strings(partition.true_positive),
        missed: into_strings(partition.false_negative),
        spurious: into_strings(partition.false_positive),
        f1: f1_score(metrics.precision, metrics.recall),
        counts,
        metrics,
        expected,
        predicted,
    }
}

fn into_strings(ids: Vec<ItemId>) -> Vec<String> {
    ids.into_iter().map(|id| id.to_string()).collect()
}
