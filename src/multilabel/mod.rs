//! Multi-label exact-match scoring.
//!
//! Each input text carries zero or more category labels. A prediction is
//! correct when its label set equals the expected set; order and repeats do
//! not matter. Expected and predicted lists are aligned by position.

mod report;

pub use report::{ExactMatchReport, SampleLine};

use serde::Serialize;

use crate::align::{align, LengthMismatch};
use crate::format::ratio;
use crate::ir::LabelSet;

/// One sample whose predicted labels differ from the expected ones.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mismatch {
    /// Zero-based position in the input.
    pub index: usize,
    pub expected: LabelSet,
    pub predicted: LabelSet,
}

/// Result of exact-match scoring over the aligned prefix.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExactMatch {
    /// Samples scored (the aligned prefix).
    pub total: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub mismatches: Vec<Mismatch>,
    /// Set when expected and predicted counts differed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_mismatch: Option<LengthMismatch>,
}

/// Scores predicted label lists against expected ones.
///
/// Only the first `min(expected.len(), predicted.len())` samples are scored;
/// a count difference is reported as a [`LengthMismatch`] warning.
pub fn score_exact_match<E, P>(expected: &[E], predicted: &[P]) -> ExactMatch
where
    E: AsRef<[String]>,
    P: AsRef<[String]>,
{
    let aligned = align(expected, predicted);
    let total = aligned.value.len();
    let mut correct = 0usize;
    let mut mismatches = Vec::new();

    for (index, (exp, pred)) in aligned.value.into_iter().enumerate() {
        let exp: LabelSet = exp.as_ref().iter().collect();
        let pred: LabelSet = pred.as_ref().iter().collect();

        if exp.same_labels(&pred) {
            correct += 1;
        } else {
            mismatches.push(Mismatch {
                index,
                expected: exp,
                predicted: pred,
            });
        }
    }

    ExactMatch {
        total,
        correct,
        accuracy: ratio(correct, total),
        mismatches,
        length_mismatch: aligned.mismatch,
    }
}
