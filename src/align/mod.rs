//! Positional alignment of classifier output with its inputs.
//!
//! Classifiers return one prediction per input text, but may return fewer
//! (or more) than asked. Alignment pairs inputs and predictions by position
//! and truncates to the shorter side. A count mismatch is a warning: it is
//! logged and carried on the result, and scoring continues on the
//! overlapping prefix.

use serde::Serialize;
use std::fmt;

use crate::ir::{Item, ItemId};

/// Input and prediction counts disagreed; the longer side was truncated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LengthMismatch {
    pub inputs: usize,
    pub predictions: usize,
}

impl LengthMismatch {
    /// Number of positions actually scored.
    pub fn aligned(&self) -> usize {
        self.inputs.min(self.predictions)
    }
}

impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "prediction count ({}) does not match input count ({}); truncating to {}",
            self.predictions,
            self.inputs,
            self.aligned()
        )
    }
}

/// A value computed over an aligned prefix, plus any mismatch warning.
#[derive(Clone, Debug, PartialEq)]
pub struct Aligned<T> {
    pub value: T,
    pub mismatch: Option<LengthMismatch>,
}

impl<T> Aligned<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Aligned<U> {
        Aligned {
            value: f(self.value),
            mismatch: self.mismatch,
        }
    }
}

/// Pairs `inputs[i]` with `predictions[i]` for every shared position.
pub fn align<'a, A, B>(inputs: &'a [A], predictions: &'a [B]) -> Aligned<Vec<(&'a A, &'a B)>> {
    let mismatch = check_lengths(inputs.len(), predictions.len());
    Aligned {
        value: inputs.iter().zip(predictions.iter()).collect(),
        mismatch,
    }
}

/// Compares counts, logging a warning when they differ.
pub fn check_lengths(inputs: usize, predictions: usize) -> Option<LengthMismatch> {
    if inputs == predictions {
        return None;
    }
    let mismatch = LengthMismatch {
        inputs,
        predictions,
    };
    tracing::warn!(inputs, predictions, "{}", mismatch);
    Some(mismatch)
}

/// Ids of the items whose aligned label equals `positive_label`.
///
/// `labels[i]` is the classifier's decision for `items[i]`.
pub fn kept_ids(items: &[Item], labels: &[String], positive_label: &str) -> Aligned<Vec<ItemId>> {
    align(items, labels).map(|pairs| {
        pairs
            .into_iter()
            .filter(|(_, label)| label.trim() == positive_label)
            .map(|(item, _)| item.id.clone())
            .collect()
    })
}

/// The items covered by an alignment (the first `aligned()` inputs).
pub fn aligned_prefix<T>(inputs: &[T], mismatch: Option<LengthMismatch>) -> &[T] {
    match mismatch {
        Some(m) => &inputs[..m.aligned()],
        None => inputs,
    }
}
