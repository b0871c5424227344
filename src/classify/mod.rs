//! The classifier seam.
//!
//! Scoring never talks to a model directly. Callers pass a [`Classifier`]
//! into [`run_batches`] or [`sanitize`]; the CLI uses a [`ReplayClassifier`]
//! that serves labels recorded by an earlier run.

use std::cell::Cell;

use crate::align::{align, check_lengths, Aligned};
use crate::error::LabelbenchError;
use crate::ir::Item;

/// Batch size used when none is configured.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Assigns zero or more labels to each input text.
///
/// Implementations should return one label list per text, in input order.
/// Returning fewer is tolerated and handled as a length mismatch.
pub trait Classifier {
    fn classify(&self, texts: &[String]) -> Result<Vec<Vec<String>>, LabelbenchError>;
}

impl<F> Classifier for F
where
    F: Fn(&[String]) -> Result<Vec<Vec<String>>, LabelbenchError>,
{
    fn classify(&self, texts: &[String]) -> Result<Vec<Vec<String>>, LabelbenchError> {
        self(texts)
    }
}

/// Classifies `texts` in consecutive batches and concatenates the results.
///
/// A batch answered with too few predictions ends the run: later
/// predictions could no longer be matched to their inputs by position. The
/// shortfall is returned as a length mismatch. Extra predictions in a batch
/// are dropped.
pub fn run_batches(
    classifier: &dyn Classifier,
    texts: &[String],
    batch_size: usize,
) -> Result<Aligned<Vec<Vec<String>>>, LabelbenchError> {
    if batch_size == 0 {
        return Err(LabelbenchError::InvalidInput(
            "batch size must be at least 1".to_string(),
        ));
    }

    let batches = texts.len().div_ceil(batch_size);
    let mut predictions = Vec::with_capacity(texts.len());

    for (batch, chunk) in texts.chunks(batch_size).enumerate() {
        tracing::debug!(batch = batch + 1, batches, size = chunk.len(), "classifying batch");

        let mut output = classifier.classify(chunk)?;
        let short = output.len() < chunk.len();
        if output.len() > chunk.len() {
            tracing::warn!(
                batch = batch + 1,
                expected = chunk.len(),
                returned = output.len(),
                "classifier returned extra predictions; dropping them"
            );
            output.truncate(chunk.len());
        }
        predictions.extend(output);

        if short {
            break;
        }
    }

    let mismatch = check_lengths(texts.len(), predictions.len());
    Ok(Aligned {
        value: predictions,
        mismatch,
    })
}

/// Replays pre-recorded label lists, one per text, in call order.
///
/// Each `classify` call consumes as many recordings as it receives texts.
/// When the recordings run out the classifier answers short.
#[derive(Debug, Default)]
pub struct ReplayClassifier {
    recorded: Vec<Vec<String>>,
    cursor: Cell<usize>,
}

impl ReplayClassifier {
    pub fn new(recorded: Vec<Vec<String>>) -> Self {
        Self {
            recorded,
            cursor: Cell::new(0),
        }
    }

    /// Recordings not yet served.
    pub fn remaining(&self) -> usize {
        self.recorded.len() - self.cursor.get()
    }
}

impl Classifier for ReplayClassifier {
    fn classify(&self, texts: &[String]) -> Result<Vec<Vec<String>>, LabelbenchError> {
        let start = self.cursor.get();
        let end = (start + texts.len()).min(self.recorded.len());
        self.cursor.set(end);
        Ok(self.recorded[start..end].to_vec())
    }
}

/// Options for [`sanitize`].
#[derive(Clone, Debug)]
pub struct SanitizeOptions {
    /// Label marking an item as kept.
    pub positive_label: String,
    /// Number of texts sent to the classifier per call.
    pub batch_size: usize,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            positive_label: "keep".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Classifies each item's text and returns the items labelled positive.
///
/// Items beyond the classifier's last prediction are neither kept nor
/// dropped; the result carries the length mismatch.
pub fn sanitize(
    items: &[Item],
    classifier: &dyn Classifier,
    opts: &SanitizeOptions,
) -> Result<Aligned<Vec<Item>>, LabelbenchError> {
    let texts: Vec<String> = items.iter().map(Item::text).collect();
    let predictions = run_batches(classifier, &texts, opts.batch_size)?;

    if !items.is_empty() && predictions.value.is_empty() {
        return Err(LabelbenchError::Classifier(format!(
            "no predictions returned for {} item(s)",
            items.len()
        )));
    }

    let positive = opts.positive_label.trim();
    let kept = align(items, &predictions.value)
        .value
        .into_iter()
        .filter(|(_, labels)| labels.iter().any(|label| label.trim() == positive))
        .map(|(item, _)| item.clone())
        .collect();

    tracing::debug!(
        items = items.len(),
        classified = predictions.value.len(),
        "sanitize finished"
    );

    Ok(Aligned {
        value: kept,
        mismatch: predictions.mismatch,
    })
}
