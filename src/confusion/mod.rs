//! Binary confusion scoring.
//!
//! Given the universe of item ids, the ids that ground truth marks positive
//! and the ids the classifier marks positive, [`score_confusion`] splits the
//! universe into true/false positives/negatives. Every universe id lands in
//! exactly one bucket, and bucket lists keep universe order.

mod report;

pub use report::{f1_score, BinaryReport, BinaryReportOptions, RecordLine};

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::LabelbenchError;
use crate::format::ratio;
use crate::ir::ItemId;

/// The four disjoint id lists of a binary evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionPartition {
    pub true_positive: Vec<ItemId>,
    pub false_positive: Vec<ItemId>,
    pub false_negative: Vec<ItemId>,
    pub true_negative: Vec<ItemId>,
}

/// Bucket sizes of a [`ConfusionPartition`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub tp: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
    pub tn: usize,
    pub total: usize,
}

/// Ratios derived from [`ConfusionCounts`]; zero denominators give 0.0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub error_rate: f64,
    pub precision: f64,
    pub recall: f64,
}

impl ConfusionPartition {
    pub fn counts(&self) -> ConfusionCounts {
        let tp = self.true_positive.len();
        let fp = self.false_positive.len();
        let fn_ = self.false_negative.len();
        let tn = self.true_negative.len();
        ConfusionCounts {
            tp,
            fp,
            fn_,
            tn,
            total: tp + fp + fn_ + tn,
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.counts().metrics()
    }

    /// Number of ids across all four buckets.
    pub fn total(&self) -> usize {
        self.counts().total
    }
}

impl ConfusionCounts {
    /// Derives the ratio metrics.
    ///
    /// An empty universe yields `accuracy = 0.0`; `error_rate` is always
    /// `1 - accuracy`.
    pub fn metrics(&self) -> Metrics {
        let accuracy = ratio(self.tp + self.tn, self.total);
        Metrics {
            accuracy,
            error_rate: 1.0 - accuracy,
            precision: ratio(self.tp, self.tp + self.fp),
            recall: ratio(self.tp, self.tp + self.fn_),
        }
    }
}

/// Partitions `universe` by membership in the expected and predicted sets.
///
/// Repeated universe ids are scored once, at their first occurrence. Ids in
/// `expected` or `predicted` that are not in the universe are ignored.
pub fn score_confusion<'a, U>(
    universe: U,
    expected: &HashSet<ItemId>,
    predicted: &HashSet<ItemId>,
) -> ConfusionPartition
where
    U: IntoIterator<Item = &'a ItemId>,
{
    let mut partition = ConfusionPartition::default();
    let mut seen: HashSet<&ItemId> = HashSet::new();

    for id in universe {
        if !seen.insert(id) {
            continue;
        }

        let bucket = match (expected.contains(id), predicted.contains(id)) {
            (true, true) => &mut partition.true_positive,
            (true, false) => &mut partition.false_negative,
            (false, true) => &mut partition.false_positive,
            (false, false) => &mut partition.true_negative,
        };
        bucket.push(id.clone());
    }

    partition
}

/// Whether the ids listed in an expected/predicted file are the positive class.
///
/// Filter-style benchmarks list the items that were *dropped*; the positive
/// ("kept") class is then everything else in the universe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListedAs {
    #[default]
    Positive,
    Negative,
}

impl FromStr for ListedAs {
    type Err = LabelbenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "kept" => Ok(ListedAs::Positive),
            "negative" | "dropped" => Ok(ListedAs::Negative),
            other => Err(LabelbenchError::InvalidInput(format!(
                "'{other}' is not a listed-id convention (supported: positive, negative)"
            ))),
        }
    }
}

impl fmt::Display for ListedAs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListedAs::Positive => write!(f, "positive"),
            ListedAs::Negative => write!(f, "negative"),
        }
    }
}

/// Resolves listed ids into the positive set for `universe`.
pub fn positive_ids(
    universe: &[ItemId],
    listed: &HashSet<ItemId>,
    listed_as: ListedAs,
) -> HashSet<ItemId> {
    match listed_as {
        ListedAs::Positive => listed.clone(),
        ListedAs::Negative => universe
            .iter()
            .filter(|id| !listed.contains(*id))
            .cloned()
            .collect(),
    }
}
