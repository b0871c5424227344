//! Label aggregation.
//!
//! Turns per-item label assignments into an [`InvertedIndex`] (label → ids)
//! and ranks labels by how many items carry them. Ranking is a total order:
//! equal counts break ties on the label text, so output is reproducible.

mod report;

pub use report::{LabelCount, LabelFrequencyReport};

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::LabelbenchError;
use crate::ir::io_json::id2labels_from_value;
use crate::ir::{ItemId, LabelSet};

/// Ranking direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Fewest items first.
    Asc,
    /// Most items first.
    #[default]
    Desc,
}

impl FromStr for Order {
    type Err = LabelbenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Order::Asc),
            "desc" | "descending" => Ok(Order::Desc),
            _ => Err(LabelbenchError::UnsupportedOrder(s.to_string())),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Asc => write!(f, "asc"),
            Order::Desc => write!(f, "desc"),
        }
    }
}

/// Mapping from label to the ids of the items that carry it.
///
/// Ids within a label appear once each, in first-encounter order. Labels are
/// kept sorted so iteration is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    entries: BTreeMap<String, Vec<ItemId>>,
    #[serde(skip)]
    item_count: usize,
}

impl InvertedIndex {
    /// Ids carrying `label`, if any item does.
    pub fn get(&self, label: &str) -> Option<&[ItemId]> {
        self.entries.get(label).map(Vec::as_slice)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct items seen while inverting, labelled or not.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<ItemId>)> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Labels ranked by how many items carry them.
    pub fn ranked(&self, order: Order) -> Vec<String> {
        rank_by_cardinality(&self.entries, order)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<ItemId>> {
        self.entries
    }
}

/// Inverts `(id, labels)` pairs into a label → ids index.
///
/// Labels are collected through [`LabelSet`]: empty labels are skipped and
/// label text is kept verbatim. An id is recorded at most once per
/// label even when the label repeats on the item or the item repeats in the
/// input. No entry is created for a label no item carries.
pub fn invert<I, L, S>(id2labels: I) -> InvertedIndex
where
    I: IntoIterator<Item = (ItemId, L)>,
    L: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries: BTreeMap<String, Vec<ItemId>> = BTreeMap::new();
    let mut recorded: HashSet<(String, ItemId)> = HashSet::new();
    let mut items: HashSet<ItemId> = HashSet::new();

    for (item_id, labels) in id2labels {
        let labels: LabelSet = labels.into_iter().collect();
        for label in labels.iter() {
            if recorded.insert((label.to_string(), item_id.clone())) {
                entries
                    .entry(label.to_string())
                    .or_default()
                    .push(item_id.clone());
            }
        }
        items.insert(item_id);
    }

    InvertedIndex {
        entries,
        item_count: items.len(),
    }
}

/// Decodes an id→labels JSON value and inverts it.
///
/// Fails with [`LabelbenchError::InvalidInput`] when an id is neither an
/// integer nor a string, or a label is not a scalar.
pub fn invert_json(value: &Value, labels_field: &str) -> Result<InvertedIndex, LabelbenchError> {
    let pairs = id2labels_from_value(value, labels_field)?;
    Ok(invert(pairs))
}

/// Fuzz-only entrypoint: decode, invert and rank raw id→labels bytes.
#[cfg(feature = "fuzzing")]
pub fn fuzz_invert_slice(bytes: &[u8]) -> Result<(), LabelbenchError> {
    use crate::ir::io_json::{id2labels_from_slice, DEFAULT_LABELS_FIELD};

    let pairs = id2labels_from_slice(bytes, DEFAULT_LABELS_FIELD)?;
    let index = invert(pairs);
    let _ = index.ranked(Order::Asc);
    let _ = label_frequency(&index, &RankOptions::default());
    Ok(())
}

/// Orders the keys of `mapping` by the length of their sequences.
///
/// Ascending sorts by `(len, key)`, descending by `(-len, key)`: the key is
/// always the ascending tie-break.
pub fn rank_by_cardinality<'a, K, T, M>(mapping: M, order: Order) -> Vec<K>
where
    M: IntoIterator<Item = (&'a K, &'a Vec<T>)>,
    K: Ord + Clone + 'a,
    T: 'a,
{
    let mut keyed: Vec<(usize, &K)> = mapping
        .into_iter()
        .map(|(key, values)| (values.len(), key))
        .collect();

    match order {
        Order::Asc => keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1))),
        Order::Desc => keyed.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1))),
    }

    keyed.into_iter().map(|(_, key)| key.clone()).collect()
}

/// Options for label frequency reports.
#[derive(Clone, Debug)]
pub struct RankOptions {
    /// Ranking direction.
    pub order: Order,
    /// Number of ranked labels to list before folding the rest into "other".
    pub top_n: usize,
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            order: Order::Desc,
            top_n: 20,
            bar_width: 20,
        }
    }
}

/// Builds a ranked frequency report from an index.
pub fn label_frequency(index: &InvertedIndex, opts: &RankOptions) -> LabelFrequencyReport {
    let ranked = index.ranked(opts.order);
    let total_labels = ranked.len();

    let mut entries = Vec::with_capacity(ranked.len().min(opts.top_n));
    let mut other_labels = 0usize;
    let mut other_count = 0usize;

    for (rank, label) in ranked.into_iter().enumerate() {
        let ids = index.get(&label).unwrap_or_default();
        if rank < opts.top_n {
            entries.push(LabelCount {
                count: ids.len(),
                share: crate::format::ratio(ids.len(), index.item_count()),
                ids: ids.to_vec(),
                label,
            });
        } else {
            other_labels += 1;
            other_count += ids.len();
        }
    }

    LabelFrequencyReport {
        order: opts.order,
        top_n: opts.top_n,
        total_items: index.item_count(),
        total_labels,
        entries,
        other_labels,
        other_count,
        bar_width: opts.bar_width,
    }
}
