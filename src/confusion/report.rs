//! Binary classification report types and formatting.
//!
//! The report layer adds what the scorer deliberately leaves out: F1, the
//! per-record detail for false positives/negatives, and rendering as text,
//! Markdown or JSON.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::{ConfusionCounts, ConfusionPartition, Metrics};
use crate::format::{format_number, format_ratio, single_line};
use crate::ir::{Item, ItemId};

/// Captions for a binary report.
#[derive(Clone, Debug)]
pub struct BinaryReportOptions {
    /// Report title.
    pub title: String,
    /// Name of the positive class in count lines ("kept").
    pub positive_name: String,
    /// Sentence introducing the false positive records.
    pub false_positive_caption: String,
    /// Sentence introducing the false negative records.
    pub false_negative_caption: String,
}

impl Default for BinaryReportOptions {
    fn default() -> Self {
        Self {
            title: "Binary Classification Report".to_string(),
            positive_name: "kept".to_string(),
            false_positive_caption: "Should be dropped but predicted as kept:".to_string(),
            false_negative_caption: "Should be kept but predicted as dropped:".to_string(),
        }
    }
}

/// One enumerated item in a false positive/negative section.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordLine {
    pub id: ItemId,
    pub user: String,
    pub content: String,
}

/// Scored binary evaluation, ready to render.
#[derive(Clone, Debug, Serialize)]
pub struct BinaryReport {
    pub title: String,
    pub positive_name: String,
    /// Size of the ground-truth positive set.
    pub expected_positive: usize,
    /// Size of the predicted positive set.
    pub predicted_positive: usize,
    pub counts: ConfusionCounts,
    pub metrics: Metrics,
    pub f1: f64,
    pub false_positives: Vec<RecordLine>,
    pub false_negatives: Vec<RecordLine>,
    #[serde(skip)]
    false_positive_caption: String,
    #[serde(skip)]
    false_negative_caption: String,
}

/// Harmonic mean of precision and recall, 0.0 when both are zero.
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl BinaryReport {
    /// Builds a report from a scored partition.
    ///
    /// `items` supplies the `user`/`content` echoed for false positives and
    /// negatives; ids with no matching item are left out of those sections.
    pub fn from_partition(
        partition: &ConfusionPartition,
        items: &[Item],
        opts: &BinaryReportOptions,
    ) -> Self {
        let counts = partition.counts();
        let metrics = counts.metrics();
        let by_id: HashMap<&ItemId, &Item> = items.iter().map(|item| (&item.id, item)).collect();

        Self {
            title: opts.title.clone(),
            positive_name: opts.positive_name.clone(),
            expected_positive: counts.tp + counts.fn_,
            predicted_positive: counts.tp + counts.fp,
            counts,
            metrics,
            f1: f1_score(metrics.precision, metrics.recall),
            false_positives: record_lines(&partition.false_positive, &by_id),
            false_negatives: record_lines(&partition.false_negative, &by_id),
            false_positive_caption: opts.false_positive_caption.clone(),
            false_negative_caption: opts.false_negative_caption.clone(),
        }
    }

    /// Renders the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let m = &self.metrics;
        let c = &self.counts;

        let mut lines = vec![
            format!("# {}", self.title),
            String::new(),
            format!("- Total samples: {}", c.total),
            format!("- Expected {} count: {}", self.positive_name, self.expected_positive),
            format!("- Predicted {} count: {}", self.positive_name, self.predicted_positive),
            String::new(),
            "## Metrics".to_string(),
            String::new(),
            "| Metric | Value |".to_string(),
            "| --- | --- |".to_string(),
            format!("| Accuracy | {} |", format_ratio(m.accuracy)),
            format!("| Error Rate | {} |", format_ratio(m.error_rate)),
            format!("| Precision | {} |", format_ratio(m.precision)),
            format!("| Recall Rate | {} |", format_ratio(m.recall)),
            format!("| F1 Score | {:.2} |", self.f1),
            format!("| True Positives | {} |", c.tp),
            format!("| True Negatives | {} |", c.tn),
            format!("| False Positives | {} |", c.fp),
            format!("| False Negatives | {} |", c.fn_),
            String::new(),
            "## False Positives".to_string(),
            String::new(),
            self.false_positive_caption.clone(),
        ];
        push_records(&mut lines, &self.false_positives);

        lines.extend([
            String::new(),
            "## False Negatives".to_string(),
            String::new(),
            self.false_negative_caption.clone(),
        ]);
        push_records(&mut lines, &self.false_negatives);

        lines.join("\n")
    }
}

fn record_lines(ids: &[ItemId], by_id: &HashMap<&ItemId, &Item>) -> Vec<RecordLine> {
    ids.iter()
        .filter_map(|id| by_id.get(id))
        .map(|item| RecordLine {
            id: item.id.clone(),
            user: item.user(),
            content: single_line(&item.text()),
        })
        .collect()
}

fn push_records(lines: &mut Vec<String>, records: &[RecordLine]) {
    if records.is_empty() {
        lines.push("- None".to_string());
        return;
    }
    for record in records {
        lines.push(format!(
            "- id={}, user={}, content={}",
            record.id, record.user, record.content
        ));
    }
}

impl fmt::Display for BinaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        let c = &self.counts;

        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(f, "  Samples:    {:>8}", format_number(c.total))?;
        writeln!(
            f,
            "  Expected {}: {} / predicted {}: {}",
            self.positive_name, self.expected_positive, self.positive_name, self.predicted_positive
        )?;
        writeln!(f)?;
        writeln!(f, "  Accuracy:   {:>8}", format_ratio(m.accuracy))?;
        writeln!(f, "  Error rate: {:>8}", format_ratio(m.error_rate))?;
        writeln!(f, "  Precision:  {:>8}", format_ratio(m.precision))?;
        writeln!(f, "  Recall:     {:>8}", format_ratio(m.recall))?;
        writeln!(f, "  F1:         {:>8.2}", self.f1)?;
        writeln!(f)?;
        writeln!(
            f,
            "  TP {}  FP {}  FN {}  TN {}",
            c.tp, c.fp, c.fn_, c.tn
        )?;

        for (heading, records) in [
            ("False positives", &self.false_positives),
            ("False negatives", &self.false_negatives),
        ] {
            writeln!(f)?;
            writeln!(f, "{} ({}):", heading, records.len())?;
            if records.is_empty() {
                writeln!(f, "  - (none)")?;
            }
            for record in records {
                writeln!(f, "  - {} [{}] {}", record.id, record.user, record.content)?;
            }
        }

        Ok(())
    }
}
