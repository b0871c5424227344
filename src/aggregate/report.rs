//! Label frequency report types and terminal formatting.

use serde::Serialize;
use std::fmt;

use super::Order;
use crate::error::LabelbenchError;
use crate::format::{format_number, render_bar, truncate_label};
use crate::ir::ItemId;

/// Ranked label frequencies for one aggregation run.
#[derive(Clone, Debug, Serialize)]
pub struct LabelFrequencyReport {
    /// Ranking direction used for `entries`.
    pub order: Order,
    /// How many ranked labels are listed.
    pub top_n: usize,
    /// Distinct items in the input, labelled or not.
    pub total_items: usize,
    /// Distinct labels in the input.
    pub total_labels: usize,
    /// Ranked label entries.
    pub entries: Vec<LabelCount>,
    /// Labels ranked past `top_n`.
    pub other_labels: usize,
    /// Item assignments summed over the labels past `top_n`.
    pub other_count: usize,
    /// Display-only option for histogram rendering width.
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

/// A single label with the items carrying it.
#[derive(Clone, Debug, Serialize)]
pub struct LabelCount {
    /// The label text.
    pub label: String,
    /// Number of items carrying the label.
    pub count: usize,
    /// `count / total_items`, 0.0 for an empty input.
    pub share: f64,
    /// Item ids in first-encounter order.
    pub ids: Vec<ItemId>,
}

impl LabelFrequencyReport {
    /// Renders the listed entries as `label,count` CSV.
    pub fn to_csv(&self) -> Result<String, LabelbenchError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["label", "count"])?;
        for entry in &self.entries {
            let count = entry.count.to_string();
            writer.write_record([entry.label.as_str(), count.as_str()])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| LabelbenchError::Io(err.into_error()))?;
        String::from_utf8(bytes).map_err(|err| LabelbenchError::InvalidInput(err.to_string()))
    }

    /// Renders the report as a Markdown table.
    pub fn to_markdown(&self) -> String {
        let mut lines = vec![
            "# Label Frequency Report".to_string(),
            String::new(),
            format!("- Total items: {}", self.total_items),
            format!("- Distinct labels: {}", self.total_labels),
            format!("- Order: {}", self.order),
            String::new(),
            "| Label | Items | Share |".to_string(),
            "| --- | --- | --- |".to_string(),
        ];
        for entry in &self.entries {
            lines.push(format!(
                "| {} | {} | {:.2}% |",
                entry.label.replace('|', "\\|"),
                entry.count,
                entry.share * 100.0
            ));
        }
        if self.other_labels > 0 {
            lines.push(format!(
                "| (other: {} labels) | {} | |",
                self.other_labels, self.other_count
            ));
        }
        lines.join("\n")
    }
}

impl fmt::Display for LabelFrequencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = if self.total_labels > self.top_n {
            format!(
                "Labels (top {} of {}, {})",
                self.top_n, self.total_labels, self.order
            )
        } else {
            format!("Labels ({}, {})", self.total_labels, self.order)
        };

        writeln!(
            f,
            "┌─ {} {}┐",
            header,
            "─".repeat(57usize.saturating_sub(header.chars().count()))
        )?;

        if self.entries.is_empty() {
            writeln!(f, "│   No labels found.")?;
        } else {
            let max_count = self.entries.iter().map(|e| e.count).max().unwrap_or(1);

            for entry in &self.entries {
                writeln!(
                    f,
                    "│   {:<16} {:>7} {:>6.1}%  {}",
                    truncate_label(&entry.label, 16),
                    format_number(entry.count),
                    entry.share * 100.0,
                    render_bar(entry.count, max_count, self.bar_width)
                )?;
            }

            if self.other_labels > 0 {
                writeln!(
                    f,
                    "│   {:<16} {:>7}  ({} more labels)",
                    "(other)",
                    format_number(self.other_count),
                    self.other_labels
                )?;
            }
        }

        writeln!(
            f,
            "└─ {} item(s) ─────────────────────────────────────────────",
            format_number(self.total_items)
        )
    }
}
