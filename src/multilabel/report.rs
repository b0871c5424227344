//! Exact-match report rendering.

use serde::Serialize;
use std::fmt;

use super::ExactMatch;
use crate::format::{format_ratio, single_line};

/// One mismatched sample, with its source text.
#[derive(Clone, Debug, Serialize)]
pub struct SampleLine {
    /// One-based sample number.
    pub sample: usize,
    pub text: String,
    pub expected: Vec<String>,
    pub predicted: Vec<String>,
}

/// Renderable exact-match summary.
#[derive(Clone, Debug, Serialize)]
pub struct ExactMatchReport {
    pub title: String,
    /// Expected samples (ground truth length).
    pub total_samples: usize,
    /// Samples the classifier returned.
    pub predicted_samples: usize,
    /// Samples actually scored.
    pub scored: usize,
    pub accuracy: f64,
    pub mismatches: Vec<SampleLine>,
}

impl ExactMatchReport {
    /// Joins a scoring result with the input texts it was computed over.
    pub fn from_result(
        result: &ExactMatch,
        texts: &[String],
        predicted_samples: usize,
        title: impl Into<String>,
    ) -> Self {
        let total_samples = result
            .length_mismatch
            .map(|m| m.inputs)
            .unwrap_or(result.total);

        let mismatches = result
            .mismatches
            .iter()
            .map(|m| SampleLine {
                sample: m.index + 1,
                text: texts
                    .get(m.index)
                    .map(|text| single_line(text))
                    .unwrap_or_default(),
                expected: m.expected.clone().into_vec(),
                predicted: m.predicted.clone().into_vec(),
            })
            .collect();

        Self {
            title: title.into(),
            total_samples,
            predicted_samples,
            scored: result.total,
            accuracy: result.accuracy,
            mismatches,
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut lines = vec![
            format!("# {}", self.title),
            String::new(),
            format!("- Total samples: {}", self.total_samples),
            format!("- Predicted samples: {}", self.predicted_samples),
            format!("- Scored samples: {}", self.scored),
            format!("- Accuracy: {}", format_ratio(self.accuracy)),
            String::new(),
            "## Mismatches".to_string(),
        ];

        if self.mismatches.is_empty() {
            lines.push("- None".to_string());
        }
        for line in &self.mismatches {
            lines.extend([
                format!("- Sample #{}:", line.sample),
                format!("  - Text: {}", line.text),
                format!("  - Expected: {:?}", line.expected),
                format!("  - Predicted: {:?}", line.predicted),
            ]);
        }

        lines.join("\n")
    }
}

impl fmt::Display for ExactMatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(
            f,
            "  Scored {} of {} sample(s) ({} predicted)",
            self.scored, self.total_samples, self.predicted_samples
        )?;
        writeln!(f, "  Accuracy: {}", format_ratio(self.accuracy))?;
        writeln!(f)?;
        writeln!(f, "Mismatches ({}):", self.mismatches.len())?;
        if self.mismatches.is_empty() {
            writeln!(f, "  - (none)")?;
        }
        for line in &self.mismatches {
            writeln!(
                f,
                "  - #{} expected {:?}, predicted {:?}: {}",
                line.sample, line.expected, line.predicted, line.text
            )?;
        }
        Ok(())
    }
}
