//! Extraction report rendering.

use serde::Serialize;
use std::fmt;

use super::ExtractionScore;
use crate::format::{format_ratio, single_line};

/// Renderable extraction summary.
#[derive(Clone, Debug, Serialize)]
pub struct ExtractReport {
    pub title: String,
    /// What was extracted ("user demands"), if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information_type: Option<String>,
    #[serde(flatten)]
    pub score: ExtractionScore,
}

impl ExtractReport {
    pub fn new(
        score: ExtractionScore,
        title: impl Into<String>,
        information_type: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            information_type,
            score,
        }
    }

    pub fn to_markdown(&self) -> String {
        let s = &self.score;
        let mut lines = vec![format!("# {}", self.title), String::new()];
        if let Some(kind) = &self.information_type {
            lines.push(format!("- Information type: {kind}"));
        }
        lines.extend([
            format!("- Expected item count: {}", s.expected.len()),
            format!("- Predicted item count: {}", s.predicted.len()),
            format!("- Matched item count: {}", s.matched.len()),
            format!("- Precision: {}", format_ratio(s.metrics.precision)),
            format!("- Recall Rate: {}", format_ratio(s.metrics.recall)),
            format!("- F1 Score: {:.2}", s.f1),
        ]);

        for (heading, items) in [
            ("Expected Items", &s.expected),
            ("Predicted Items", &s.predicted),
            ("Missed Items", &s.missed),
            ("Spurious Items", &s.spurious),
        ] {
            lines.push(String::new());
            lines.push(format!("## {heading}"));
            if items.is_empty() {
                lines.push("- None".to_string());
            }
            lines.extend(items.iter().map(|item| format!("- {}", single_line(item))));
        }

        lines.join("\n")
    }
}

impl fmt::Display for ExtractReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.score;
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(
            f,
            "  Expected {} / predicted {} / matched {}",
            s.expected.len(),
            s.predicted.len(),
            s.matched.len()
        )?;
        writeln!(
            f,
            "  Precision {}  Recall {}  F1 {:.2}",
            format_ratio(s.metrics.precision),
            format_ratio(s.metrics.recall),
            s.f1
        )?;
        for (heading, items) in [("Missed", &s.missed), ("Spurious", &s.spurious)] {
            writeln!(f)?;
            writeln!(f, "{} ({}):", heading, items.len())?;
            for item in items {
                writeln!(f, "  - {}", single_line(item))?;
            }
        }
        Ok(())
    }
}
