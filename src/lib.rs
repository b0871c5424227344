//! Labelbench: label aggregation and confusion scoring for text
//! classification benchmarks.
//!
//! Labelbench takes the output of a text classifier (per-item labels, kept
//! ids, extracted strings) and turns it into evaluation artifacts: inverted
//! label indexes, frequency rankings, confusion partitions with their ratio
//! metrics, and Markdown/JSON reports.
//!
//! # Modules
//!
//! - [`ir`]: Item ids, items, label sets and JSON readers
//! - [`aggregate`]: Label inversion and ranking by cardinality
//! - [`confusion`]: Binary confusion partitions, metrics and reports
//! - [`align`]: Positional alignment of predictions with inputs
//! - [`multilabel`]: Exact-match scoring of multi-label predictions
//! - [`extract`]: Overlap scoring for extracted strings
//! - [`classify`]: The classifier seam and batching
//! - [`error`]: Error types for labelbench operations

pub mod aggregate;
pub mod align;
pub mod classify;
pub mod confusion;
pub mod error;
pub mod extract;
mod format;
pub mod ir;
pub mod multilabel;

use std::collections::HashSet;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

pub use error::LabelbenchError;

use crate::ir::io_json::{self, DEFAULT_LABELS_FIELD};
use crate::ir::{Item, ItemId};

/// The labelbench CLI application.
#[derive(Parser)]
#[command(name = "labelbench")]
#[command(version, author, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Invert an id→labels mapping into label→ids.
    Invert(InvertArgs),
    /// Rank labels by how many items carry them.
    Rank(RankArgs),
    /// Score binary predictions against ground truth.
    Score(ScoreArgs),
    /// Score multi-label predictions by exact set match.
    ExactMatch(ExactMatchArgs),
    /// Score extracted strings by exact-text overlap.
    Extract(ExtractArgs),
    /// Replay recorded keep/drop labels and write the kept items.
    Sanitize(SanitizeArgs),
}

/// Arguments for the invert subcommand.
#[derive(clap::Args)]
struct InvertArgs {
    /// JSON file mapping item ids to labels.
    input: PathBuf,

    /// Record field holding labels when the input is a list of records.
    #[arg(long, default_value = DEFAULT_LABELS_FIELD, env = "LABELBENCH_LABELS_FIELD")]
    labels_field: String,

    /// Output format ('text', 'json', or 'markdown').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the rank subcommand.
#[derive(clap::Args)]
struct RankArgs {
    /// JSON file mapping item ids to labels.
    input: PathBuf,

    /// Record field holding labels when the input is a list of records.
    #[arg(long, default_value = DEFAULT_LABELS_FIELD, env = "LABELBENCH_LABELS_FIELD")]
    labels_field: String,

    /// Ranking direction ('asc' or 'desc').
    #[arg(long, default_value = "desc")]
    order: String,

    /// Number of labels to list.
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Output format ('text', 'json', 'markdown', or 'csv').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the score subcommand.
#[derive(clap::Args)]
struct ScoreArgs {
    /// JSON item list defining the universe.
    inputs: PathBuf,

    /// JSON list of ground-truth ids.
    expected: PathBuf,

    /// JSON list of predicted ids.
    predicted: PathBuf,

    /// Whether expected ids are the positive or the negative class.
    #[arg(long, default_value = "positive")]
    listed: String,

    /// Whether predicted ids are the positive or the negative class.
    #[arg(long, default_value = "positive")]
    predicted_listed: String,

    /// Report title.
    #[arg(long, default_value = "Binary Classification Report")]
    title: String,

    /// Name of the positive class in the report.
    #[arg(long, default_value = "kept")]
    positive_name: String,

    /// Output format ('text', 'json', or 'markdown').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the exact-match subcommand.
#[derive(clap::Args)]
struct ExactMatchArgs {
    /// JSON list of expected label lists, one per text.
    expected: PathBuf,

    /// JSON list of predicted label lists, one per text.
    predicted: PathBuf,

    /// JSON list of the input texts, for mismatch detail.
    #[arg(long)]
    texts: Option<PathBuf>,

    /// Report title.
    #[arg(long, default_value = "Text Classification Report")]
    title: String,

    /// Output format ('text', 'json', or 'markdown').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the extract subcommand.
#[derive(clap::Args)]
struct ExtractArgs {
    /// JSON list of expected strings.
    expected: PathBuf,

    /// JSON list of extracted strings.
    predicted: PathBuf,

    /// What was extracted, shown in the report.
    #[arg(long)]
    information_type: Option<String>,

    /// Report title.
    #[arg(long, default_value = "Information Extraction Report")]
    title: String,

    /// Output format ('text', 'json', or 'markdown').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the sanitize subcommand.
#[derive(clap::Args)]
struct SanitizeArgs {
    /// JSON item list to sanitize.
    input: PathBuf,

    /// JSON list of recorded labels, one entry per item.
    labels: PathBuf,

    /// Write kept items to this JSON file.
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Label marking an item as kept.
    #[arg(long, default_value = "keep", env = "LABELBENCH_POSITIVE_LABEL")]
    positive_label: String,

    /// Items per classifier call.
    #[arg(long, default_value_t = classify::DEFAULT_BATCH_SIZE, env = "LABELBENCH_BATCH_SIZE")]
    batch_size: usize,

    /// Output format ('text', 'json', or 'markdown').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the labelbench CLI on parsed arguments.
///
/// This is the main entry point for the CLI, called from `main.rs` once
/// logging is set up.
pub fn run(cli: Cli) -> Result<(), LabelbenchError> {
    match cli.command {
        Some(Commands::Invert(args)) => run_invert(args),
        Some(Commands::Rank(args)) => run_rank(args),
        Some(Commands::Score(args)) => run_score(args),
        Some(Commands::ExactMatch(args)) => run_exact_match(args),
        Some(Commands::Extract(args)) => run_extract(args),
        Some(Commands::Sanitize(args)) => run_sanitize(args),
        None => {
            // No subcommand: print a help hint and exit successfully
            println!("labelbench {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Label aggregation and confusion scoring for text classification benchmarks.");
            println!();
            println!("Run 'labelbench --help' for usage information.");
            Ok(())
        }
    }
}

/// Report output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
    Csv,
}

fn parse_output(value: &str, allow_csv: bool) -> Result<OutputFormat, LabelbenchError> {
    match value {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "csv" if allow_csv => Ok(OutputFormat::Csv),
        other => {
            let supported = if allow_csv {
                "text, json, markdown, csv"
            } else {
                "text, json, markdown"
            };
            Err(LabelbenchError::UnsupportedFormat(format!(
                "'{other}' (supported: {supported})"
            )))
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), LabelbenchError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|source| LabelbenchError::JsonWrite {
            path: PathBuf::from("<stdout>"),
            source,
        })?;
    println!("{rendered}");
    Ok(())
}

/// Execute the invert subcommand.
fn run_invert(args: InvertArgs) -> Result<(), LabelbenchError> {
    let output = parse_output(&args.output, false)?;
    let pairs = io_json::read_id2labels(&args.input, &args.labels_field)?;
    let index = aggregate::invert(pairs);
    tracing::info!(
        items = index.item_count(),
        labels = index.len(),
        "inverted label mapping"
    );

    match output {
        OutputFormat::Json => print_json(&index)?,
        OutputFormat::Markdown => {
            println!("| Label | Count | Ids |");
            println!("|---|---:|---|");
            for (label, ids) in index.iter() {
                println!("| {} | {} | {} |", label, ids.len(), join_ids(ids));
            }
        }
        _ => {
            for (label, ids) in index.iter() {
                println!("{} ({}): {}", label, ids.len(), join_ids(ids));
            }
        }
    }
    Ok(())
}

fn join_ids(ids: &[ItemId]) -> String {
    ids.iter()
        .map(ItemId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Execute the rank subcommand.
fn run_rank(args: RankArgs) -> Result<(), LabelbenchError> {
    let output = parse_output(&args.output, true)?;
    let opts = aggregate::RankOptions {
        order: args.order.parse()?,
        top_n: args.top,
        ..Default::default()
    };

    let pairs = io_json::read_id2labels(&args.input, &args.labels_field)?;
    let index = aggregate::invert(pairs);
    let report = aggregate::label_frequency(&index, &opts);

    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Markdown => println!("{}", report.to_markdown()),
        OutputFormat::Csv => print!("{}", report.to_csv()?),
        OutputFormat::Text => print!("{report}"),
    }
    Ok(())
}

/// Execute the score subcommand.
fn run_score(args: ScoreArgs) -> Result<(), LabelbenchError> {
    let output = parse_output(&args.output, false)?;
    let expected_as: confusion::ListedAs = args.listed.parse()?;
    let predicted_as: confusion::ListedAs = args.predicted_listed.parse()?;

    let items = io_json::read_items(&args.inputs)?;
    let universe: Vec<ItemId> = items.iter().map(|item| item.id.clone()).collect();
    let expected = listed_set(&args.expected)?;
    let predicted = listed_set(&args.predicted)?;

    let expected = confusion::positive_ids(&universe, &expected, expected_as);
    let predicted = confusion::positive_ids(&universe, &predicted, predicted_as);
    let partition = confusion::score_confusion(&universe, &expected, &predicted);

    let opts = confusion::BinaryReportOptions {
        title: args.title,
        positive_name: args.positive_name,
        ..Default::default()
    };
    let report = confusion::BinaryReport::from_partition(&partition, &items, &opts);

    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Markdown => println!("{}", report.to_markdown()),
        _ => print!("{report}"),
    }
    Ok(())
}

fn listed_set(path: &std::path::Path) -> Result<HashSet<ItemId>, LabelbenchError> {
    Ok(io_json::read_id_list(path)?.into_iter().collect())
}

/// Execute the exact-match subcommand.
fn run_exact_match(args: ExactMatchArgs) -> Result<(), LabelbenchError> {
    let output = parse_output(&args.output, false)?;
    let expected = io_json::read_label_lists(&args.expected)?;
    let predicted = io_json::read_label_lists(&args.predicted)?;
    let texts = match &args.texts {
        Some(path) => io_json::read_string_list(path)?,
        None => Vec::new(),
    };

    let result = multilabel::score_exact_match(&expected, &predicted);
    let report =
        multilabel::ExactMatchReport::from_result(&result, &texts, predicted.len(), args.title);

    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Markdown => println!("{}", report.to_markdown()),
        _ => print!("{report}"),
    }
    Ok(())
}

/// Execute the extract subcommand.
fn run_extract(args: ExtractArgs) -> Result<(), LabelbenchError> {
    let output = parse_output(&args.output, false)?;
    let expected = io_json::read_string_list(&args.expected)?;
    let predicted = io_json::read_string_list(&args.predicted)?;

    let score = extract::score_extraction(&expected, &predicted);
    let report = extract::ExtractReport::new(score, args.title, args.information_type);

    match output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Markdown => println!("{}", report.to_markdown()),
        _ => print!("{report}"),
    }
    Ok(())
}

/// Counts reported by the sanitize subcommand.
#[derive(Serialize)]
struct SanitizeSummary {
    items: usize,
    classified: usize,
    kept: Vec<ItemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length_mismatch: Option<align::LengthMismatch>,
}

/// Execute the sanitize subcommand.
fn run_sanitize(args: SanitizeArgs) -> Result<(), LabelbenchError> {
    let output = parse_output(&args.output, false)?;
    let items = io_json::read_items(&args.input)?;
    let recorded = io_json::read_label_lists(&args.labels)?;

    let classifier = classify::ReplayClassifier::new(recorded);
    let opts = classify::SanitizeOptions {
        positive_label: args.positive_label,
        batch_size: args.batch_size,
    };
    let kept = classify::sanitize(&items, &classifier, &opts)?;

    if let Some(path) = &args.out {
        io_json::write_items(path, &kept.value)?;
        tracing::info!(path = %path.display(), kept = kept.value.len(), "wrote kept items");
    }

    let summary = SanitizeSummary {
        items: items.len(),
        classified: kept.mismatch.map_or(items.len(), |m| m.aligned()),
        kept: kept.value.iter().map(|item: &Item| item.id.clone()).collect(),
        out: args.out,
        length_mismatch: kept.mismatch,
    };

    match output {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Markdown => {
            println!("# Sanitize Report");
            println!();
            println!("- Items: {}", summary.items);
            println!("- Classified: {}", summary.classified);
            println!("- Kept: {}", summary.kept.len());
            if let Some(mismatch) = &summary.length_mismatch {
                println!("- Warning: {mismatch}");
            }
        }
        _ => {
            println!(
                "Kept {} of {} item(s) ({} classified)",
                summary.kept.len(),
                summary.items,
                summary.classified
            );
            if let Some(mismatch) = &summary.length_mismatch {
                println!("Warning: {mismatch}");
            }
        }
    }
    Ok(())
}
