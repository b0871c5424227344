use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

mod common;

fn labelbench() -> Command {
    Command::cargo_bin("labelbench").unwrap()
}

#[test]
fn runs() {
    labelbench().assert().success();
}

#[test]
fn outputs_tool_name() {
    let mut cmd = labelbench();
    cmd.arg("-V");
    cmd.assert().success().stdout("labelbench 0.1.0\n");
}

// Invert and rank

#[test]
fn invert_json_output_groups_ids_by_label() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(dir.path(), "id2labels.json", &common::id2labels());

    let output = labelbench()
        .args(["invert", input.to_str().unwrap(), "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let index: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        index,
        json!({"export": [1, 2, 3], "pricing": [5], "speed": [1, 3]})
    );
}

#[test]
fn invert_reads_records_with_custom_field() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(
        dir.path(),
        "records.json",
        &json!([
            {"id": "a", "demands": ["dark mode"]},
            {"id": "b", "demands": "dark mode"},
        ]),
    );

    labelbench()
        .args(["invert", input.to_str().unwrap(), "--labels-field", "demands"])
        .assert()
        .success()
        .stdout("dark mode (2): a, b\n");
}

#[test]
fn invert_rejects_float_ids() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(dir.path(), "bad.json", &json!([{"id": 1.5, "labels": []}]));

    labelbench()
        .args(["invert", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input in"))
        .stderr(predicate::str::contains("entry 0"));
}

#[test]
fn rank_csv_is_sorted_by_count() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(dir.path(), "id2labels.json", &common::id2labels());

    labelbench()
        .args(["rank", input.to_str().unwrap(), "--output", "csv"])
        .assert()
        .success()
        .stdout("label,count\nexport,3\nspeed,2\npricing,1\n");
}

#[test]
fn rank_ascending_with_top() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(dir.path(), "id2labels.json", &common::id2labels());

    labelbench()
        .args([
            "rank",
            input.to_str().unwrap(),
            "--order",
            "asc",
            "--top",
            "2",
            "--output",
            "csv",
        ])
        .assert()
        .success()
        .stdout("label,count\npricing,1\nspeed,2\n");
}

#[test]
fn rank_text_output_has_header() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(dir.path(), "id2labels.json", &common::id2labels());

    labelbench()
        .args(["rank", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Labels (3, desc)"))
        .stdout(predicate::str::contains("5 item(s)"));
}

#[test]
fn rank_rejects_unknown_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(dir.path(), "id2labels.json", &common::id2labels());

    labelbench()
        .args(["rank", input.to_str().unwrap(), "--order", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported order: 'sideways'"));
}

#[test]
fn unknown_output_format_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(dir.path(), "id2labels.json", &common::id2labels());

    labelbench()
        .args(["invert", input.to_str().unwrap(), "--output", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));
}

// Binary scoring

#[test]
fn score_markdown_report() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = common::write_json(dir.path(), "comments.json", &common::comments());
    let expected = common::write_json(dir.path(), "expected.json", &json!([1, 2]));
    let predicted = common::write_json(dir.path(), "predicted.json", &json!([1, 3]));

    labelbench()
        .args([
            "score",
            inputs.to_str().unwrap(),
            expected.to_str().unwrap(),
            predicted.to_str().unwrap(),
            "--output",
            "markdown",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("| Accuracy | 50.00% |"))
        .stdout(predicate::str::contains("| F1 Score | 0.50 |"))
        .stdout(predicate::str::contains(
            "- id=3, user=cy, content=buy followers now",
        ))
        .stdout(predicate::str::contains(
            "- id=2, user=bob, content=Crashes on startup",
        ));
}

#[test]
fn score_json_with_negative_listing() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = common::write_json(dir.path(), "comments.json", &common::comments());
    // Ground truth lists the items that should be filtered out.
    let dropped = common::write_json(dir.path(), "dropped.json", &json!([3, 4]));
    let predicted = common::write_json(
        dir.path(),
        "predicted.json",
        &json!([{"id": 1, "content": "Love the new export"}, {"id": 3}]),
    );

    let output = labelbench()
        .args([
            "score",
            inputs.to_str().unwrap(),
            dropped.to_str().unwrap(),
            predicted.to_str().unwrap(),
            "--listed",
            "negative",
            "--output",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["counts"], json!({"tp": 1, "fp": 1, "fn": 1, "tn": 1, "total": 4}));
    assert_eq!(report["metrics"]["accuracy"], 0.5);
    assert_eq!(report["false_negatives"][0]["id"], 2);
}

#[test]
fn score_missing_file_fails() {
    labelbench()
        .args(["score", "nope.json", "nope.json", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

// Multi-label and extraction

#[test]
fn exact_match_warns_on_short_predictions() {
    let dir = tempfile::tempdir().unwrap();
    let expected = common::write_json(dir.path(), "expected.json", &json!([["a"], ["b"], ["c"]]));
    let predicted = common::write_json(dir.path(), "predicted.json", &json!([["a"], "x"]));

    let output = labelbench()
        .env_remove("RUST_LOG")
        .args([
            "exact-match",
            expected.to_str().unwrap(),
            predicted.to_str().unwrap(),
            "--output",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["scored"], 2);
    assert_eq!(report["total_samples"], 3);
    assert_eq!(report["accuracy"], 0.5);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("does not match input count"));
}

#[test]
fn exact_match_markdown_includes_texts() {
    let dir = tempfile::tempdir().unwrap();
    let expected = common::write_json(dir.path(), "expected.json", &json!([["bug"], ["praise"]]));
    let predicted = common::write_json(dir.path(), "predicted.json", &json!([["bug"], ["bug"]]));
    let texts = common::write_json(dir.path(), "texts.json", &json!(["it crashed", "love it"]));

    labelbench()
        .args([
            "exact-match",
            expected.to_str().unwrap(),
            predicted.to_str().unwrap(),
            "--texts",
            texts.to_str().unwrap(),
            "--output",
            "markdown",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Sample #2:"))
        .stdout(predicate::str::contains("  - Text: love it"));
}

#[test]
fn extract_markdown_lists_missed_items() {
    let dir = tempfile::tempdir().unwrap();
    let expected = common::write_json(dir.path(), "expected.json", &json!(["4K export", "voice"]));
    let predicted = common::write_json(dir.path(), "predicted.json", &json!([" voice", "ads"]));

    labelbench()
        .args([
            "extract",
            expected.to_str().unwrap(),
            predicted.to_str().unwrap(),
            "--output",
            "markdown",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Precision: 50.00%"))
        .stdout(predicate::str::contains("## Missed Items\n- 4K export"));
}

// Sanitize

#[test]
fn sanitize_writes_kept_items() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(dir.path(), "comments.json", &common::comments());
    let labels = common::write_json(
        dir.path(),
        "labels.json",
        &json!(["keep", ["keep"], "drop", "drop"]),
    );
    let out = dir.path().join("out").join("kept.json");

    labelbench()
        .args([
            "sanitize",
            input.to_str().unwrap(),
            labels.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--batch-size",
            "3",
        ])
        .assert()
        .success()
        .stdout("Kept 2 of 4 item(s) (4 classified)\n");

    let kept: Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
    assert_eq!(kept[0]["id"], 1);
    assert_eq!(kept[1]["user"], "bob");
    assert_eq!(kept.as_array().map(Vec::len), Some(2));
}

#[test]
fn sanitize_short_labels_warn_but_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(dir.path(), "comments.json", &common::comments());
    let labels = common::write_json(dir.path(), "labels.json", &json!(["keep", "drop", "keep"]));

    labelbench()
        .args(["sanitize", input.to_str().unwrap(), labels.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kept 2 of 4 item(s) (3 classified)"))
        .stdout(predicate::str::contains(
            "prediction count (3) does not match input count (4); truncating to 3",
        ));
}

#[test]
fn sanitize_batch_size_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(dir.path(), "comments.json", &common::comments());
    let labels = common::write_json(dir.path(), "labels.json", &json!(["keep", "keep", "keep", "keep"]));

    labelbench()
        .env("LABELBENCH_BATCH_SIZE", "0")
        .args(["sanitize", input.to_str().unwrap(), labels.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("batch size must be at least 1"));
}

#[test]
fn sanitize_custom_positive_label_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_json(dir.path(), "comments.json", &common::comments());
    let labels = common::write_json(
        dir.path(),
        "labels.json",
        &json!(["retain", "retain", "spam", "retain"]),
    );

    let output = labelbench()
        .args([
            "sanitize",
            input.to_str().unwrap(),
            labels.to_str().unwrap(),
            "--positive-label",
            "retain",
            "--output",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["kept"], json!([1, 2, 4]));
    assert!(summary.get("length_mismatch").is_none());
}
