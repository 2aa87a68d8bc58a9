//! Integration tests for the CLI application
//!
//! These tests run the `rknn` binary against request files on disk.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::{NamedTempFile, TempDir};

const REQUEST: &str = r#"{
  "options": { "numNeighbours": 3 },
  "train": {
    "X": [[2.0, 1.0], [1.8, 1.1], [2.2, 0.9], [-2.0, -1.0], [-1.8, -1.1], [-2.2, -0.9]],
    "y": ["pos", "pos", "pos", "neg", "neg", "neg"]
  },
  "query": [[1.6, 0.7], [-1.6, -0.7]]
}"#;

fn write_request(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".json").expect("Failed to create temp file");
    write!(file, "{contents}").expect("Failed to write");
    file.flush().expect("Failed to flush");
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rknn"))
        .args(args)
        .output()
        .expect("Failed to run CLI")
}

fn parse_points(json: &str) -> Vec<serde_json::Value> {
    serde_json::from_str(json).expect("Output should be a JSON array")
}

#[test]
fn test_cli_classify_stdout() {
    let request = write_request(REQUEST);
    let output = run(&["classify", "--request", request.path().to_str().unwrap()]);

    assert!(
        output.status.success(),
        "Classify command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let points = parse_points(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["classIndex"], "pos");
    assert_eq!(points[1]["classIndex"], "neg");
    assert_eq!(points[0]["features"], serde_json::json!([1.6, 0.7]));
    assert_eq!(points[0]["marked"], false);
}

#[test]
fn test_cli_classify_output_file() {
    let request = write_request(REQUEST);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("predictions.json");

    let output = run(&[
        "classify",
        "--request",
        request.path().to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert!(output_path.exists(), "Output file was not created");

    let contents = std::fs::read_to_string(&output_path).expect("Failed to read output");
    let points = parse_points(&contents);
    assert_eq!(points[0]["classIndex"], "pos");
    assert_eq!(points[1]["classIndex"], "neg");
}

#[test]
fn test_cli_numeric_labels_and_k_override() {
    let request = write_request(
        r#"{
  "train": { "X": [[0.0], [1.0], [2.0], [3.0]], "y": [7, 8, 7, 8] },
  "query": [[1.5]]
}"#,
    );

    // k = 4: tie between 7 and 8, first-seen (8) wins
    let output = run(&["classify", "-r", request.path().to_str().unwrap(), "-k", "4"]);
    assert!(output.status.success());
    let points = parse_points(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(points[0]["classIndex"], 8);

    // k = 1: nearest is index 1 (label 8) thanks to the stable order
    let output = run(&["classify", "-r", request.path().to_str().unwrap(), "-k", "1"]);
    assert!(output.status.success());
    let points = parse_points(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(points[0]["classIndex"], 8);
}

#[test]
fn test_cli_float_labels() {
    let request = write_request(
        r#"{
  "options": { "numNeighbours": 1 },
  "train": { "X": [[0.0], [10.0]], "y": [1.0, 2.5] },
  "query": [[0.4], [9.0]]
}"#,
    );
    let output = run(&["classify", "-r", request.path().to_str().unwrap()]);

    assert!(
        output.status.success(),
        "Classify command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let points = parse_points(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(points[0]["classIndex"], 1.0);
    assert_eq!(points[1]["classIndex"], 2.5);

    let output = run(&["neighbours", "-r", request.path().to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().filter(|l| !l.starts_with('#')).collect();
    assert_eq!(rows, vec!["0 0 0.400000 1", "1 1 1.000000 2.5"]);
}

#[test]
fn test_cli_neighbours() {
    let request = write_request(REQUEST);
    let output = run(&["neighbours", "--request", request.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().filter(|l| !l.starts_with('#')).collect();

    // 2 queries x 3 neighbours
    assert_eq!(rows.len(), 6);
    assert!(rows[0].starts_with("0 "));
    assert!(rows[0].ends_with(" pos"));
    assert!(rows[5].starts_with("1 "));
    assert!(rows[5].ends_with(" neg"));
}

#[test]
fn test_cli_shape_mismatch() {
    let request = write_request(
        r#"{ "train": { "X": [[1.0, 2.0], [3.0, 4.0]], "y": [0] }, "query": [[1.0, 2.0]] }"#,
    );
    let output = run(&["classify", "-r", request.path().to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Shape mismatch"), "stderr: {stderr}");
}

#[test]
fn test_cli_dimension_mismatch() {
    let request = write_request(
        r#"{ "train": { "X": [[1.0, 2.0]], "y": [0] }, "query": [[1.0, 2.0, 3.0]] }"#,
    );
    let output = run(&["classify", "-r", request.path().to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Dimension mismatch"), "stderr: {stderr}");
}

#[test]
fn test_cli_rejects_zero_neighbours() {
    let request = write_request(REQUEST);
    let output = run(&["classify", "-r", request.path().to_str().unwrap(), "-k", "0"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("numNeighbours"), "stderr: {stderr}");
}

#[test]
fn test_cli_invalid_request() {
    let request = write_request(r#"{ "train": { "X": [[1.0]] } }"#);
    let output = run(&["classify", "-r", request.path().to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid request"), "stderr: {stderr}");
}

#[test]
fn test_cli_missing_request_file() {
    let output = run(&["classify", "-r", "/nonexistent/request.json"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("classify"));
    assert!(stdout.contains("neighbours"));
}
