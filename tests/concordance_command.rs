// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
}

fn pets_dir() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir.path().join("a.txt"), "the cat sat on the mat");
    write_file(&dir.path().join("b.txt"), "the dog sat still");
    dir
}

fn conc(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("conc"));
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn json_of(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).expect("utf8");
    serde_json::from_str(&stdout).expect("json")
}

#[test]
fn right_sorted_concordance_json() {
    let dir = pets_dir();
    let assert = conc(&dir)
        .args(["--format", "json", "concordance", "sat", "-c", "2", "-o", "RIGHT"])
        .assert()
        .success();

    let json = json_of(assert.get_output());
    assert_eq!(json["kind"], "concordance");
    assert_eq!(json["order"], "1R2R3R");
    assert_eq!(json["summary"]["total_count"], 2);
    assert_eq!(json["summary"]["total_docs"], 2);
    assert_eq!(json["summary"]["page"], 1);
    assert_eq!(json["summary"]["total_pages"], 1);

    let rows = json["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["document_id"], 0);
    assert_eq!(rows[0]["left"], "the cat");
    assert_eq!(rows[0]["node"], "sat");
    assert_eq!(rows[0]["right"], "on the");
    assert_eq!(rows[1]["document_id"], 1);
    assert_eq!(rows[1]["left"], "the dog");
    assert_eq!(rows[1]["right"], "still");
    assert!(rows[0].get("sort_ranks").is_none());
}

#[test]
fn left_order_sorts_on_preceding_word() {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir.path().join("a.txt"), "zebra ran fast");
    write_file(&dir.path().join("b.txt"), "apple ran slow");

    let assert = conc(&dir)
        .args(["--format", "json", "kwic", "ran", "--order", "LEFT"])
        .assert()
        .success();

    let json = json_of(assert.get_output());
    assert_eq!(json["order"], "1L2L3L");
    let rows = json["rows"].as_array().expect("rows");
    assert_eq!(rows[0]["left"], "apple");
    assert_eq!(rows[1]["left"], "zebra");
}

#[test]
fn all_columns_adds_positions_and_offsets() {
    let dir = pets_dir();
    let assert = conc(&dir)
        .args([
            "--format",
            "json",
            "concordance",
            "cat",
            "-c",
            "1",
            "--all-columns",
        ])
        .assert()
        .success();

    let json = json_of(assert.get_output());
    assert_eq!(json["context_offsets"], serde_json::json!([-1, 0, 1]));
    let row = &json["rows"][0];
    assert_eq!(row["position"], 1);
    assert_eq!(row["left"], "the");
    assert_eq!(row["right"], "sat");
    assert_eq!(row["token_ids"].as_array().map(Vec::len), Some(3));
}

#[test]
fn maximal_context_width_is_served_from_the_stream() {
    let dir = pets_dir();
    let assert = conc(&dir)
        .args([
            "--format",
            "json",
            "concordance",
            "sat",
            "-c",
            "18446744073709551615",
        ])
        .assert()
        .success();

    let json = json_of(assert.get_output());
    assert_eq!(json["rows"][0]["left"], "the cat");
    assert_eq!(json["rows"][0]["right"], "on the mat");
    assert_eq!(json["rows"][1]["left"], "the dog");
    assert_eq!(json["rows"][1]["right"], "still");
}

#[test]
fn out_of_range_page_serves_last_page() {
    let dir = TempDir::new().expect("tempdir");
    let body: Vec<String> = (0..7).map(|i| format!("the word{i} end")).collect();
    write_file(&dir.path().join("a.txt"), &body.join(" . "));

    let assert = conc(&dir)
        .args([
            "--format", "json", "concordance", "end", "-n", "3", "-p", "99",
        ])
        .assert()
        .success();

    let json = json_of(assert.get_output());
    assert_eq!(json["summary"]["total_count"], 7);
    assert_eq!(json["summary"]["total_pages"], 3);
    assert_eq!(json["summary"]["page"], 3);
    assert_eq!(json["rows"].as_array().map(Vec::len), Some(1));
}

#[test]
fn invalid_order_is_rejected() {
    let dir = pets_dir();
    conc(&dir)
        .args(["concordance", "sat", "--order", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid order: 'sideways'"))
        .stderr(predicate::str::contains("1L2L3L"));
}

#[test]
fn zero_page_size_is_rejected() {
    let dir = pets_dir();
    conc(&dir)
        .args(["concordance", "sat", "--page-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid page size: 0"));
}

#[test]
fn unknown_word_yields_empty_report() {
    let dir = pets_dir();
    let assert = conc(&dir)
        .args(["--format", "json", "concordance", "giraffe"])
        .assert()
        .success();

    let json = json_of(assert.get_output());
    assert_eq!(json["summary"]["total_count"], 0);
    assert_eq!(json["summary"]["total_docs"], 0);
    assert_eq!(json["description"], "No matches");
    assert_eq!(json["rows"].as_array().map(Vec::len), Some(0));
}

#[test]
fn text_output_suggests_alternatives_on_no_match() {
    let dir = pets_dir();
    conc(&dir)
        .args(["concordance", "giraffe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Concordance for \"giraffe\""))
        .stderr(predicate::str::contains("No matches found for 'giraffe'"));
}

#[test]
fn text_output_lists_summary_and_lines() {
    let dir = pets_dir();
    conc(&dir)
        .args(["concordance", "sat", "-c", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Concordance Lines: 2"))
        .stdout(predicate::str::contains("Page 1 of 1"))
        .stdout(predicate::str::contains("[0]  the cat  sat  on the"));
}

#[test]
fn case_sensitive_flag_restricts_matches() {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir.path().join("a.txt"), "The cat and the dog");

    let assert = conc(&dir)
        .args(["--format", "json", "concordance", "the"])
        .assert()
        .success();
    assert_eq!(json_of(assert.get_output())["summary"]["total_count"], 2);

    let assert = conc(&dir)
        .args(["--format", "json", "concordance", "the", "--case-sensitive"])
        .assert()
        .success();
    assert_eq!(json_of(assert.get_output())["summary"]["total_count"], 1);
}

#[test]
fn project_config_supplies_defaults() {
    let dir = pets_dir();
    write_file(
        &dir.path().join(".concrc.toml"),
        "context_length = 1\norder = \"LEFT\"\ndefault_format = \"json\"\n",
    );

    let assert = conc(&dir).args(["concordance", "sat"]).assert().success();
    let json = json_of(assert.get_output());
    assert_eq!(json["context_length"], 1);
    assert_eq!(json["order"], "1L2L3L");
    assert_eq!(json["rows"][0]["left"], "cat");
    assert_eq!(json["rows"][1]["left"], "dog");

    let assert = conc(&dir)
        .args(["concordance", "sat", "-c", "2"])
        .assert()
        .success();
    assert_eq!(json_of(assert.get_output())["rows"][0]["left"], "the cat");
}

#[test]
fn missing_corpus_directory_fails() {
    let dir = TempDir::new().expect("tempdir");
    conc(&dir)
        .args(["concordance", "sat", "--dir", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path not found"));
}

#[test]
fn directory_without_texts_fails_with_hint() {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir.path().join("main.rs"), "fn main() {}");
    conc(&dir)
        .args(["concordance", "main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No documents found"));
}
