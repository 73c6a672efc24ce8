use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const SETTINGS: &str = r#"{
    "initials": ["-", "R", "I", "A", "S", "E", "C"],
    "max_weight": 4,
    "links": { "code_1": "https://a.example/{}" }
}"#;

// 204 = (3, 1, 4) and 225 = (3, 4, 1) in base 8
const TABLE: &str = r#"{
    "204": [["11-1011", "Chief Executives", "A", "Management"]],
    "225": [{ "code_1": "27-1011", "title_1": "Art Directors", "code_2": "B", "title_2": "Arts" }]
}"#;

// A = 7, R = 5, S = 5
const ANSWERS: &str = r#"[
    [{ "category": 3, "weight": 4 }, { "category": 1, "weight": 4 }],
    [{ "category": 3, "weight": 3 }, { "category": 4, "weight": 4 }, { "category": 1, "weight": 1 }, { "category": 4, "weight": 1 }]
]"#;

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, body).unwrap();
    p
}

struct Inputs {
    dir: tempfile::TempDir,
    settings: PathBuf,
    table: PathBuf,
    answers: PathBuf,
}

fn inputs(answers: &str) -> Inputs {
    let dir = tempfile::tempdir().unwrap();
    Inputs {
        settings: write(dir.path(), "settings.json", SETTINGS),
        table: write(dir.path(), "table.json", TABLE),
        answers: write(dir.path(), "answers.json", answers),
        dir,
    }
}

fn qz(i: &Inputs) -> Command {
    let mut cmd = Command::cargo_bin("qz").unwrap();
    cmd.arg("--settings").arg(&i.settings).arg("--table").arg(&i.table).arg("--answers").arg(&i.answers);
    cmd
}

#[test]
fn resolves_to_json_on_stdout() {
    let i = inputs(ANSWERS);
    let out = qz(&i).arg("--quiet").output().unwrap();
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["resolved_by"], "tied_second");
    let results = v["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["rank_label"], "A-R-S");
    assert_eq!(results[0]["link_1"], "https://a.example/11-1011");
    assert_eq!(results[1]["rank_label"], "A-S-R");
    assert_eq!(results[1]["title_1"], "Art Directors");
}

#[test]
fn text_format_with_scores() {
    let i = inputs(ANSWERS);
    qz(&i)
        .args(["--format", "text", "--show-scores", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A=7"))
        .stdout(predicate::str::contains("tier 2: R S (5)"))
        .stdout(predicate::str::contains("A-S-R  27-1011  Art Directors | B  Arts"));
}

#[test]
fn writes_to_out_file() {
    let i = inputs(ANSWERS);
    let out = i.dir.path().join("result.json");
    qz(&i).arg("--out").arg(&out).arg("--quiet").assert().success().stdout(predicate::str::is_empty());

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["results"].as_array().unwrap().len(), 2);
}

#[test]
fn unmatched_scores_give_empty_results_and_success() {
    let i = inputs(r#"[{ "category": 6, "weight": 1 }]"#);
    let out = qz(&i).arg("--quiet").output().unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["resolved_by"], serde_json::Value::Null);
    assert!(v["results"].as_array().unwrap().is_empty());
}

#[test]
fn validate_only_prints_nothing() {
    let i = inputs(ANSWERS);
    qz(&i).args(["--validate-only", "--quiet"]).assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn weight_over_cap_is_a_validation_error() {
    let i = inputs(r#"[{ "category": 3, "weight": 5 }]"#);
    qz(&i).assert().code(2).stderr(predicate::str::contains("/0/weight"));
}

#[test]
fn category_outside_domain_is_a_validation_error() {
    let i = inputs(r#"[{ "category": 7, "weight": 1 }]"#);
    qz(&i).assert().code(2).stderr(predicate::str::contains("invalid category 7"));
}

#[test]
fn missing_input_is_an_io_error() {
    let i = inputs(ANSWERS);
    Command::cargo_bin("qz")
        .unwrap()
        .arg("--table")
        .arg(&i.table)
        .arg("--answers")
        .arg(i.dir.path().join("missing.json"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--answers"));
}

#[test]
fn remote_paths_are_rejected() {
    let i = inputs(ANSWERS);
    Command::cargo_bin("qz")
        .unwrap()
        .args(["--table", "https://example.org/table.json", "--answers"])
        .arg(&i.answers)
        .assert()
        .code(2);
}

#[test]
fn settings_are_optional() {
    let i = inputs(ANSWERS);
    let out = Command::cargo_bin("qz")
        .unwrap()
        .arg("--table")
        .arg(&i.table)
        .arg("--answers")
        .arg(&i.answers)
        .arg("--quiet")
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    // no initials: labels fall back to category numbers
    assert_eq!(v["results"][0]["rank_label"], "3-1-4");
}
