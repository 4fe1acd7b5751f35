mod common;

use assert_cmd::Command;
use common::TestWorkspace;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn csv_triage() -> Command {
    Command::cargo_bin("csv-triage").expect("binary built")
}

#[test]
fn filter_reports_unnamed_columns() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "input.csv",
        "A,Unnamed: 0\n1,0\n2,1\n3,2\n4,3\n5,4\n6,5\n7,6\n8,7\n9,8\n10,9\n",
    );

    csv_triage()
        .args(["filter", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("Unnamed: 0").and(contains("Unnamed Column")));
}

#[test]
fn filter_writes_the_filtered_dataset() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "input.csv",
        "keep,sparse\n1,\n2,\n3,\n4,9\n",
    );
    let output = workspace.path().join("filtered.csv");

    csv_triage()
        .args(["filter", "--missing-threshold", "0.5", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("Excessive Missing Values"));

    let written = std::fs::read_to_string(&output).expect("filtered output");
    assert!(written.starts_with("keep\n"), "unexpected output: {written}");
    assert!(!written.contains("sparse"));
}

#[test]
fn filter_emits_json_reports() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("input.csv", "unnamed: 1,b\n1,2\n");

    csv_triage()
        .args(["filter", "--json", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("\"column\": \"unnamed: 1\"").and(contains("Unnamed Column")));
}

#[test]
fn filter_with_no_removals_prints_only_headers() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("input.csv", "a,b\n1,x\n2,y\n");

    csv_triage()
        .args(["filter", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("Column  Reason"));
}

#[test]
fn describe_prints_both_group_labels() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "input.csv",
        "age,city\n30,Oslo\n40,Bergen\n,Oslo\n",
    );

    csv_triage()
        .args(["describe", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(
            contains("Numeric Data")
                .and(contains("Non-Numeric Data"))
                .and(contains("mean"))
                .and(contains("top")),
        );
}

#[test]
fn describe_supports_json_output() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("input.csv", "score\n1.0\n2.0\n");

    csv_triage()
        .args(["describe", "--json", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("\"column\": \"score\"").and(contains("Numeric")));
}

#[test]
fn missing_input_fails_with_a_clear_error() {
    csv_triage()
        .args(["describe", "-i", "does-not-exist.csv"])
        .assert()
        .failure()
        .stderr(contains("does-not-exist.csv"));
}
