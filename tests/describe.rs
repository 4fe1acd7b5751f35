mod common;

use common::TestWorkspace;

use csv_triage::data::{ColumnKind, Value};
use csv_triage::describe::describe;
use csv_triage::load::load_dataset;

#[test]
fn summary_covers_every_column_once_with_group_tags() {
    let workspace = TestWorkspace::new();
    let input = workspace.write(
        "people.csv",
        "age,city,height,member\n\
         30,Oslo,1.8,yes\n\
         40,Bergen,1.7,no\n\
         ,Oslo,1.75,yes\n",
    );
    let dataset = load_dataset(&input, b',').expect("load dataset");
    let summary = describe(&dataset);

    let mut names: Vec<&str> = summary.rows().iter().map(|r| r.column.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["age", "city", "height", "member"]);

    let group_of = |name: &str| {
        summary
            .rows()
            .iter()
            .find(|r| r.column == name)
            .map(|r| r.group)
            .expect("row present")
    };
    assert_eq!(group_of("age"), ColumnKind::Numeric);
    assert_eq!(group_of("height"), ColumnKind::Numeric);
    assert_eq!(group_of("city"), ColumnKind::NonNumeric);
    assert_eq!(group_of("member"), ColumnKind::NonNumeric);
}

#[test]
fn numeric_block_rounds_and_counts_missing() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("values.csv", "C\n1.005\n2.0\nNA\n");
    let dataset = load_dataset(&input, b',').expect("load dataset");
    let summary = describe(&dataset);

    assert_eq!(summary.cell("C", "count"), Some(&Value::Integer(2)));
    assert_eq!(summary.cell("C", "mean"), Some(&Value::Float(1.5)));
    assert_eq!(summary.cell("C", "missing"), Some(&Value::Integer(1)));
}

#[test]
fn non_numeric_block_matches_the_category_scenario() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("categories.csv", "Category\nx\nx\ny\nNA\n");
    let dataset = load_dataset(&input, b',').expect("load dataset");
    let summary = describe(&dataset);

    assert_eq!(summary.cell("Category", "count"), Some(&Value::Integer(3)));
    assert_eq!(summary.cell("Category", "unique"), Some(&Value::Integer(2)));
    assert_eq!(summary.cell("Category", "top"), Some(&Value::Text("x".into())));
    assert_eq!(summary.cell("Category", "freq"), Some(&Value::Integer(2)));
    assert_eq!(summary.cell("Category", "missing"), Some(&Value::Integer(1)));
}

#[test]
fn mixed_groups_pad_the_other_groups_statistics() {
    let workspace = TestWorkspace::new();
    let input = workspace.write("mixed.csv", "n,t\n1,x\n2,y\n");
    let dataset = load_dataset(&input, b',').expect("load dataset");
    let summary = describe(&dataset);

    assert!(summary.statistics().contains(&"mean"));
    assert!(summary.statistics().contains(&"top"));
    assert_eq!(summary.cell("t", "mean"), None);
    assert_eq!(summary.cell("n", "top"), None);
    assert_eq!(summary.cell("n", "mean"), Some(&Value::Float(1.5)));
}
