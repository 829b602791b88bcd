//! Integration tests for the run pipeline and the column report.

use std::fs;
use std::path::{Path, PathBuf};

use tabprep_cli::pipeline::{PrepareConfig, default_output_path, prepare, write_csv};
use tabprep_cli::summary::{render_report, summarize};
use tabprep_model::ReadOptions;
use tabprep_transform::Dataset;

const PEOPLE: &str = "Name,Score,City\nann,1.5,Oslo\nbob,,Rome\ncid,2.5,\ncid,2.5,\n";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn report_lists_columns_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "people.csv", PEOPLE);
    let dataset = Dataset::read(&input, &ReadOptions::default()).unwrap();

    insta::assert_snapshot!(render_report(&dataset).trim_end(), @r"
    4 rows x 3 columns
    city: text, 2 missing
    name: text, 0 missing
    score: float, 1 missing
    ");
}

#[test]
fn recipe_run_fills_encodes_and_deduplicates() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "people.csv", PEOPLE);
    let recipe = write_file(
        dir.path(),
        "recipe.json",
        r#"{
            "steps": [
                { "op": "preprocess", "text_fill": "none" },
                { "op": "str_to_num_all" },
                { "op": "remove_duplicates" }
            ]
        }"#,
    );
    let config = PrepareConfig {
        recipe: Some(recipe),
        ..PrepareConfig::default()
    };
    let dataset = prepare(&input, &config).unwrap();

    insta::assert_snapshot!(render_report(&dataset).trim_end(), @r"
    3 rows x 3 columns
    city: integer, 0 missing
    name: integer, 0 missing
    score: float, 0 missing
    ");
}

#[test]
fn written_csv_reads_back_with_same_shape() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "people.csv", PEOPLE);
    let config = PrepareConfig {
        drop_fields: vec!["City".to_string()],
        ..PrepareConfig::default()
    };
    let dataset = prepare(&input, &config).unwrap();
    let output = default_output_path(&input);
    write_csv(&dataset, &output).unwrap();

    assert_eq!(output, dir.path().join("people.prepared.csv"));
    let reread = Dataset::read(&output, &ReadOptions::default()).unwrap();
    assert_eq!(reread.height(), 4);
    assert_eq!(reread.column_names(), vec!["name", "score"]);
    assert_eq!(summarize(&reread), summarize(&dataset));
}

#[test]
fn missing_recipe_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "people.csv", PEOPLE);
    let config = PrepareConfig {
        recipe: Some(dir.path().join("absent.json")),
        ..PrepareConfig::default()
    };
    let err = prepare(&input, &config).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn unsupported_input_fails_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "people.txt", PEOPLE);
    let err = prepare(&input, &PrepareConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("is not supported yet"));
}

#[test]
fn report_flags_mixed_columns() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "tags.json", r#"{"Tag": [1, "b", null], "N": [1, 2, 3]}"#);
    let dataset = Dataset::read(&input, &ReadOptions::default()).unwrap();

    insta::assert_snapshot!(render_report(&dataset).trim_end(), @r"
    3 rows x 2 columns
    n: integer, 0 missing
    tag: mixed, 1 missing
    ");
}
