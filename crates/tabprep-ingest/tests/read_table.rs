//! Loader tests against files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::DataType;
use tabprep_ingest::{IngestError, column_cells, read_table};
use tabprep_model::{Cell, ReadOptions};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn names(df: &polars::prelude::DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|n| n.to_string()).collect()
}

#[test]
fn csv_names_are_normalized_and_sorted() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.csv", "Zip Code,Age,NAME\n1000,31,ann\n2000,,bob\n");

    let df = read_table(&path, &ReadOptions::default()).unwrap().frame;

    assert_eq!(names(&df), vec!["age", "name", "zipcode"]);
    assert_eq!(df.height(), 2);
    let age = df.column("age").unwrap();
    assert_eq!(column_cells(age), vec![Cell::Int(31), Cell::Missing]);
}

#[test]
fn csv_drop_fields_use_raw_names() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.csv", "Id,Age,Name\n1,31,ann\n2,40,bob\n");
    let options = ReadOptions::new().with_drop_fields(vec!["Id".to_string()]);

    let df = read_table(&path, &options).unwrap().frame;

    assert_eq!(names(&df), vec!["age", "name"]);
}

#[test]
fn dropping_absent_field_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.csv", "Age\n31\n");
    let options = ReadOptions::new().with_drop_fields(vec!["Weight".to_string()]);

    let err = read_table(&path, &options).unwrap_err();

    assert!(matches!(err, IngestError::ColumnNotFound { ref column, .. } if column == "Weight"));
}

#[test]
fn expected_fields_are_not_enforced() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "people.csv", "Age\n31\n");
    let options = ReadOptions::new().with_fields(vec!["height".to_string()]);

    let df = read_table(&path, &options).unwrap().frame;

    assert_eq!(names(&df), vec!["age"]);
}

#[test]
fn json_rows_become_columns() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "rows.json",
        r#"[{"B": 1, "A": "x"}, {"A": "y"}, {"B": 2.5, "C": true}]"#,
    );

    let df = read_table(&path, &ReadOptions::default()).unwrap().frame;

    assert_eq!(names(&df), vec!["a", "b", "c"]);
    assert_eq!(df.height(), 3);
    assert_eq!(df.column("b").unwrap().dtype(), &DataType::Float64);
    assert_eq!(
        column_cells(df.column("a").unwrap()),
        vec![Cell::Text("x".into()), Cell::Text("y".into()), Cell::Missing]
    );
}

#[test]
fn json_columns_with_row_labels_follow_numeric_order() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "cols.json",
        r#"{"v": {"10": 3, "2": 2, "0": 1}, "w": {"0": "a", "2": "b"}}"#,
    );

    let df = read_table(&path, &ReadOptions::default()).unwrap().frame;

    assert_eq!(
        column_cells(df.column("v").unwrap()),
        vec![Cell::Int(1), Cell::Int(2), Cell::Int(3)]
    );
    assert_eq!(
        column_cells(df.column("w").unwrap()),
        vec![Cell::Text("a".into()), Cell::Text("b".into()), Cell::Missing]
    );
}

#[test]
fn json_mixed_column_is_held_as_text_and_marked() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "mixed.json", r#"{"V": [1, "two", null], "W": [1, 2, 3]}"#);

    let table = read_table(&path, &ReadOptions::default()).unwrap();

    assert_eq!(
        column_cells(table.frame.column("v").unwrap()),
        vec![Cell::Text("1".into()), Cell::Text("two".into()), Cell::Missing]
    );
    assert_eq!(table.mixed.iter().collect::<Vec<_>>(), vec!["v"]);
}

#[test]
fn dropped_mixed_column_is_not_marked() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "mixed.json", r#"[{"c": 10, "d": 1}, {"c": "a", "d": 2}]"#);
    let options = ReadOptions::new().with_drop_fields(vec!["c".to_string()]);

    let table = read_table(&path, &options).unwrap();

    assert_eq!(names(&table.frame), vec!["d"]);
    assert!(table.mixed.is_empty());
}

#[test]
fn spreadsheet_reads_first_sheet_with_named_blank_headers() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/people.xlsx");

    let table = read_table(&path, &ReadOptions::default()).unwrap();
    let df = &table.frame;

    assert_eq!(names(df), vec!["column_2", "fullname", "score"]);
    assert_eq!(df.height(), 3);
    assert_eq!(
        column_cells(df.column("fullname").unwrap()),
        vec![Cell::from("ann"), Cell::from("bob"), Cell::from("cid")]
    );
    assert_eq!(
        column_cells(df.column("column_2").unwrap()),
        vec![Cell::Int(7), Cell::Missing, Cell::Int(3)]
    );
    assert_eq!(df.column("score").unwrap().dtype(), &DataType::Float64);
    assert_eq!(
        column_cells(df.column("score").unwrap()),
        vec![Cell::Float(1.5), Cell::Missing, Cell::Float(2.0)]
    );
    assert!(table.mixed.is_empty());
}

#[test]
fn json_scalar_top_level_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "scalar.json", "42");

    let err = read_table(&path, &ReadOptions::default()).unwrap_err();

    assert!(matches!(err, IngestError::JsonShape { .. }));
}

#[test]
fn unsupported_format_is_reported_before_reading() {
    let err = read_table(
        PathBuf::from("does/not/exist.parquet").as_path(),
        &ReadOptions::default(),
    )
    .unwrap_err();

    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = read_table(&dir.path().join("absent.csv"), &ReadOptions::default()).unwrap_err();

    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
