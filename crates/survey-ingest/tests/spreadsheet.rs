//! Loading a real workbook and cleaning what comes out of it.

use std::path::PathBuf;

use polars::prelude::{DataFrame, DataType};
use survey_ingest::{InputFormat, load_table};
use survey_model::ColumnMap;
use survey_transform::clean;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn texts(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    survey_common::column_strings(df, name).expect("column present")
}

#[test]
fn workbook_first_sheet_loads_with_typed_columns() {
    let path = fixture("responses.xlsx");
    assert_eq!(InputFormat::from_path(&path), InputFormat::Spreadsheet);

    let df = load_table(&path).expect("load workbook");

    assert_eq!(df.height(), 3);
    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["Service", "Region", "Satisfied", "Recommend", "Submitted", "Unnamed: 5"]
    );
    assert_eq!(df.column("Satisfied").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("Recommend").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("Region").unwrap().null_count(), 1);
    assert_eq!(
        texts(&df, "Service"),
        vec![
            Some(" laptop ".to_string()),
            Some("Phone".to_string()),
            Some("tablet".to_string()),
        ]
    );
    let submitted = texts(&df, "Submitted");
    assert!(
        submitted[0]
            .as_deref()
            .is_some_and(|value| value.starts_with("2024-01-15")),
        "date cell rendered as {submitted:?}"
    );
    assert_eq!(
        texts(&df, "Unnamed: 5"),
        vec![
            Some("called back".to_string()),
            None,
            Some("no reply".to_string()),
        ]
    );
}

#[test]
fn workbook_rows_clean_like_any_other_input() {
    let df = load_table(&fixture("responses.xlsx")).expect("load workbook");
    let columns =
        ColumnMap::new("Service", "Region", "Satisfied", "Recommend").with_date_col("Submitted");

    let cleaned = clean(&df, &columns).expect("clean workbook rows");

    assert_eq!(cleaned.height(), 2);
    assert_eq!(
        texts(&cleaned, "Service"),
        vec![Some("Laptop".to_string()), Some("Tablet".to_string())]
    );
    assert_eq!(
        texts(&cleaned, "Region"),
        vec![Some("North".to_string()), Some("South".to_string())]
    );
    assert_eq!(
        texts(&cleaned, "Submitted"),
        vec![Some("2024-01-15".to_string()), Some("2024-01-17".to_string())]
    );
    assert_eq!(
        texts(&cleaned, "Recommend"),
        vec![Some("true".to_string()), Some("false".to_string())]
    );
    assert_eq!(cleaned.column("Satisfied").unwrap().dtype(), &DataType::Boolean);
}
