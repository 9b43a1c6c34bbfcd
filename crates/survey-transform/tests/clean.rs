//! Cleaning and deduplication behavior over whole tables.

use polars::prelude::{AnyValue, DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

use survey_common::column_strings;
use survey_model::{ColumnMap, TriState};
use survey_transform::{
    canonicalize_text, clean, concat_tables, dedupe, normalize_tri_state_boolean,
};

fn columns() -> ColumnMap {
    ColumnMap::new("Service", "Region", "Satisfied", "Recommend")
}

fn survey(rows: &[(&str, &str, &str, &str)]) -> DataFrame {
    let service: Vec<&str> = rows.iter().map(|r| r.0).collect();
    let region: Vec<&str> = rows.iter().map(|r| r.1).collect();
    let satisfied: Vec<&str> = rows.iter().map(|r| r.2).collect();
    let recommend: Vec<&str> = rows.iter().map(|r| r.3).collect();
    DataFrame::new(vec![
        Series::new("Service".into(), service).into_column(),
        Series::new("Region".into(), region).into_column(),
        Series::new("Satisfied".into(), satisfied).into_column(),
        Series::new("Recommend".into(), recommend).into_column(),
    ])
    .unwrap()
}

fn texts(df: &DataFrame, name: &str) -> Vec<String> {
    column_strings(df, name)
        .unwrap()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect()
}

#[test]
fn maybe_answers_are_unknown_and_dropped() {
    let df = survey(&[
        ("Laptop", "North", "yes", "yes"),
        ("Laptop", "North", "1", "yes"),
        ("Laptop", "North", "1.0", "yes"),
        ("Laptop", "North", "maybe", "yes"),
    ]);
    let states = normalize_tri_state_boolean(df.column("Satisfied").unwrap());
    assert_eq!(
        states,
        vec![
            TriState::True,
            TriState::True,
            TriState::True,
            TriState::Unknown
        ]
    );

    let cleaned = clean(&df, &columns()).unwrap();
    assert_eq!(cleaned.height(), 3);
    let satisfied = cleaned.column("Satisfied").unwrap();
    for idx in 0..cleaned.height() {
        assert_eq!(satisfied.get(idx).unwrap(), AnyValue::Boolean(true));
    }
}

#[test]
fn blank_service_or_region_rows_are_dropped() {
    let df = survey(&[
        ("  laptop ", "north", "yes", "Y"),
        ("   ", "north", "yes", "Y"),
        ("Phone", "", "no", "n"),
    ]);
    let cleaned = clean(&df, &columns()).unwrap();
    assert_eq!(cleaned.height(), 1);
    assert_eq!(texts(&cleaned, "Service"), vec!["Laptop"]);
    assert_eq!(texts(&cleaned, "Region"), vec!["North"]);
}

#[test]
fn null_required_values_are_dropped() {
    let df = DataFrame::new(vec![
        Series::new("Service".into(), &[Some("Laptop"), None]).into_column(),
        Series::new("Region".into(), &[Some("North"), Some("South")]).into_column(),
        Series::new("Satisfied".into(), &[Some(1i64), Some(0)]).into_column(),
        Series::new("Recommend".into(), &[Some(0i64), None]).into_column(),
    ])
    .unwrap();
    let cleaned = clean(&df, &columns()).unwrap();
    assert_eq!(cleaned.height(), 1);
    assert_eq!(
        cleaned.column("Recommend").unwrap().get(0).unwrap(),
        AnyValue::Boolean(false)
    );
}

#[test]
fn unparseable_dates_keep_the_row() {
    let df = DataFrame::new(vec![
        Series::new("Service".into(), &["Laptop", "Phone"]).into_column(),
        Series::new("Region".into(), &["North", "South"]).into_column(),
        Series::new("Satisfied".into(), &["yes", "no"]).into_column(),
        Series::new("Recommend".into(), &["yes", "no"]).into_column(),
        Series::new("When".into(), &["2024-03-01", "whenever"]).into_column(),
    ])
    .unwrap();
    let cleaned = clean(&df, &columns().with_date_col("When")).unwrap();
    assert_eq!(cleaned.height(), 2);
    assert_eq!(
        column_strings(&cleaned, "When").unwrap(),
        vec![Some("2024-03-01".to_string()), None]
    );
}

#[test]
fn later_duplicate_wins_on_respondent_id() {
    let df = DataFrame::new(vec![
        Series::new("Id".into(), &["r1", "r2", "r1"]).into_column(),
        Series::new("Service".into(), &["Laptop", "Phone", "Tablet"]).into_column(),
        Series::new("Region".into(), &["North", "South", "East"]).into_column(),
        Series::new("Satisfied".into(), &[true, false, false]).into_column(),
        Series::new("Recommend".into(), &[true, true, false]).into_column(),
    ])
    .unwrap();
    let map = columns().with_respondent_id_col("Id");
    let deduped = dedupe(&df, &map).unwrap();
    assert_eq!(deduped.height(), 2);
    assert_eq!(texts(&deduped, "Id"), vec!["r2", "r1"]);
    assert_eq!(texts(&deduped, "Service"), vec!["Phone", "Tablet"]);
}

#[test]
fn duplicates_across_files_collapse_after_merge() {
    let first = clean(&survey(&[("laptop", "north", "yes", "y")]), &columns()).unwrap();
    let second = clean(
        &survey(&[("Laptop", "North", "true", "1"), ("Phone", "South", "no", "no")]),
        &columns(),
    )
    .unwrap();
    let batch = concat_tables(&[first, second]).unwrap();
    assert_eq!(batch.height(), 3);
    let deduped = dedupe(&batch, &columns()).unwrap();
    assert_eq!(deduped.height(), 2);
}

fn answer() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "yes", "no", "Y", "n", "1", "0", "1.0", "0.0", "maybe", "",
    ])
    .prop_map(str::to_string)
}

fn word() -> impl Strategy<Value = String> {
    "[ \t]{0,2}[a-zA-Z]{0,6}([ \t]{1,3}[a-zA-Z]{1,6}){0,2}[ \t]{0,2}"
}

proptest! {
    #[test]
    fn canonicalize_is_idempotent(raw in word()) {
        let once = canonicalize_text(&raw);
        prop_assert_eq!(canonicalize_text(&once), once.clone());
        prop_assert!(!once.contains("  "));
        prop_assert_eq!(once.trim(), once.as_str());
    }

    #[test]
    fn dedupe_is_idempotent(
        rows in prop::collection::vec(
            (prop::sample::select(vec!["laptop", "phone"]),
             prop::sample::select(vec!["north", "south"]),
             answer(),
             answer()),
            0..24,
        )
    ) {
        let borrowed: Vec<(&str, &str, &str, &str)> = rows
            .iter()
            .map(|(s, r, a, b)| (*s, *r, a.as_str(), b.as_str()))
            .collect();
        let cleaned = clean(&survey(&borrowed), &columns()).unwrap();
        let once = dedupe(&cleaned, &columns()).unwrap();
        let twice = dedupe(&once, &columns()).unwrap();
        prop_assert!(once.equals_missing(&twice));
        for name in ["Service", "Region"] {
            for value in texts(&once, name) {
                prop_assert!(!value.trim().is_empty());
                prop_assert_eq!(canonicalize_text(&value), value);
            }
        }
    }
}
