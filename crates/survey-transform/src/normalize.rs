//! Per-table cleaning of survey responses.
//!
//! Field-level problems never fail a table: unresolvable answers become
//! `Unknown`, unparseable dates become null, and offending rows are dropped.
//! Structural problems (a required column missing) fail the whole table.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::{
    AnyValue, BooleanChunked, Column, DataFrame, NamedFrom, NewChunkedArray, Series,
};
use tracing::debug;

use survey_common::{any_to_f64, any_to_string, is_numeric_dtype};
use survey_model::{ColumnMap, TriState};

use crate::error::{Result, TransformError};

/// Text answers that resolve to [`TriState::True`] (compared lowercase, trimmed).
pub const YES_VALUES: [&str; 6] = ["yes", "y", "true", "t", "1", "1.0"];

/// Text answers that resolve to [`TriState::False`] (compared lowercase, trimmed).
pub const NO_VALUES: [&str; 6] = ["no", "n", "false", "f", "0", "0.0"];

/// Fails with [`TransformError::MissingColumns`] unless all four required
/// role columns are present.
pub fn validate_columns(df: &DataFrame, columns: &ColumnMap) -> Result<()> {
    let missing: Vec<String> = columns
        .required_columns()
        .iter()
        .filter(|name| df.column(name).is_err())
        .map(|name| (*name).to_string())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(TransformError::MissingColumns {
        missing,
        available: df
            .get_column_names()
            .iter()
            .map(ToString::to_string)
            .collect(),
    })
}

/// Trims, collapses internal whitespace runs to one space, and title-cases.
///
/// Title-casing upper-cases every letter that follows a non-letter and
/// lower-cases the rest, so `"north-EAST"` becomes `"North-East"`.
///
/// # Examples
///
/// ```
/// use survey_transform::canonicalize_text;
///
/// assert_eq!(canonicalize_text("  laptop   repair "), "Laptop Repair");
/// assert_eq!(canonicalize_text("NORTH"), "North");
/// ```
pub fn canonicalize_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_cased = false;
    for (idx, word) in value.split_whitespace().enumerate() {
        if idx > 0 {
            out.push(' ');
            previous_cased = false;
        }
        for ch in word.chars() {
            if ch.is_alphabetic() {
                if previous_cased {
                    out.extend(ch.to_lowercase());
                } else {
                    out.extend(ch.to_uppercase());
                }
                previous_cased = true;
            } else {
                out.push(ch);
                previous_cased = false;
            }
        }
    }
    out
}

/// Canonicalizes every cell of a text column. Nulls stay null; non-text cells
/// are rendered as text first.
pub fn normalize_text(column: &Column) -> Series {
    let values: Vec<Option<String>> = (0..column.len())
        .map(|idx| match column.get(idx).unwrap_or(AnyValue::Null) {
            AnyValue::Null => None,
            value => Some(canonicalize_text(&any_to_string(value))),
        })
        .collect();
    Series::new(column.name().clone(), values)
}

/// Resolves a text answer against the yes/no sets.
pub fn tri_state_from_text(value: &str) -> TriState {
    let lowered = value.trim().to_lowercase();
    if YES_VALUES.contains(&lowered.as_str()) {
        TriState::True
    } else if NO_VALUES.contains(&lowered.as_str()) {
        TriState::False
    } else {
        TriState::Unknown
    }
}

fn tri_state_from_number(value: Option<f64>) -> TriState {
    match value {
        Some(v) if v == 1.0 => TriState::True,
        Some(v) if v == 0.0 => TriState::False,
        _ => TriState::Unknown,
    }
}

/// Coerces a yes/no column to the tri-state domain.
///
/// Numeric columns map `1` to true and `0` to false; boolean columns map
/// directly; anything else is matched case-insensitively against
/// [`YES_VALUES`] and [`NO_VALUES`]. Nulls and unmatched values are `Unknown`.
pub fn normalize_tri_state_boolean(column: &Column) -> Vec<TriState> {
    let numeric = is_numeric_dtype(column.dtype());
    (0..column.len())
        .map(|idx| match column.get(idx).unwrap_or(AnyValue::Null) {
            AnyValue::Null => TriState::Unknown,
            AnyValue::Boolean(value) => TriState::from(value),
            value if numeric => tri_state_from_number(any_to_f64(value)),
            value => tri_state_from_text(&any_to_string(value)),
        })
        .collect()
}

const DATETIME_FORMATS: [&str; 13] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%b-%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

// Month-first before day-first for ambiguous slash dates.
const DATE_FORMATS: [&str; 14] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y-%b-%d",
    "%d-%m-%Y",
];

/// Best-effort parse of a single date or datetime value.
pub fn parse_date_value(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    for fmt in &DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// ISO 8601 text for a parsed value: date only at midnight, full datetime otherwise.
pub fn format_date(value: NaiveDateTime) -> String {
    if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// Parses a date column to ISO text. Unparseable cells become null.
pub fn parse_date(column: &Column) -> Series {
    let values: Vec<Option<String>> = (0..column.len())
        .map(|idx| match column.get(idx).unwrap_or(AnyValue::Null) {
            AnyValue::Null => None,
            value => parse_date_value(&any_to_string(value)).map(format_date),
        })
        .collect();
    Series::new(column.name().clone(), values)
}

fn tri_state_series(column: &Column, states: &[TriState]) -> Series {
    let values: Vec<Option<bool>> = states.iter().copied().map(TriState::as_bool).collect();
    Series::new(column.name().clone(), values)
}

fn non_blank(series: &Series, idx: usize) -> bool {
    match series.get(idx) {
        Ok(AnyValue::Null) | Err(_) => false,
        Ok(value) => !any_to_string(value).trim().is_empty(),
    }
}

/// Cleans one loaded table.
///
/// Validates the required columns, canonicalizes service and region, coerces
/// the satisfied and recommend flags, parses the date column when configured
/// and present, then drops every row whose service or region is null or blank
/// or whose flags are `Unknown`. Surviving flags are stored as booleans.
pub fn clean(df: &DataFrame, columns: &ColumnMap) -> Result<DataFrame> {
    validate_columns(df, columns)?;
    let mut out = df.clone();

    let mut texts = Vec::with_capacity(2);
    for name in columns.text_columns() {
        let series = normalize_text(out.column(name)?);
        texts.push(series.clone());
        out.with_column(series)?;
    }

    let mut flags = Vec::with_capacity(2);
    for name in columns.flag_columns() {
        let column = out.column(name)?;
        let states = normalize_tri_state_boolean(column);
        let series = tri_state_series(column, &states);
        flags.push(states);
        out.with_column(series)?;
    }

    if let Some(date_col) = columns.date_col.as_deref()
        && let Ok(column) = out.column(date_col)
    {
        let series = parse_date(column);
        out.with_column(series)?;
    }

    let keep: Vec<bool> = (0..out.height())
        .map(|idx| {
            flags.iter().all(|states| states[idx].is_known())
                && texts.iter().all(|series| non_blank(series, idx))
        })
        .collect();
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let cleaned = out.filter(&mask)?;

    debug!(
        raw_rows = df.height(),
        clean_rows = cleaned.height(),
        dropped = df.height() - cleaned.height(),
        "table cleaned"
    );
    Ok(cleaned)
}
