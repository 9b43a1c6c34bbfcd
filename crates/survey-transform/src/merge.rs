//! Batch-wide concatenation of cleaned tables.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use survey_common::{any_to_string, is_numeric_dtype};

use crate::error::Result;

/// Column dtype shared by every table carrying the column. Numeric dtypes
/// that disagree widen to `Float64`; any other disagreement falls back to
/// `String`. All-null columns defer to the others.
fn unified_dtype(tables: &[DataFrame], name: &str) -> DataType {
    let mut unified: Option<DataType> = None;
    let mut all_numeric = true;
    let mut disagree = false;
    for table in tables {
        let Ok(column) = table.column(name) else {
            continue;
        };
        let dtype = column.dtype();
        if matches!(dtype, DataType::Null) {
            continue;
        }
        all_numeric &= is_numeric_dtype(dtype);
        match &unified {
            None => unified = Some(dtype.clone()),
            Some(existing) if existing == dtype => {}
            Some(_) => disagree = true,
        }
    }
    match unified {
        Some(_) if disagree && all_numeric => DataType::Float64,
        Some(dtype) if !disagree => dtype,
        _ => DataType::String,
    }
}

/// Text pieces are rendered cell by cell so a float `1.0` reads `"1"`, the
/// same text an integer `1` produces.
fn piece(table: &DataFrame, name: &str, dtype: &DataType) -> Result<Series> {
    let Ok(column) = table.column(name) else {
        return Ok(Series::full_null(name.into(), table.height(), dtype));
    };
    if matches!(dtype, DataType::String) && column.dtype() != &DataType::String {
        let mut values: Vec<Option<String>> = Vec::with_capacity(column.len());
        for idx in 0..column.len() {
            let value = column.get(idx)?;
            values.push((!value.is_null()).then(|| any_to_string(value)));
        }
        return Ok(Series::new(name.into(), values));
    }
    Ok(column.as_materialized_series().cast(dtype)?)
}

/// Stacks tables vertically in the given order.
///
/// Columns are the union of all input columns in first-seen order. Tables
/// lacking a column contribute nulls for it. An empty slice yields an empty
/// table.
pub fn concat_tables(tables: &[DataFrame]) -> Result<DataFrame> {
    let mut names: Vec<String> = Vec::new();
    for table in tables {
        for name in table.get_column_names() {
            if !names.iter().any(|existing| existing == name.as_str()) {
                names.push(name.to_string());
            }
        }
    }
    if names.is_empty() {
        return Ok(DataFrame::empty());
    }

    let mut columns: Vec<Column> = Vec::with_capacity(names.len());
    for name in &names {
        let dtype = unified_dtype(tables, name);
        let mut stacked = Series::new_empty(name.as_str().into(), &dtype);
        for table in tables {
            stacked.append(&piece(table, name, &dtype)?)?;
        }
        columns.push(stacked.into_column());
    }
    Ok(DataFrame::new(columns)?)
}
