//! Identity-key deduplication. The most recent submission wins.

use std::collections::HashSet;

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use tracing::debug;

use survey_common::column_strings;
use survey_model::ColumnMap;

use crate::error::{Result, TransformError};

/// Selects the identity key for a table.
///
/// A configured and present respondent id is the key, paired with the date
/// column when that is also configured and present. Without one, the key is
/// the date (when present) followed by service, region, satisfied and
/// recommend.
pub fn identity_columns(df: &DataFrame, columns: &ColumnMap) -> Vec<String> {
    let present = |name: &Option<String>| {
        name.as_deref()
            .filter(|name| df.column(name).is_ok())
            .map(str::to_string)
    };
    let date = present(&columns.date_col);
    if let Some(id) = present(&columns.respondent_id_col) {
        return std::iter::once(id).chain(date).collect();
    }
    date.into_iter()
        .chain(columns.required_columns().iter().map(|name| (*name).to_string()))
        .collect()
}

/// Drops rows whose key values repeat a later row, keeping survivors in
/// their original order. Nulls compare equal to each other.
pub fn dedupe_by_columns(df: &DataFrame, keys: &[String]) -> Result<DataFrame> {
    if df.height() == 0 || keys.is_empty() {
        return Ok(df.clone());
    }
    let mut key_values = Vec::with_capacity(keys.len());
    let mut missing = Vec::new();
    for key in keys {
        match column_strings(df, key) {
            Some(values) => key_values.push(values),
            None => missing.push(key.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(TransformError::MissingColumns {
            missing,
            available: df
                .get_column_names()
                .iter()
                .map(ToString::to_string)
                .collect(),
        });
    }

    let mut seen = HashSet::with_capacity(df.height());
    let mut keep = vec![false; df.height()];
    for idx in (0..df.height()).rev() {
        let composite: Vec<Option<&str>> = key_values
            .iter()
            .map(|values| values[idx].as_deref())
            .collect();
        keep[idx] = seen.insert(composite);
    }
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let deduped = df.filter(&mask)?;
    if deduped.height() < df.height() {
        debug!(
            keys = ?keys,
            removed = df.height() - deduped.height(),
            "duplicate responses removed"
        );
    }
    Ok(deduped)
}

/// Deduplicates a cleaned table on its identity key.
pub fn dedupe(df: &DataFrame, columns: &ColumnMap) -> Result<DataFrame> {
    let keys = identity_columns(df, columns);
    dedupe_by_columns(df, &keys)
}
