//! Typed column construction for decoders that yield individual cells.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use survey_common::format_numeric;

/// A decoded, non-null source cell.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    fn render(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Float(v) => format_numeric(*v),
            Self::Bool(v) => v.to_string(),
            Self::Text(v) => v.clone(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// Builds a column whose dtype is the narrowest one fitting every non-null cell:
/// `Int64`, then `Float64`, then `Boolean`, otherwise `String`.
pub(crate) fn build_column(name: &str, cells: &[Option<Cell>]) -> Column {
    let present = || cells.iter().flatten();
    let series = if present().all(|cell| matches!(cell, Cell::Int(_))) && present().next().is_some()
    {
        let values: Vec<Option<i64>> = cells
            .iter()
            .map(|cell| match cell {
                Some(Cell::Int(v)) => Some(*v),
                _ => None,
            })
            .collect();
        Series::new(name.into(), values)
    } else if present().all(|cell| cell.as_f64().is_some()) && present().next().is_some() {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| cell.as_ref().and_then(Cell::as_f64))
            .collect();
        Series::new(name.into(), values)
    } else if present().all(|cell| matches!(cell, Cell::Bool(_))) && present().next().is_some() {
        let values: Vec<Option<bool>> = cells
            .iter()
            .map(|cell| match cell {
                Some(Cell::Bool(v)) => Some(*v),
                _ => None,
            })
            .collect();
        Series::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = cells
            .iter()
            .map(|cell| cell.as_ref().map(Cell::render))
            .collect();
        Series::new(name.into(), values)
    };
    series.into_column()
}

/// Assembles named cell columns into a frame, keeping column order.
pub(crate) fn build_frame(
    columns: Vec<(String, Vec<Option<Cell>>)>,
) -> polars::prelude::PolarsResult<DataFrame> {
    let built: Vec<Column> = columns
        .iter()
        .map(|(name, cells)| build_column(name, cells))
        .collect();
    DataFrame::new(built)
}
