//! Shared utilities for the survey reporting crates.
//!
//! Every crate in the workspace reads `DataFrame` cells through these helpers so
//! that numeric, boolean and text cells render the same way everywhere.

mod frame;

pub use frame::{
    any_to_f64, any_to_string, any_to_string_non_empty, column_strings, format_numeric,
    is_numeric_dtype, parse_f64,
};
