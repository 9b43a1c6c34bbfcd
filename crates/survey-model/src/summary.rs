use serde::{Deserialize, Serialize};

/// Per-input-file audit row: shape before and after cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSummary {
    pub filename: String,
    pub raw_rows: usize,
    pub raw_cols: usize,
    pub clean_rows: usize,
    pub clean_cols: usize,
}

impl FileSummary {
    /// Column names of the file-summary export, in output order.
    pub const COLUMNS: [&'static str; 5] =
        ["filename", "raw_rows", "raw_cols", "clean_rows", "clean_cols"];
}
