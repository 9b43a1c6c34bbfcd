use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A required semantic column is absent from a loaded table.
    #[error("missing required columns {missing:?}; available: {available:?}")]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },
    #[error("dataframe error: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
