use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to export table to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },

    #[error("failed to serialize KPIs: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataframe error: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
