//! Error types for survey ingestion.

use std::path::PathBuf;
use thiserror::Error;

use crate::loader::InputFormat;

/// Errors that can occur while reading an input file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File uses an encoding the loaders cannot decode.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// File could not be decoded in its declared format.
    #[error("unreadable {format} input {path}: {message}")]
    Unreadable {
        path: PathBuf,
        format: InputFormat,
        message: String,
    },
}

impl IngestError {
    pub(crate) fn unreadable(
        path: &std::path::Path,
        format: InputFormat,
        message: impl Into<String>,
    ) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            format,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/inbox/week1.csv"),
        };
        assert_eq!(err.to_string(), "input file not found: /inbox/week1.csv");
    }

    #[test]
    fn test_unreadable_display() {
        let err = IngestError::unreadable(
            std::path::Path::new("week1.json"),
            InputFormat::Records,
            "expected value at line 1",
        );
        assert_eq!(
            err.to_string(),
            "unreadable JSON input week1.json: expected value at line 1"
        );
    }

    #[test]
    fn test_io_not_found_maps_to_file_not_found() {
        let err = IngestError::io(
            std::path::Path::new("gone.csv"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
