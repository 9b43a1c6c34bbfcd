//! Single-line health record describing the most recent run.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use survey_model::{HEALTH_FILENAME, HealthStatus};

use crate::error::{ReportError, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn health_path(output_dir: &Path) -> PathBuf {
    output_dir.join(HEALTH_FILENAME)
}

/// Overwrites the health record with the outcome of this run.
pub fn write_health(output_dir: &Path, ok: bool, message: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|source| ReportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let status = HealthStatus::new(ok, message, Local::now().format(TIMESTAMP_FORMAT).to_string());
    let path = health_path(output_dir);
    fs::write(&path, format!("{status}\n")).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), ok, "health record written");
    Ok(path)
}

/// Raw contents of the health record, trimmed. `None` before the first run.
pub fn read_health(output_dir: &Path) -> Option<String> {
    fs::read_to_string(health_path(output_dir))
        .ok()
        .map(|content| content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_health(dir.path()), None);

        let path = write_health(dir.path(), false, "Fatal process error: boom | again").unwrap();
        assert_eq!(path, dir.path().join("health.txt"));

        let line = read_health(dir.path()).unwrap();
        let status = HealthStatus::parse(&line).unwrap();
        assert!(!status.ok);
        assert_eq!(status.message, "Fatal process error: boom | again");
        assert_eq!(status.timestamp.len(), 19);
    }

    #[test]
    fn test_write_overwrites_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        write_health(dir.path(), true, "Run completed successfully.").unwrap();
        write_health(dir.path(), false, "Run OK but email failed: refused").unwrap();
        let content = fs::read_to_string(health_path(dir.path())).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("| FAIL | Run OK but email failed: refused"));
    }
}
