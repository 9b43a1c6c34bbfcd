//! JSON application configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use survey_model::ColumnMap;
use survey_notify::EmailConfig;
use survey_report::ReportOptions;

/// Default config path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn default_input_globs() -> Vec<String> {
    vec!["*.csv".to_string()]
}

fn default_report_basename() -> String {
    "weekly_report".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub inbox_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub failed_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,

    #[serde(default = "default_input_globs")]
    pub input_globs: Vec<String>,

    #[serde(default = "default_report_basename")]
    pub report_basename: String,
    #[serde(default = "default_true")]
    pub write_cleaned_csv: bool,
    #[serde(default = "default_true")]
    pub write_kpi_json: bool,

    pub column_map: ColumnMap,
    #[serde(default)]
    pub email: EmailConfig,
}

impl AppConfig {
    /// Reads, parses and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let roles = [
            ("service_col", &self.column_map.service_col),
            ("region_col", &self.column_map.region_col),
            ("satisfied_col", &self.column_map.satisfied_col),
            ("recommend_col", &self.column_map.recommend_col),
        ];
        for (role, name) in roles {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("column_map.{role} is empty")));
            }
        }
        if self.input_globs.iter().all(|glob| glob.trim().is_empty()) {
            return Err(ConfigError::Invalid("input_globs is empty".to_string()));
        }
        if self.report_basename.trim().is_empty() {
            return Err(ConfigError::Invalid("report_basename is empty".to_string()));
        }
        if self.email.enabled {
            if self.email.to_addrs.is_empty() {
                return Err(ConfigError::Invalid(
                    "email is enabled but email.to_addrs is empty".to_string(),
                ));
            }
            if self.email.from_addr.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "email is enabled but email.from_addr is empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Inbox, processed, failed, output and log directories, in that order.
    pub fn dirs(&self) -> [&Path; 5] {
        [
            self.inbox_dir.as_path(),
            self.processed_dir.as_path(),
            self.failed_dir.as_path(),
            self.output_dir.as_path(),
            self.log_dir.as_path(),
        ]
    }

    pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
        for dir in self.dirs() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            basename: self.report_basename.clone(),
            write_cleaned: self.write_cleaned_csv,
            write_kpis: self.write_kpi_json,
        }
    }

    /// Default log file inside `log_dir`.
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("app.log")
    }
}
