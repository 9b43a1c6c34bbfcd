use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Files written for one run, all tagged with the same run stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportArtifacts {
    pub run_stamp: String,
    pub file_summary: PathBuf,
    pub cleaned: Option<PathBuf>,
    pub kpis: Option<PathBuf>,
}

impl ReportArtifacts {
    /// Written paths in attachment order: summary, cleaned data, KPIs.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.file_summary.clone()];
        paths.extend(self.cleaned.iter().cloned());
        paths.extend(self.kpis.iter().cloned());
        paths
    }
}

/// Terminal state of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Ok,
    NoInputs,
    Fatal,
}

impl RunStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::NoInputs => "no_inputs",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a pipeline run hands back to its caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub ok: bool,
    pub status: RunStatus,
    pub message: String,
    pub inputs_found: usize,
    pub inputs_processed: usize,
    pub total_responses: usize,
    pub artifacts: Option<ReportArtifacts>,
    pub health_file: PathBuf,
}
