use std::fmt;

use chrono::{Local, NaiveDateTime};

/// Correlation key shared by every artifact of one run (`%Y%m%d_%H%M%S`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunStamp(String);

impl RunStamp {
    pub const FORMAT: &'static str = "%Y%m%d_%H%M%S";

    /// Reads the wall clock. Call once per run.
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    pub fn from_datetime(at: NaiveDateTime) -> Self {
        Self(at.format(Self::FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `{basename}_{kind}_{stamp}.{extension}`
    pub fn artifact_name(&self, basename: &str, kind: &str, extension: &str) -> String {
        format!("{basename}_{kind}_{}.{extension}", self.0)
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
