use std::fmt;

use serde::{Deserialize, Serialize};

/// File name of the health record inside the output directory.
pub const HEALTH_FILENAME: &str = "health.txt";

/// Outcome line of the most recent run: `{timestamp} | {OK|FAIL} | {message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub message: String,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn new(ok: bool, message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            ok,
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Parse a health record line. Messages may themselves contain `|`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.trim().splitn(3, " | ");
        let timestamp = parts.next()?.trim();
        let ok = match parts.next()?.trim() {
            "OK" => true,
            "FAIL" => false,
            _ => return None,
        };
        let message = parts.next().unwrap_or_default().trim();
        if timestamp.is_empty() {
            return None;
        }
        Some(Self::new(ok, message, timestamp))
    }

    pub fn label(&self) -> &'static str {
        if self.ok { "OK" } else { "FAIL" }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.timestamp, self.label(), self.message)
    }
}
