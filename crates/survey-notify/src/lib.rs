//! Delivery of the weekly digest.
//!
//! The pipeline talks to a [`Notifier`]; [`EmailNotifier`] is the SMTP
//! implementation used by the binary.

pub mod digest;
pub mod email;
pub mod error;

use std::path::PathBuf;

use survey_model::KpiResult;

pub use digest::{EmailDigest, format_rate};
pub use email::{EmailConfig, EmailNotifier, PASS_ENV, USER_ENV};
pub use error::{NotifyError, Result};

/// Sends (or, in a dry run, simulates sending) the run's KPIs with its
/// report files attached.
pub trait Notifier {
    fn send(&self, kpis: &KpiResult, attachments: &[PathBuf], dry_run: bool) -> Result<()>;
}
