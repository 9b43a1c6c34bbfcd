//! Batch KPIs and the durable outputs of a run.
//!
//! All artifacts of one run share a single [`RunStamp`], created once by the
//! caller and passed to [`write_reports`].

pub mod error;
pub mod health;
pub mod kpis;
pub mod stamp;
pub mod writer;

pub use error::{ReportError, Result};
pub use health::{health_path, read_health, write_health};
pub use kpis::{compute_kpis, flag_rate, most_frequent};
pub use stamp::RunStamp;
pub use writer::{ReportOptions, file_summary_frame, write_reports};
