pub mod columns;
pub mod health;
pub mod kpi;
pub mod outcome;
pub mod summary;
pub mod tristate;

pub use columns::ColumnMap;
pub use health::{HEALTH_FILENAME, HealthStatus};
pub use kpi::KpiResult;
pub use outcome::{ReportArtifacts, RunOutcome, RunStatus};
pub use summary::FileSummary;
pub use tristate::TriState;
