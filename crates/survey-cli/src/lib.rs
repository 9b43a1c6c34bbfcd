//! Weekly survey auto-report: configuration, logging and the pipeline run.

pub mod config;
pub mod logging;
pub mod pipeline;
