//! Survey response ingestion.
//!
//! This crate finds candidate input files in an inbox directory and reads each
//! one into a Polars `DataFrame`, whatever its tabular format.
//!
//! # Features
//!
//! - **Discovery**: glob patterns relative to the inbox, deduplicated and sorted
//! - **Delimited text**: Polars CSV reader with schema inference
//! - **Structured records**: JSON arrays of objects or objects of columns
//! - **Spreadsheets**: first worksheet of xlsx/xls/ods workbooks
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use survey_ingest::{discover_inputs, load_table};
//!
//! let inbox = Path::new("data/inbox");
//! for path in discover_inputs(inbox, &["*.csv".to_string(), "*.xlsx".to_string()]) {
//!     let df = load_table(&path)?;
//!     println!("{}: {} rows", path.display(), df.height());
//! }
//! ```

mod discovery;
mod error;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{discover_inputs, file_name};

// === Table Loading ===
pub use loader::{InputFormat, load_table, validate_encoding};
