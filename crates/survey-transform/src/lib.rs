//! Survey table transformations.
//!
//! - **normalize**: required-column validation, text canonicalization,
//!   tri-state flag coercion, best-effort date parsing, row elimination
//! - **dedupe**: identity-key deduplication where the last submission wins
//! - **merge**: outer concatenation of per-file tables into one batch

pub mod dedupe;
pub mod error;
pub mod merge;
pub mod normalize;

pub use dedupe::{dedupe, dedupe_by_columns, identity_columns};
pub use error::{Result, TransformError};
pub use merge::concat_tables;
pub use normalize::{
    NO_VALUES, YES_VALUES, canonicalize_text, clean, format_date, normalize_text,
    normalize_tri_state_boolean, parse_date, parse_date_value, tri_state_from_text,
    validate_columns,
};
