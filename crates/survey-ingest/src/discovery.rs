//! Input file discovery in the inbox directory.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, warn};

/// Lists the regular files in `dir` matching any of `patterns`.
///
/// Patterns are relative to `dir`; only `**` descends into subdirectories.
/// A file matched by several patterns appears once. The result is sorted by
/// path. Invalid patterns are skipped with a warning, and a missing directory
/// simply matches nothing.
pub fn discover_inputs(dir: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let dir_text = dir.to_string_lossy();
    let base = Pattern::escape(dir_text.trim_end_matches(['/', '\\']));
    let mut found = BTreeSet::new();

    for pattern in patterns {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            continue;
        }
        let full = if base.is_empty() {
            pattern.to_string()
        } else {
            format!("{base}/{pattern}")
        };
        let entries = match glob::glob(&full) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(pattern = %pattern, %error, "skipping invalid input pattern");
                continue;
            }
        };
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    found.insert(path);
                }
                Ok(_) => {}
                Err(error) => {
                    warn!(pattern = %pattern, %error, "unreadable path while matching inputs");
                }
            }
        }
    }

    debug!(dir = %dir.display(), matched = found.len(), "input discovery complete");
    found.into_iter().collect()
}

/// File name component of a path as text, or the full path when there is none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
