//! One weekly-report run with explicit stages.
//!
//! 1. **Discover**: enumerate inbox files; none ends the run early
//! 2. **Process**: load, clean and dedupe each file, merge, dedupe the batch
//! 3. **Relocate**: move consumed inputs to the processed area
//! 4. **Report**: compute KPIs, write artifacts and the health record
//! 5. **Notify**: hand KPIs and artifacts to the notifier
//!
//! Only the process stage (and setup before it) can fail the run. A failed
//! move is logged and skipped; a failed notification is recorded in the
//! health file while the run still reports success.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn};

use survey_ingest::{IngestError, discover_inputs, file_name, load_table};
use survey_model::{ColumnMap, FileSummary, ReportArtifacts, RunOutcome, RunStatus};
use survey_notify::Notifier;
use survey_report::{RunStamp, compute_kpis, health_path, write_health, write_reports};
use survey_transform::{TransformError, clean, concat_tables, dedupe};

use crate::config::AppConfig;

pub const NO_INPUTS_MESSAGE: &str = "No input files found. Nothing to do.";
pub const SUCCESS_MESSAGE: &str = "Run completed successfully.";

/// Failure of the process stage. Aborts the run.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("{file}: {source}")]
    Ingest {
        file: String,
        #[source]
        source: IngestError,
    },

    #[error("{file}: {source}")]
    Transform {
        file: String,
        #[source]
        source: TransformError,
    },

    #[error("batch merge failed: {0}")]
    Merge(#[source] TransformError),
}

// ============================================================================
// Stage 2: Process
// ============================================================================

/// Output of the process stage.
#[derive(Debug)]
pub struct ProcessResult {
    /// Merged, cleaned, deduplicated responses from every file.
    pub batch: DataFrame,
    /// One entry per input file, in processing order.
    pub summaries: Vec<FileSummary>,
}

/// Loads, cleans and dedupes one file.
pub fn process_file(
    path: &Path,
    columns: &ColumnMap,
) -> Result<(DataFrame, FileSummary), ProcessError> {
    let file = file_name(path);
    let raw = load_table(path).map_err(|source| ProcessError::Ingest {
        file: file.clone(),
        source,
    })?;
    let cleaned = clean(&raw, columns)
        .and_then(|df| dedupe(&df, columns))
        .map_err(|source| ProcessError::Transform {
            file: file.clone(),
            source,
        })?;
    let summary = FileSummary {
        filename: file,
        raw_rows: raw.height(),
        raw_cols: raw.width(),
        clean_rows: cleaned.height(),
        clean_cols: cleaned.width(),
    };
    Ok((cleaned, summary))
}

/// Processes every file in order, then dedupes across files.
///
/// The first failing file aborts the whole batch.
pub fn process_files(
    paths: &[PathBuf],
    columns: &ColumnMap,
) -> Result<ProcessResult, ProcessError> {
    let mut tables = Vec::with_capacity(paths.len());
    let mut summaries = Vec::with_capacity(paths.len());
    for path in paths {
        let span = info_span!("process_file", file = %file_name(path));
        let _enter = span.enter();
        let start = Instant::now();
        let (cleaned, summary) = process_file(path, columns)?;
        info!(
            raw_rows = summary.raw_rows,
            clean_rows = summary.clean_rows,
            duration_ms = start.elapsed().as_millis(),
            "processed"
        );
        tables.push(cleaned);
        summaries.push(summary);
    }

    let merged = concat_tables(&tables).map_err(ProcessError::Merge)?;
    let batch = if merged.height() == 0 {
        merged
    } else {
        dedupe(&merged, columns).map_err(ProcessError::Merge)?
    };
    debug!(rows = batch.height(), files = summaries.len(), "batch merged");
    Ok(ProcessResult { batch, summaries })
}

// ============================================================================
// Stage 3: Relocate
// ============================================================================

/// Destination for `src` inside `dest_dir`: its own name, or the first free
/// `<stem>__dup<.ext>`, `<stem>__dup2<.ext>`, ... when that name is taken.
pub fn relocation_target(src: &Path, dest_dir: &Path) -> PathBuf {
    let name = src.file_name().map(PathBuf::from).unwrap_or_default();
    let dest = dest_dir.join(&name);
    if !dest.exists() {
        return dest;
    }
    let stem = src
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = src
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let mut counter = 1usize;
    loop {
        let suffix = if counter == 1 {
            "__dup".to_string()
        } else {
            format!("__dup{counter}")
        };
        let candidate = dest_dir.join(format!("{stem}{suffix}{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Moves a consumed input into `dest_dir`. A dry run only logs the move.
pub fn relocate_file(src: &Path, dest_dir: &Path, dry_run: bool) -> io::Result<PathBuf> {
    fs::create_dir_all(dest_dir)?;
    let dest = relocation_target(src, dest_dir);
    if dry_run {
        info!(from = %src.display(), to = %dest.display(), "dry run: would move file");
        return Ok(dest);
    }
    if fs::rename(src, &dest).is_err() {
        // rename fails across filesystems
        fs::copy(src, &dest)?;
        fs::remove_file(src)?;
    }
    debug!(from = %src.display(), to = %dest.display(), "moved file");
    Ok(dest)
}

fn relocate_all(paths: &[PathBuf], dest_dir: &Path, dry_run: bool) -> usize {
    let mut moved = 0;
    for path in paths {
        match relocate_file(path, dest_dir, dry_run) {
            Ok(_) => moved += 1,
            Err(err) => warn!(file = %path.display(), error = %err, "failed to move file"),
        }
    }
    moved
}

// ============================================================================
// Run
// ============================================================================

fn record_health(output_dir: &Path, ok: bool, message: &str) -> PathBuf {
    match write_health(output_dir, ok, message) {
        Ok(path) => path,
        Err(err) => {
            error!(error = %err, "failed to write health record");
            health_path(output_dir)
        }
    }
}

fn failed(config: &AppConfig, inputs_found: usize, message: String) -> RunOutcome {
    error!("{message}");
    let health_file = record_health(&config.output_dir, false, &message);
    RunOutcome {
        ok: false,
        status: RunStatus::Fatal,
        message,
        inputs_found,
        inputs_processed: 0,
        total_responses: 0,
        artifacts: None,
        health_file,
    }
}

/// Executes one pipeline run and records its outcome in the health file.
pub fn run_pipeline(config: &AppConfig, notifier: &dyn Notifier, dry_run: bool) -> RunOutcome {
    let run_span = info_span!("run", dry_run);
    let _enter = run_span.enter();

    if let Err(err) = config.ensure_dirs() {
        return failed(config, 0, format!("Fatal process error: {err}"));
    }
    debug!(
        inbox = %config.inbox_dir.display(),
        globs = ?config.input_globs,
        processed = %config.processed_dir.display(),
        failed = %config.failed_dir.display(),
        output = %config.output_dir.display(),
        "pipeline starting"
    );

    let files = discover_inputs(&config.inbox_dir, &config.input_globs);
    info!(count = files.len(), inbox = %config.inbox_dir.display(), "discovered input files");
    if files.is_empty() {
        let health_file = record_health(&config.output_dir, true, NO_INPUTS_MESSAGE);
        return RunOutcome {
            ok: true,
            status: RunStatus::NoInputs,
            message: NO_INPUTS_MESSAGE.to_string(),
            inputs_found: 0,
            inputs_processed: 0,
            total_responses: 0,
            artifacts: None,
            health_file,
        };
    }

    let result = match process_files(&files, &config.column_map) {
        Ok(result) => result,
        Err(err) => return failed(config, files.len(), format!("Fatal process error: {err}")),
    };

    // Per-file failures abort the run above, so nothing reaches the failed area.
    let inputs_processed = relocate_all(&files, &config.processed_dir, dry_run);

    let kpis = compute_kpis(&result.batch, &config.column_map);
    let stamp = RunStamp::now();
    let artifacts: ReportArtifacts = match write_reports(
        &config.output_dir,
        &config.report_options(),
        &result.batch,
        &result.summaries,
        &kpis,
        &stamp,
    ) {
        Ok(artifacts) => artifacts,
        Err(err) => {
            let mut outcome =
                failed(config, files.len(), format!("Report writing failed: {err}"));
            outcome.inputs_processed = inputs_processed;
            outcome.total_responses = kpis.total_responses;
            return outcome;
        }
    };
    let mut health_file = record_health(&config.output_dir, true, SUCCESS_MESSAGE);

    let attachments = artifacts.paths();
    debug!(attachments = attachments.len(), "notifying");
    if let Err(err) = notifier.send(&kpis, &attachments, dry_run) {
        error!(error = %err, "notification failed");
        health_file = record_health(
            &config.output_dir,
            false,
            &format!("Run OK but email failed: {err}"),
        );
    }

    info!(
        inputs_found = files.len(),
        inputs_processed,
        total_responses = kpis.total_responses,
        run_stamp = %artifacts.run_stamp,
        "pipeline finished"
    );
    RunOutcome {
        ok: true,
        status: RunStatus::Ok,
        message: SUCCESS_MESSAGE.to_string(),
        inputs_found: files.len(),
        inputs_processed,
        total_responses: kpis.total_responses,
        artifacts: Some(artifacts),
        health_file,
    }
}
