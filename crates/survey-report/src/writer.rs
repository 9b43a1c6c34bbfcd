//! Report artifacts: file summary, cleaned batch and KPI snapshot.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, IntoColumn, NamedFrom, SerWriter, Series};
use tracing::info;

use survey_model::{FileSummary, KpiResult, ReportArtifacts};

use crate::error::{ReportError, Result};
use crate::stamp::RunStamp;

/// Output switches and naming for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub basename: String,
    pub write_cleaned: bool,
    pub write_kpis: bool,
}

impl ReportOptions {
    pub fn new(basename: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
            write_cleaned: true,
            write_kpis: true,
        }
    }
}

/// Builds the file-summary table, one row per processed input.
pub fn file_summary_frame(summaries: &[FileSummary]) -> Result<DataFrame> {
    let [filename, raw_rows, raw_cols, clean_rows, clean_cols] = FileSummary::COLUMNS;
    let count = |f: fn(&FileSummary) -> usize| -> Vec<u64> {
        summaries.iter().map(|s| f(s) as u64).collect()
    };
    let names: Vec<&str> = summaries.iter().map(|s| s.filename.as_str()).collect();
    let df = DataFrame::new(vec![
        Series::new(filename.into(), names).into_column(),
        Series::new(raw_rows.into(), count(|s| s.raw_rows)).into_column(),
        Series::new(raw_cols.into(), count(|s| s.raw_cols)).into_column(),
        Series::new(clean_rows.into(), count(|s| s.clean_rows)).into_column(),
        Series::new(clean_cols.into(), count(|s| s.clean_cols)).into_column(),
    ])?;
    Ok(df)
}

fn write_csv(path: &Path, df: &DataFrame) -> Result<()> {
    let mut file = File::create(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut df = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|source| ReportError::Export {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json(path: &Path, kpis: &KpiResult) -> Result<()> {
    let json = serde_json::to_string_pretty(kpis)?;
    fs::write(path, format!("{json}\n")).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the run's artifacts into `output_dir`.
///
/// The file summary is always written; the cleaned batch and the KPI
/// snapshot follow `options`. Every file is named
/// `{basename}_{kind}_{stamp}` with the caller's stamp.
pub fn write_reports(
    output_dir: &Path,
    options: &ReportOptions,
    batch: &DataFrame,
    summaries: &[FileSummary],
    kpis: &KpiResult,
    stamp: &RunStamp,
) -> Result<ReportArtifacts> {
    fs::create_dir_all(output_dir).map_err(|source| ReportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let artifact = |kind: &str, extension: &str| -> PathBuf {
        output_dir.join(stamp.artifact_name(&options.basename, kind, extension))
    };

    let file_summary = artifact("file_summary", "csv");
    write_csv(&file_summary, &file_summary_frame(summaries)?)?;

    let cleaned = if options.write_cleaned {
        let path = artifact("cleaned", "csv");
        write_csv(&path, batch)?;
        Some(path)
    } else {
        None
    };

    let kpis_path = if options.write_kpis {
        let path = artifact("kpis", "json");
        write_json(&path, kpis)?;
        Some(path)
    } else {
        None
    };

    let artifacts = ReportArtifacts {
        run_stamp: stamp.to_string(),
        file_summary,
        cleaned,
        kpis: kpis_path,
    };
    info!(
        run_stamp = %stamp,
        files = artifacts.paths().len(),
        dir = %output_dir.display(),
        "reports written"
    );
    Ok(artifacts)
}
