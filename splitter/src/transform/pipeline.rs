//! High-level API: load → group → write.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster_split::{run, SplitOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = run(&SplitOptions::new("roster.csv"))?;
//!     println!("Wrote {} state files", summary.files_written);
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::grouper::group_and_sort;
use crate::error::{SplitError, SplitResult, WriteError};
use crate::logs::{log_error, log_info, log_success, log_warning};
use crate::models::StudentRecord;
use crate::parser::parse_csv_file;
use crate::writer::{write_groups, WriteOptions, WriteReport};

/// Options for a split run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitOptions {
    /// Roster to split
    pub input: PathBuf,

    /// Output settings
    pub write: WriteOptions,

    /// Save the run summary as JSON here
    pub summary_path: Option<PathBuf>,
}

impl SplitOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }
}

/// What a run did
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    /// Data rows read, header excluded
    pub rows_read: usize,
    /// Distinct state values, blank ones included
    pub groups: usize,
    pub files_written: usize,
    pub rows_written: usize,
    /// Rows dropped because their state was blank
    pub rows_skipped: usize,
    /// States whose file could not be written
    pub failed: Vec<String>,
    pub report: WriteReport,
}

impl RunSummary {
    fn new(input: &Path, rows_read: usize, report: WriteReport, failed: Vec<String>) -> Self {
        Self {
            input: input.to_path_buf(),
            rows_read,
            // Every group ends up written, skipped or failed.
            groups: report.written.len() + report.skipped.len() + failed.len(),
            files_written: report.written.len(),
            rows_written: report.rows_written(),
            rows_skipped: report.rows_skipped(),
            failed,
            report,
        }
    }

    fn from_failure(input: &Path, rows_read: usize, error: &WriteError) -> Self {
        let failed = error.failures().iter().map(|f| f.key.clone()).collect();
        Self::new(input, rows_read, error.report().clone(), failed)
    }
}

/// Run the full split for one roster file.
pub fn run(options: &SplitOptions) -> SplitResult<RunSummary> {
    log_info(format!("📖 Reading CSV file: {}", options.input.display()));
    let records = parse_csv_file(&options.input)?;
    log_success(format!("Read {} rows", records.len()));

    let outcome = split_records(&options.input, &records, &options.write);

    if let Some(path) = &options.summary_path {
        match &outcome {
            Ok(summary) => save_summary(summary, path)?,
            Err(SplitError::Write(write_err)) => {
                let summary = RunSummary::from_failure(&options.input, records.len(), write_err);
                // The write error is the one to report.
                if let Err(e) = save_summary(&summary, path) {
                    log_error(e.to_string());
                }
            }
            Err(_) => {}
        }
    }

    let summary = outcome?;
    log_success("Processing complete.");
    Ok(summary)
}

/// Group already-loaded records and write them out.
pub fn split_records(
    input: &Path,
    records: &[StudentRecord],
    write: &WriteOptions,
) -> SplitResult<RunSummary> {
    log_info("📦 Grouping by state...");
    let groups = group_and_sort(records);
    log_success(format!("{} state group(s)", groups.len()));

    log_info(format!("💾 Writing to {}", write.output_dir.display()));
    let report = write_groups(&groups, write)?;

    if report.rows_skipped() > 0 {
        log_warning(format!(
            "{} row(s) had no state and were not written",
            report.rows_skipped()
        ));
    }

    Ok(RunSummary::new(input, records.len(), report, Vec::new()))
}

fn save_summary(summary: &RunSummary, path: &Path) -> SplitResult<()> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| SplitError::Summary {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    fs::write(path, json).map_err(|source| SplitError::Summary {
        path: path.to_path_buf(),
        source,
    })?;
    log_info(format!("Summary written to: {}", path.display()));
    Ok(())
}
