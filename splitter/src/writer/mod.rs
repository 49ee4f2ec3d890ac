//! One output table per state.
//!
//! Every group becomes `<sanitized-state>.csv` in the output directory, with
//! the fixed header followed by the group's rows. A group that cannot be
//! written is recorded and the next one is attempted; the aggregate error is
//! raised once all groups ran.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FailureReason, GroupFailure, WriteError, WriteResult};
use crate::logs::{log_error, log_success, log_warning};
use crate::models::{StudentRecord, COLUMNS};
use crate::transform::grouper::{is_blank_key, Groups};

/// Extension of every output table.
pub const OUTPUT_EXTENSION: &str = "csv";

static INVALID_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("Invalid filename pattern"));

/// Where and how output tables are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Directory receiving the per-state files. Must exist.
    pub output_dir: PathBuf,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

/// A state table that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub key: String,
    pub path: PathBuf,
    pub rows: usize,
}

/// A group left out because its state is blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedGroup {
    pub key: String,
    pub rows: usize,
}

/// Outcome of writing all groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub written: Vec<WrittenFile>,
    pub skipped: Vec<SkippedGroup>,
}

impl WriteReport {
    pub fn rows_written(&self) -> usize {
        self.written.iter().map(|f| f.rows).sum()
    }

    /// Rows dropped with blank-state groups.
    pub fn rows_skipped(&self) -> usize {
        self.skipped.iter().map(|s| s.rows).sum()
    }
}

/// Replace characters that are not allowed in file names with `_`.
///
/// Only `< > : " / \ | ? *` are touched; length, dots and spaces are left
/// as they are.
pub fn sanitize_key(key: &str) -> String {
    INVALID_FILENAME_CHARS.replace_all(key, "_").into_owned()
}

/// File name used for a state key.
pub fn output_file_name(key: &str) -> String {
    format!("{}.{}", sanitize_key(key), OUTPUT_EXTENSION)
}

/// Write every group to its own table.
///
/// Groups are processed in key order. When two states sanitize to the same
/// file name the first one keeps the file and the later one is reported as
/// a failure instead of overwriting it.
pub fn write_groups(groups: &Groups<'_>, options: &WriteOptions) -> WriteResult<WriteReport> {
    let mut report = WriteReport::default();
    let mut failures = Vec::new();
    let mut claimed: HashMap<String, &str> = HashMap::new();

    for (&key, rows) in groups {
        if is_blank_key(key) {
            log_warning(format!("Skipping {} row(s) with empty state name", rows.len()));
            report.skipped.push(SkippedGroup {
                key: key.to_string(),
                rows: rows.len(),
            });
            continue;
        }

        let file_name = output_file_name(key);

        if let Some(owner) = claimed.get(&file_name) {
            let failure = GroupFailure {
                key: key.to_string(),
                file_name: file_name.clone(),
                reason: FailureReason::Collision { with: owner.to_string() },
            };
            log_error(format!("Error creating file {}: {}", file_name, failure.reason));
            failures.push(failure);
            continue;
        }
        claimed.insert(file_name.clone(), key);

        let path = options.output_dir.join(&file_name);
        match write_group(&path, rows) {
            Ok(()) => {
                log_success(format!("Created file: {} ({} rows)", path.display(), rows.len()));
                report.written.push(WrittenFile {
                    key: key.to_string(),
                    path,
                    rows: rows.len(),
                });
            }
            Err(reason) => {
                log_error(format!("Error creating file {}: {}", path.display(), reason));
                failures.push(GroupFailure {
                    key: key.to_string(),
                    file_name,
                    reason,
                });
            }
        }
    }

    if failures.is_empty() {
        Ok(report)
    } else {
        Err(WriteError::Failed { failures, report })
    }
}

/// Header plus rows, flushed; the handle closes when this returns.
fn write_group(path: &Path, rows: &[&StudentRecord]) -> Result<(), FailureReason> {
    let file = File::create(path).map_err(FailureReason::Create)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(COLUMNS).map_err(FailureReason::Write)?;
    for record in rows {
        writer.write_record(record.fields()).map_err(FailureReason::Write)?;
    }
    writer.flush().map_err(|e| FailureReason::Write(e.into()))?;

    Ok(())
}
