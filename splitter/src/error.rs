//! Error types for the roster splitting pipeline.
//!
//! - [`LoadError`] - reading and decoding the input roster (fatal)
//! - [`GroupFailure`] - one state group that could not be written (non-fatal)
//! - [`WriteError`] - aggregate of every failed group, raised after all groups ran
//! - [`SplitError`] - top-level error returned by [`crate::run`]
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::writer::WriteReport;

// =============================================================================
// Loader Errors
// =============================================================================

/// Errors while loading the input roster. Any of these aborts the run
/// before a single output file is created.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file could not be opened.
    #[error("Cannot open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table could not be decoded (bad quoting, invalid UTF-8, I/O mid-read).
    #[error("Invalid CSV: {0}")]
    Decode(#[from] csv::Error),

    /// Header only, or nothing at all.
    #[error("No data found: the roster needs a header row and at least one data row")]
    EmptyInput,

    /// A data row without exactly the fixed number of columns.
    #[error("Row {row}: expected {expected} columns, found {found}")]
    RowShape {
        /// 1-based row number in the file, header included.
        row: usize,
        found: usize,
        expected: usize,
    },
}

// =============================================================================
// Writer Errors
// =============================================================================

/// Why a single state group produced no file.
#[derive(Debug, Error)]
pub enum FailureReason {
    /// Output file could not be created.
    #[error("cannot create file: {0}")]
    Create(#[source] std::io::Error),

    /// File was created but writing rows or flushing failed.
    #[error("cannot write rows: {0}")]
    Write(#[source] csv::Error),

    /// Another state already claimed this filename during the run.
    #[error("file name already used by state '{with}'")]
    Collision { with: String },
}

/// A state group that failed to write.
#[derive(Debug, Error)]
#[error("state '{key}' ({file_name}): {reason}")]
pub struct GroupFailure {
    pub key: String,
    pub file_name: String,
    #[source]
    pub reason: FailureReason,
}

/// Aggregate writer error, returned only after every group was attempted.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to create files for states: {}", FailedKeys(.failures))]
    Failed {
        failures: Vec<GroupFailure>,
        /// What did get written before and after the failures.
        report: WriteReport,
    },
}

impl WriteError {
    pub fn failures(&self) -> &[GroupFailure] {
        match self {
            WriteError::Failed { failures, .. } => failures,
        }
    }

    pub fn report(&self) -> &WriteReport {
        match self {
            WriteError::Failed { report, .. } => report,
        }
    }
}

struct FailedKeys<'a>(&'a [GroupFailure]);

impl fmt::Display for FailedKeys<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}'", failure.key)?;
        }
        Ok(())
    }
}

// =============================================================================
// Top-level Errors
// =============================================================================

/// Top-level error for a full split run.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Reading the roster failed.
    #[error("Error reading CSV file: {0}")]
    Load(#[from] LoadError),

    /// One or more state files failed.
    #[error("Error writing CSV files: {0}")]
    Write(#[from] WriteError),

    /// The run summary could not be saved.
    #[error("Cannot write summary '{}': {source}", .path.display())]
    Summary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SplitError {
    /// Process exit status for this error (sysexits values).
    pub fn exit_code(&self) -> i32 {
        match self {
            SplitError::Load(LoadError::Open { .. }) => 66,
            SplitError::Load(_) => 65,
            SplitError::Write(_) => 73,
            SplitError::Summary { .. } => 74,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for writer operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for a full run.
pub type SplitResult<T> = Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn failure(key: &str) -> GroupFailure {
        GroupFailure {
            key: key.into(),
            file_name: format!("{}.csv", key),
            reason: FailureReason::Create(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        }
    }

    #[test]
    fn test_error_conversion_chain() {
        let split_err: SplitError = LoadError::EmptyInput.into();
        assert!(split_err.to_string().contains("No data found"));
        assert_eq!(split_err.exit_code(), 65);

        let write_err = WriteError::Failed {
            failures: vec![failure("LAGOS")],
            report: WriteReport::default(),
        };
        let split_err: SplitError = write_err.into();
        assert!(split_err.to_string().contains("LAGOS"));
        assert_eq!(split_err.exit_code(), 73);
    }

    #[test]
    fn test_open_error_exit_code() {
        let err: SplitError = LoadError::Open {
            path: PathBuf::from("missing.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        }
        .into();
        assert_eq!(err.exit_code(), 66);
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_row_shape_format() {
        let msg = LoadError::RowShape { row: 4, found: 13, expected: 14 }.to_string();
        assert!(msg.contains("Row 4"));
        assert!(msg.contains("expected 14"));
        assert!(msg.contains("found 13"));
    }

    #[test]
    fn test_aggregate_lists_every_key() {
        let err = WriteError::Failed {
            failures: vec![failure("LAGOS"), failure("OGUN")],
            report: WriteReport::default(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to create files for states: 'LAGOS', 'OGUN'"
        );
        assert_eq!(err.failures().len(), 2);
    }
}
