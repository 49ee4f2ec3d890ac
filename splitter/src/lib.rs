//! # roster-split - one CSV per state from a student roster
//!
//! Reads a comma-separated student roster, groups the rows by state of
//! origin and writes one table per state, each sorted by matriculation
//! number.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ roster.csv  │────▶│   Parser    │────▶│   Grouper   │────▶│ <STATE>.csv │
//! │ (14 cols)   │     │ (fixed row) │     │ (by state)  │     │  (sorted)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roster_split::{run, SplitOptions};
//!
//! let summary = run(&SplitOptions::new("roster.csv")).unwrap();
//! println!("Wrote {} files", summary.files_written);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types and exit codes
//! - [`models`] - The student record
//! - [`parser`] - Roster loading
//! - [`transform`] - Grouping and the run pipeline
//! - [`writer`] - Per-state output tables
//! - [`logs`] - Run log

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Loading
pub mod parser;

// Grouping
pub mod transform;

// Output
pub mod writer;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    FailureReason,
    GroupFailure,
    LoadError,
    LoadResult,
    SplitError,
    SplitResult,
    WriteError,
    WriteResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{StudentRecord, COLUMNS, COLUMN_COUNT};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{parse_csv, parse_csv_file, parse_str};

// =============================================================================
// Re-exports - Grouping and pipeline
// =============================================================================

pub use transform::{
    group_and_sort,
    is_blank_key,
    run,
    split_records,
    Groups,
    RunSummary,
    SplitOptions,
};

// =============================================================================
// Re-exports - Writer
// =============================================================================

pub use writer::{
    output_file_name,
    sanitize_key,
    write_groups,
    SkippedGroup,
    WriteOptions,
    WriteReport,
    WrittenFile,
};

// =============================================================================
// Re-exports - Logging
// =============================================================================

pub use logs::{LogConfig, LogEntry, LogFormat, LogLevel};
