//! roster-split CLI - one CSV per state from a student roster
//!
//! ```bash
//! roster-split roster.csv                     # write <STATE>.csv files here
//! roster-split roster.csv -o out/             # write them into out/
//! roster-split roster.csv --summary run.json  # also save a JSON run summary
//! ```
//!
//! Options can also come from the environment or a `.env` file
//! (`ROSTER_SPLIT_OUTPUT_DIR`, `ROSTER_SPLIT_QUIET`, `ROSTER_SPLIT_LOG_FORMAT`).

use clap::Parser;
use roster_split::logs::{self, log_error, log_error_indent};
use roster_split::{run, LogConfig, LogFormat, SplitError, SplitOptions, WriteOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roster-split")]
#[command(about = "Split a student roster CSV into one file per state, sorted by MATRIC_NUM", long_about = None)]
struct Cli {
    /// Input roster CSV
    input: PathBuf,

    /// Directory for the per-state files (must exist)
    #[arg(short, long, env = "ROSTER_SPLIT_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Only print warnings and errors
    #[arg(short, long, env = "ROSTER_SPLIT_QUIET", value_parser = clap::builder::BoolishValueParser::new())]
    quiet: bool,

    /// Log line format
    #[arg(long, value_enum, env = "ROSTER_SPLIT_LOG_FORMAT", default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Save a JSON summary of the run
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl Cli {
    fn log_config(&self) -> LogConfig {
        LogConfig {
            format: self.log_format,
            quiet: self.quiet,
            capture: false,
        }
    }

    fn split_options(self) -> SplitOptions {
        SplitOptions {
            input: self.input,
            write: WriteOptions {
                output_dir: self.output_dir,
            },
            summary_path: self.summary,
        }
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logs::configure(cli.log_config());

    if let Err(e) = run(&cli.split_options()) {
        report(&e);
        std::process::exit(e.exit_code());
    }
}

fn report(error: &SplitError) {
    log_error(error.to_string());
    if let SplitError::Write(write_err) = error {
        for failure in write_err.failures() {
            log_error_indent(failure.to_string(), 1);
        }
    }
}
