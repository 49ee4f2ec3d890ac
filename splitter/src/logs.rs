//! Run log for the CLI and library callers.
//!
//! Every step of a split reports through the global [`LOGGER`], which writes
//! to stderr as plain text or one JSON object per line, and can also keep
//! the entries in memory so callers (and tests) can inspect what happened.

use std::io::Write;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested logs)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Text rendering used on stderr.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{} {}", indent, prefix, self.message)
    }
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logger settings, applied once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Hide info and success lines.
    pub quiet: bool,
    /// Keep every entry in memory (see [`Logger::take_captured`]).
    pub capture: bool,
}

/// Global logger
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

pub struct Logger {
    config: Mutex<LogConfig>,
    captured: Mutex<Vec<LogEntry>>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            config: Mutex::new(LogConfig::default()),
            captured: Mutex::new(Vec::new()),
        }
    }

    pub fn configure(&self, config: LogConfig) {
        if let Ok(mut current) = self.config.lock() {
            *current = config;
        }
    }

    /// Emit one entry according to the current settings.
    pub fn log(&self, entry: LogEntry) {
        let config = match self.config.lock() {
            Ok(c) => c.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        let hidden = config.quiet && matches!(entry.level, LogLevel::Info | LogLevel::Success);
        if !hidden {
            let line = match config.format {
                LogFormat::Text => entry.render(),
                LogFormat::Json => serde_json::to_string(&entry).unwrap_or_else(|_| entry.render()),
            };
            // Nothing sensible to do if stderr is gone.
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
        }

        if config.capture {
            if let Ok(mut captured) = self.captured.lock() {
                captured.push(entry);
            }
        }
    }

    /// Drain the entries kept since capture was enabled.
    pub fn take_captured(&self) -> Vec<LogEntry> {
        match self.captured.lock() {
            Ok(mut captured) => std::mem::take(&mut *captured),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure the global logger
pub fn configure(config: LogConfig) {
    LOGGER.configure(config);
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::error(msg));
}

pub fn log_error_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::error(msg).with_indent(indent));
}
