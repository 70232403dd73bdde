//! Custom logging module.
//!
//! This module provides a logger that captures formatted log entries into a
//! bounded buffer, so the terminal front end can show them in its status pane
//! instead of writing over the screen.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Maximum number of log lines kept.
///
const CAPACITY: usize = 200;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Shared handle on the captured log lines.
///
#[derive(Clone, Debug, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        LogBuffer::default()
    }

    pub fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == CAPACITY {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }

    /// Return the newest `count` lines, oldest first.
    ///
    pub fn tail(&self, count: usize) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines
                .iter()
                .skip(lines.len().saturating_sub(count))
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Logger that captures records of the class helper crate.
///
pub struct CaptureLogger {
    level: LevelFilter,
    buffer: LogBuffer,
}

impl CaptureLogger {
    pub fn new(level: LevelFilter, buffer: LogBuffer) -> Self {
        CaptureLogger { level, buffer }
    }

    /// Install a capture logger as the global logger and return its buffer.
    ///
    pub fn install(level: LevelFilter) -> Result<LogBuffer, SetLoggerError> {
        let buffer = LogBuffer::new();
        let logger: &'static CaptureLogger = Box::leak(Box::new(CaptureLogger::new(level, buffer.clone())));
        log::set_logger(logger)?;
        log::set_max_level(level);
        Ok(buffer)
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let target = metadata.target();
        metadata.level() <= self.level
            && (target.starts_with("roundup_classhelper") || target.starts_with("classhelper"))
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.push(format_log(record));
        }
    }

    fn flush(&self) {}
}
