// logging.rs
// Timestamped logging for the bingo caller

use std::io::{self, Write};

use chrono::Local;

#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Build a log line with the local timestamp
pub fn format_message(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("{} - {} - {}", timestamp, level.as_str(), message)
}

/// Write one log line to `out`
pub fn write_message<W: Write>(out: &mut W, level: LogLevel, message: &str) -> io::Result<()> {
    writeln!(out, "{}", format_message(level, message))
}

/// Every level goes to stderr; stdout carries command output only
pub fn log_message(level: LogLevel, message: &str) {
    let _ = write_message(&mut io::stderr().lock(), level, message);
}

/// Debug lines are printed only when BINGO_DEBUG is set
pub fn log_debug(message: &str) {
    if std::env::var_os("BINGO_DEBUG").is_some() {
        log_message(LogLevel::Debug, message);
    }
}

pub fn log_info(message: &str) {
    log_message(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_message(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_message(LogLevel::Error, message);
}
