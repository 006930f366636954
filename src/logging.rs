// src/logging.rs

//! Dual-sink logging: console plus an append-only log file.
//!
//! Installs a [`log::Log`] implementation so the rest of the crate uses the
//! standard `log::info!`/`log::warn!` macros. Info-level output goes to
//! stdout with a short timestamp; warnings and errors go to stderr. The log
//! file receives every record with a full timestamp and level so runs can be
//! audited after the fact.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};

use crate::error::{AppError, Result};

struct DualLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl log::Log for DualLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();

        match record.level() {
            Level::Error | Level::Warn => {
                eprintln!("{}", console_line(record.level(), &message));
            }
            _ => println!("{}", console_line(record.level(), &message)),
        }

        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", file_line(record.level(), &message));
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Format a record for the console sink.
fn console_line(level: Level, message: &str) -> String {
    format!(
        "[{}] [{}] {}",
        Local::now().format("%H:%M:%S"),
        level_tag(level),
        message
    )
}

/// Format a record for the file sink.
fn file_line(level: Level, message: &str) -> String {
    format!(
        "[{}] [{}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        level_tag(level),
        message
    )
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// Level filter for the given verbosity flag.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the dual-sink logger.
///
/// Opens (or creates) the log file in append mode. Must be called once,
/// before any log macro fires.
pub fn init(log_path: &Path, verbose: bool) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;
    let level = level_for(verbose);

    let logger = DualLogger {
        level,
        file: Mutex::new(file),
    };

    log::set_boxed_logger(Box::new(logger))
        .map_err(|e| AppError::config(format!("failed to install logger: {e}")))?;
    log::set_max_level(level);
    Ok(())
}
