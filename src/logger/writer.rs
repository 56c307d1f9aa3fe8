//! Log writer module
//!
//! Picks the output for each log stream: an append-mode file when a path is
//! configured, stdout/stderr otherwise.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Fallback stream when no file is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Console {
    Stdout,
    Stderr,
}

/// Writer for a log stream
pub fn make_writer(path: Option<&str>, console: Console) -> io::Result<BoxMakeWriter> {
    Ok(match path {
        Some(p) => BoxMakeWriter::new(Mutex::new(open_log_file(p)?)),
        None => match console {
            Console::Stdout => BoxMakeWriter::new(io::stdout),
            Console::Stderr => BoxMakeWriter::new(io::stderr),
        },
    })
}

/// Open or create a log file for appending
pub fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}
