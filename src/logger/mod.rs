//! Logger module
//!
//! Installs the `tracing` subscriber and provides the logging helpers used by
//! the server:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{Config, LoggingConfig};
use std::net::SocketAddr;
use thiserror::Error;
use tracing_subscriber::filter::{filter_fn, EnvFilter, ParseError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, Layer};
use writer::Console;

/// Target carrying access log lines
pub const ACCESS_TARGET: &str = "access";

/// Errors raised while installing the logger
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid log level directive: {0}")]
    Filter(#[from] ParseError),

    #[error("logger already initialized: {0}")]
    Init(#[from] TryInitError),
}

/// Application log filter: `RUST_LOG` wins over the configured level, and
/// access lines never reach the application stream
fn app_filter(level: &str) -> Result<EnvFilter, ParseError> {
    let base = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| level.to_string());
    EnvFilter::try_new(format!("{base},{ACCESS_TARGET}=off"))
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &LoggingConfig) -> Result<(), LoggerError> {
    let app_layer = fmt::layer()
        .with_writer(writer::make_writer(
            config.error_log_file.as_deref(),
            Console::Stderr,
        )?)
        .with_ansi(config.error_log_file.is_none())
        .with_filter(app_filter(&config.level)?);

    // Access lines are preformatted and carry their own timestamp
    let access_layer = fmt::layer()
        .with_writer(writer::make_writer(
            config.access_log_file.as_deref(),
            Console::Stdout,
        )?)
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_filter(filter_fn(|meta| meta.target() == ACCESS_TARGET));

    tracing_subscriber::registry()
        .with(app_layer)
        .with(access_layer)
        .try_init()?;
    Ok(())
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!("Static resource server started");
    tracing::info!("Listening on: http://{addr}");
    tracing::info!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if let Some(ref path) = config.logging.access_log_file {
        tracing::info!("Access log: {path}");
    }
    if let Some(ref path) = config.logging.error_log_file {
        tracing::info!("Error log: {path}");
    }
    tracing::info!(
        "Serving {:?} under context {:?} (default: {})",
        config.resources.base_location,
        config.resources.context_path,
        config.resources.default_resource
    );
    tracing::info!("======================================");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}
