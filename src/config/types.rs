// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::num::NonZeroUsize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub resources: ResourcesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads, CPU cores when unset; zero is rejected
    pub workers: Option<NonZeroUsize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Level directive, overridden by `RUST_LOG` when set
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Static resource settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ResourcesConfig {
    /// Prefix stripped from every request path (plus one separator)
    pub context_path: String,
    /// Location inside the catalog that requests are resolved under
    pub base_location: String,
    /// Served for bare or root requests
    pub default_resource: String,
    pub catalog: CatalogConfig,
}

/// Where resource bytes come from
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogConfig {
    /// Directory tree on disk
    Dir { path: String },
    /// Zip archive loaded into memory
    Archive { path: String },
}
