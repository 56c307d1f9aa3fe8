// Configuration module entry point
// Loads application configuration and builds the shared runtime state

mod state;
mod types;

use config::builder::DefaultState;
use config::ConfigBuilder;
use std::net::SocketAddr;
use std::sync::Arc;

// Re-export public types
pub use state::AppState;
pub use types::{
    CatalogConfig, Config, LoggingConfig, PerformanceConfig, ResourcesConfig, ServerConfig,
};

use crate::catalog::{ArchiveCatalog, DirectoryCatalog, ResourceCatalog};

/// Default config file, looked up without extension
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `STATIC_SERVER__PORT=9000`
const ENV_PREFIX: &str = "STATIC";

impl Config {
    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parse configuration from a TOML string on top of the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        Self::builder()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("resources.context_path", "")?
            .set_default("resources.base_location", "/")?
            .set_default("resources.default_resource", "index.html")?
            .set_default("resources.catalog.type", "dir")?
            .set_default("resources.catalog.path", "public")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

impl CatalogConfig {
    /// Open the configured catalog
    pub fn open(&self) -> Result<Arc<dyn ResourceCatalog>, Box<dyn std::error::Error>> {
        match self {
            Self::Dir { path } => Ok(Arc::new(DirectoryCatalog::open(path)?)),
            Self::Archive { path } => Ok(Arc::new(ArchiveCatalog::open(path)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::from_toml_str("").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
        assert_eq!(cfg.resources.context_path, "");
        assert_eq!(cfg.resources.base_location, "/");
        assert_eq!(cfg.resources.default_resource, "index.html");
        assert_eq!(
            cfg.resources.catalog,
            CatalogConfig::Dir {
                path: "public".to_string()
            }
        );
    }

    #[test]
    fn test_parse_archive_catalog() {
        let cfg = Config::from_toml_str(
            r#"
            [server]
            port = 9000
            workers = 2

            [logging]
            level = "debug"
            access_log = false
            access_log_format = "json"

            [resources]
            context_path = "/app"
            base_location = "/static"
            default_resource = "home.html"
            catalog = { type = "archive", path = "site.zip" }
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.workers.map(std::num::NonZeroUsize::get), Some(2));
        assert_eq!(cfg.logging.level, "debug");
        assert!(!cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "json");
        assert_eq!(cfg.resources.context_path, "/app");
        assert_eq!(cfg.resources.base_location, "/static");
        assert_eq!(cfg.resources.default_resource, "home.html");
        assert_eq!(
            cfg.resources.catalog,
            CatalogConfig::Archive {
                path: "site.zip".to_string()
            }
        );
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(Config::from_toml_str("[server]\nworkers = 0").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::from_toml_str("[server]\nhost = \"0.0.0.0\"\nport = 3000").unwrap();
        assert_eq!(cfg.get_socket_addr().unwrap().port(), 3000);

        let cfg = Config::from_toml_str("[server]\nhost = \"not a host\"").unwrap();
        assert!(cfg.get_socket_addr().is_err());
    }

    #[test]
    fn test_open_dir_catalog() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "hi").unwrap();

        let catalog = CatalogConfig::Dir {
            path: dir.path().display().to_string(),
        }
        .open()
        .unwrap();
        assert_eq!(&catalog.read("/index.html").unwrap()[..], b"hi");
    }

    #[test]
    fn test_open_missing_catalog() {
        let catalog = CatalogConfig::Archive {
            path: "/nonexistent/site.zip".to_string(),
        };
        assert!(catalog.open().is_err());
    }
}
