// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::catalog::ResourceCatalog;
use crate::http::MimeTable;
use crate::resolver::Resolver;

/// Application state
pub struct AppState {
    pub config: Config,
    pub resolver: Arc<Resolver>,
}

impl AppState {
    /// Wire the resolver from configuration and an opened catalog
    pub fn new(config: Config, catalog: Arc<dyn ResourceCatalog>) -> Self {
        let resolver = Resolver::new(
            catalog,
            Arc::new(MimeTable::default()),
            &config.resources.base_location,
            config.resources.default_resource.clone(),
        );

        Self {
            config,
            resolver: Arc::new(resolver),
        }
    }

    /// Build state, opening the catalog named in the configuration
    pub fn from_config(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let catalog = config.resources.catalog.open()?;
        Ok(Self::new(config, catalog))
    }

    pub fn context_path(&self) -> &str {
        &self.config.resources.context_path
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
