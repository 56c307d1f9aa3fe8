//! In-memory catalog
//!
//! Holds resources as `Bytes` keyed by normalized path. Lookups hand out a
//! cheap clone of the stored buffer.

use super::{normalize_path, CatalogError, ResourceCatalog};
use hyper::body::Bytes;
use std::collections::HashMap;

/// Catalog backed by an in-memory table
#[derive(Debug, Clone, Default)]
pub struct EmbeddedCatalog {
    entries: HashMap<String, Bytes>,
}

impl EmbeddedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, replacing any previous entry at the same path
    pub fn insert(&mut self, path: &str, content: impl Into<Bytes>) {
        self.entries.insert(normalize_path(path), content.into());
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, path: &str, content: impl Into<Bytes>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(&normalize_path(path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<P, B> FromIterator<(P, B)> for EmbeddedCatalog
where
    P: AsRef<str>,
    B: Into<Bytes>,
{
    fn from_iter<I: IntoIterator<Item = (P, B)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (path, content) in iter {
            catalog.insert(path.as_ref(), content);
        }
        catalog
    }
}

impl ResourceCatalog for EmbeddedCatalog {
    fn read(&self, path: &str) -> Result<Bytes, CatalogError> {
        self.entries
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| CatalogError::not_found(path))
    }
}
