//! Resource catalog module
//!
//! A catalog is a read-only store addressed by a normalized path. The resolver
//! only ever calls [`ResourceCatalog::read`]; adapters decide where the bytes
//! come from:
//! - [`EmbeddedCatalog`] - in-memory table, typically built from `include_bytes!`
//! - [`DirectoryCatalog`] - directory tree on disk, with a traversal guard
//! - [`ArchiveCatalog`] - zip archive (jar-style bundle)

mod archive;
mod directory;
mod embedded;

pub use archive::ArchiveCatalog;
pub use directory::DirectoryCatalog;
pub use embedded::EmbeddedCatalog;

use hyper::body::Bytes;
use std::io;
use thiserror::Error;

/// Errors reported by a catalog lookup
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No resource lives at the given path
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The resource exists but its bytes could not be read
    #[error("failed to read resource {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl CatalogError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    pub fn read(path: impl Into<String>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}

/// Read-only lookup of resource bytes by path
///
/// Implementations must be safe to share across threads; the resolver holds
/// them behind an `Arc` and never synchronizes access.
pub trait ResourceCatalog: Send + Sync {
    /// Read the full contents of the resource at `path`
    fn read(&self, path: &str) -> Result<Bytes, CatalogError>;
}

/// Normalize a catalog path: collapse repeated separators and force a single
/// leading `/`.
///
/// # Examples
/// ```
/// use static_resources::catalog::normalize_path;
/// assert_eq!(normalize_path("static//index.html"), "/static/index.html");
/// assert_eq!(normalize_path("/"), "/");
/// ```
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Iterate over the non-empty segments of a catalog path
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
