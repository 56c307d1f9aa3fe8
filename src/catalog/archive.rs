//! Zip archive catalog
//!
//! The archive is loaded into memory once. The parsed central directory is
//! shared between clones of the `ZipArchive`, so each read clones the handle
//! instead of locking a single reader.

use super::{segments, CatalogError, ResourceCatalog};
use hyper::body::Bytes;
use std::io::{self, Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use zip::result::{ZipError, ZipResult};
use zip::ZipArchive;

/// Catalog backed by a zip archive
#[derive(Clone)]
pub struct ArchiveCatalog {
    archive: ZipArchive<Cursor<Arc<[u8]>>>,
}

impl std::fmt::Debug for ArchiveCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveCatalog")
            .field("entries", &self.archive.len())
            .finish()
    }
}

impl ArchiveCatalog {
    /// Load an archive from disk
    pub fn open(path: impl AsRef<Path>) -> ZipResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// Parse an archive already held in memory
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> ZipResult<Self> {
        let archive = ZipArchive::new(Cursor::new(bytes.into()))?;
        Ok(Self { archive })
    }

    /// Number of entries, directories included
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

/// Zip entry names carry no leading separator. Directory entries end with one,
/// so a directory never matches a trimmed name.
fn entry_name(path: &str) -> String {
    segments(path).collect::<Vec<_>>().join("/")
}

fn zip_to_io(err: ZipError) -> io::Error {
    match err {
        ZipError::Io(e) => e,
        other => io::Error::other(other),
    }
}

impl ResourceCatalog for ArchiveCatalog {
    fn read(&self, path: &str) -> Result<Bytes, CatalogError> {
        let name = entry_name(path);
        if name.is_empty() {
            return Err(CatalogError::not_found(path));
        }

        let mut archive = self.archive.clone();
        let mut file = match archive.by_name(&name) {
            Ok(f) => f,
            Err(ZipError::FileNotFound) => return Err(CatalogError::not_found(path)),
            Err(e) => return Err(CatalogError::read(path, zip_to_io(e))),
        };

        let capacity = usize::try_from(file.size()).unwrap_or(0);
        let mut content = Vec::with_capacity(capacity);
        file.read_to_end(&mut content)
            .map_err(|e| CatalogError::read(path, e))?;

        Ok(Bytes::from(content))
    }
}
