//! Filesystem catalog
//!
//! Serves resources from a directory tree. Every lookup is confined to the
//! canonical root: `..` segments are rejected outright and the canonical target
//! must still live under the root, which also catches symlinks pointing out.

use super::{segments, CatalogError, ResourceCatalog};
use hyper::body::Bytes;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Catalog backed by a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    /// Open a catalog rooted at `root`
    ///
    /// Fails if the root does not exist or is not a directory.
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("catalog root is not a directory: {}", root.display()),
            ));
        }
        Ok(Self { root })
    }

    /// Map a catalog path to a file under the root, or `None` if it would escape
    fn locate(&self, path: &str) -> Option<PathBuf> {
        let mut file_path = self.root.clone();
        for segment in segments(path) {
            if segment == ".." {
                return None;
            }
            file_path.push(segment);
        }
        Some(file_path)
    }
}

impl ResourceCatalog for DirectoryCatalog {
    fn read(&self, path: &str) -> Result<Bytes, CatalogError> {
        let Some(file_path) = self.locate(path) else {
            tracing::warn!(path, "Path traversal attempt blocked");
            return Err(CatalogError::not_found(path));
        };

        // A path that does not resolve names nothing, whatever the io kind
        // (missing entry, a file used as a directory, name too long, loops)
        let canonical = match file_path.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(path, error = %e, "Resource path does not resolve");
                return Err(CatalogError::not_found(path));
            }
        };

        if !canonical.starts_with(&self.root) {
            tracing::warn!(
                path,
                resolved = %canonical.display(),
                "Path traversal attempt blocked"
            );
            return Err(CatalogError::not_found(path));
        }

        if canonical.is_dir() {
            return Err(CatalogError::not_found(path));
        }

        match fs::read(&canonical) {
            Ok(content) => Ok(Bytes::from(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CatalogError::not_found(path)),
            Err(e) => Err(CatalogError::read(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_root() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("static/css")).unwrap();
        fs::write(dir.path().join("static/index.html"), "<html>OK</html>").unwrap();
        fs::write(dir.path().join("static/css/site.css"), "body {}").unwrap();
        fs::write(dir.path().join("secret.txt"), "top secret").unwrap();
        dir
    }

    #[test]
    fn test_open_missing_root() {
        let dir = TempDir::new().unwrap();
        assert!(DirectoryCatalog::open(dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_open_file_as_root() {
        let dir = create_test_root();
        let err = DirectoryCatalog::open(dir.path().join("secret.txt")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_read_file() {
        let dir = create_test_root();
        let catalog = DirectoryCatalog::open(dir.path()).unwrap();
        let bytes = catalog.read("/static/index.html").unwrap();
        assert_eq!(&bytes[..], b"<html>OK</html>");

        let bytes = catalog.read("/static//css/site.css").unwrap();
        assert_eq!(&bytes[..], b"body {}");
    }

    #[test]
    fn test_read_missing() {
        let dir = create_test_root();
        let catalog = DirectoryCatalog::open(dir.path()).unwrap();
        assert!(matches!(
            catalog.read("/static/missing.css"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_directory_is_not_found() {
        let dir = create_test_root();
        let catalog = DirectoryCatalog::open(dir.path()).unwrap();
        assert!(matches!(
            catalog.read("/static/css"),
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(catalog.read("/"), Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn test_path_below_file_is_not_found() {
        let dir = create_test_root();
        let catalog = DirectoryCatalog::open(dir.path()).unwrap();
        assert!(matches!(
            catalog.read("/static/index.html/x"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_overlong_name_is_not_found() {
        let dir = create_test_root();
        let catalog = DirectoryCatalog::open(dir.path()).unwrap();
        let name = format!("/static/{}.css", "a".repeat(300));
        assert!(matches!(catalog.read(&name), Err(CatalogError::NotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_read_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = create_test_root();
        let file = dir.path().join("static/locked.html");
        fs::write(&file, "locked").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not apply to root
        if fs::File::open(&file).is_ok() {
            return;
        }

        let catalog = DirectoryCatalog::open(dir.path()).unwrap();
        match catalog.read("/static/locked.html") {
            Err(CatalogError::Read { path, source }) => {
                assert_eq!(path, "/static/locked.html");
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_parent_segments_blocked() {
        let dir = create_test_root();
        let catalog = DirectoryCatalog::open(dir.path().join("static")).unwrap();
        assert!(matches!(
            catalog.read("/../secret.txt"),
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(
            catalog.read("/css/../../secret.txt"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_blocked() {
        let dir = create_test_root();
        std::os::unix::fs::symlink(
            dir.path().join("secret.txt"),
            dir.path().join("static/leak.txt"),
        )
        .unwrap();

        let catalog = DirectoryCatalog::open(dir.path().join("static")).unwrap();
        assert!(matches!(
            catalog.read("/leak.txt"),
            Err(CatalogError::NotFound(_))
        ));
    }
}
