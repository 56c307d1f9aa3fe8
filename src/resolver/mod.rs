//! Static resource resolution
//!
//! Maps a request path onto a catalog entry: strip the context path, join the
//! remainder onto the base location, fall back to the default resource for
//! root requests, and pick a Content-Type from the extension.
//!
//! Resolution is a single synchronous pass. Nothing here logs or keeps state;
//! the handler decides what to report.

pub mod path;

use crate::catalog::{CatalogError, ResourceCatalog};
use crate::http::mime::MimeTable;
use hyper::body::Bytes;
use std::io;
use std::sync::Arc;
use thiserror::Error;

pub use path::ResolvedPath;

/// A resolved resource with its full payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Request path relative to the context, default resource applied
    pub relative_path: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

impl Resource {
    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}

/// Reasons a resolution fails
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Request path is shorter than the context path plus its separator
    #[error("request path {request_path:?} is too short for context path {context_path:?}")]
    InvalidPath {
        request_path: String,
        context_path: String,
    },

    #[error("resource not found: {relative_path}")]
    NotFound { relative_path: String },

    /// The catalog has the resource but reading it failed
    #[error("failed to read resource {relative_path}: {source}")]
    Read {
        relative_path: String,
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    /// HTTP status a host should answer with
    ///
    /// Read faults answer 404 like a missing resource so catalog internals
    /// never reach the client.
    pub const fn status(&self) -> u16 {
        match self {
            Self::InvalidPath { .. } => 400,
            Self::NotFound { .. } | Self::Read { .. } => 404,
        }
    }

    /// Message safe to send to the client
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidPath { .. } => "invalid request path".to_string(),
            Self::NotFound { relative_path } | Self::Read { relative_path, .. } => {
                format!("resource not found: {relative_path}")
            }
        }
    }

    /// Relative path the failure refers to, if the request got that far
    pub fn relative_path(&self) -> Option<&str> {
        match self {
            Self::InvalidPath { .. } => None,
            Self::NotFound { relative_path } | Self::Read { relative_path, .. } => {
                Some(relative_path)
            }
        }
    }
}

/// Resolve `request_path` against a catalog
///
/// # Examples
/// ```
/// use static_resources::catalog::EmbeddedCatalog;
/// use static_resources::http::mime::MimeTable;
/// use static_resources::resolver::resolve;
///
/// let catalog = EmbeddedCatalog::new().with("/static/index.html", "<html>OK</html>");
/// let resource = resolve(
///     &catalog,
///     &MimeTable::default(),
///     "http://h/",
///     "http://h",
///     "/static",
///     "index.html",
/// )
/// .unwrap();
/// assert_eq!(resource.content_type, "text/html");
/// assert_eq!(resource.content_length(), 15);
/// ```
pub fn resolve<C: ResourceCatalog + ?Sized>(
    catalog: &C,
    mime: &MimeTable,
    request_path: &str,
    context_path: &str,
    base_location: &str,
    default_resource: &str,
) -> Result<Resource, ResolveError> {
    let relative =
        path::strip_context(request_path, context_path).ok_or_else(|| ResolveError::InvalidPath {
            request_path: request_path.to_string(),
            context_path: context_path.to_string(),
        })?;

    let ResolvedPath {
        relative,
        candidate,
    } = ResolvedPath::new(relative, base_location, default_resource);

    let body = match catalog.read(&candidate) {
        Ok(body) => body,
        Err(CatalogError::NotFound(_)) => {
            return Err(ResolveError::NotFound {
                relative_path: relative,
            })
        }
        Err(CatalogError::Read { source, .. }) => {
            return Err(ResolveError::Read {
                relative_path: relative,
                source,
            })
        }
    };

    let content_type = mime.content_type_for_path(&relative);

    Ok(Resource {
        relative_path: relative,
        content_type,
        body,
    })
}

/// Resolver bound to one catalog and its static configuration
///
/// Cheap to share: wrap it in an `Arc` and call [`Resolver::resolve`] from any
/// number of tasks.
#[derive(Clone)]
pub struct Resolver {
    catalog: Arc<dyn ResourceCatalog>,
    mime: Arc<MimeTable>,
    base_location: String,
    default_resource: String,
}

impl Resolver {
    pub fn new(
        catalog: Arc<dyn ResourceCatalog>,
        mime: Arc<MimeTable>,
        base_location: &str,
        default_resource: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            mime,
            base_location: path::normalize_base(base_location).into_owned(),
            default_resource: default_resource.into(),
        }
    }

    pub fn resolve(
        &self,
        request_path: &str,
        context_path: &str,
    ) -> Result<Resource, ResolveError> {
        resolve(
            self.catalog.as_ref(),
            &self.mime,
            request_path,
            context_path,
            &self.base_location,
            &self.default_resource,
        )
    }

    /// Base location, always ending with a separator
    pub fn base_location(&self) -> &str {
        &self.base_location
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("base_location", &self.base_location)
            .field("default_resource", &self.default_resource)
            .finish_non_exhaustive()
    }
}
