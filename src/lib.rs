//! Static resource serving
//!
//! Resolves request paths against a read-only resource catalog and reports
//! the payload with its Content-Type and Content-Length. The resolver is host
//! independent; `handler` and `server` embed it behind a hyper HTTP/1 server.

pub mod catalog;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod resolver;
pub mod server;

pub use catalog::{ArchiveCatalog, CatalogError, DirectoryCatalog, EmbeddedCatalog, ResourceCatalog};
pub use http::{MimeTable, ResponseEnvelope};
pub use resolver::{resolve, ResolveError, Resolver, Resource};
