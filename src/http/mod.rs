//! HTTP protocol layer module
//!
//! Content-Type detection and response building, kept apart from the resolver
//! so the resolver stays host-independent.

pub mod mime;
pub mod response;

// Re-export commonly used types
pub use mime::MimeTable;
pub use response::{
    build_405_response, build_500_response, build_options_response, ResponseEnvelope,
};
