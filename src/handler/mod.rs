//! Request handler module
//!
//! Adapts inbound hyper requests to the resolver and resolution results back
//! to hyper responses.

pub mod router;

// Re-export main entry point
pub use router::{dispatch, handle_request};
