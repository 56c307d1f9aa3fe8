//! HTTP response building module
//!
//! Turns resolution results into a protocol-neutral [`ResponseEnvelope`] and
//! envelopes into hyper responses. Also provides builders for the few status
//! codes the handler answers on its own.

use crate::resolver::{ResolveError, Resource};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

const TEXT_PLAIN: &str = "text/plain";

/// Status, headers and payload derived from one resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub content_type: &'static str,
    pub content_length: usize,
    pub body: Bytes,
}

impl ResponseEnvelope {
    /// 200 with the resource payload
    pub fn ok(resource: &Resource) -> Self {
        Self {
            status: 200,
            content_type: resource.content_type,
            content_length: resource.content_length(),
            body: resource.body.clone(),
        }
    }

    /// Plain-text error envelope
    ///
    /// Read faults come out exactly like a missing resource.
    pub fn error(err: &ResolveError) -> Self {
        let body = Bytes::from(err.public_message());
        Self {
            status: err.status(),
            content_type: TEXT_PLAIN,
            content_length: body.len(),
            body,
        }
    }

    pub fn from_resolution(result: &Result<Resource, ResolveError>) -> Self {
        match result {
            Ok(resource) => Self::ok(resource),
            Err(err) => Self::error(err),
        }
    }

    /// Build the hyper response; HEAD keeps `Content-Length` but drops the body
    pub fn into_response(self, is_head: bool) -> Response<Full<Bytes>> {
        let body = if is_head { Bytes::new() } else { self.body };

        Response::builder()
            .status(self.status)
            .header("Content-Type", self.content_type)
            .header("Content-Length", self.content_length)
            .body(Full::new(body))
            .unwrap_or_else(|e| {
                log_build_error(&self.status.to_string(), &e);
                Response::new(Full::new(Bytes::new()))
            })
    }
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", TEXT_PLAIN)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", TEXT_PLAIN)
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("500 Internal Server Error")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    tracing::error!("Failed to build {status} response: {error}");
}
