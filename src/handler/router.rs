//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, resolution on
//! the blocking pool, outcome logging and response building.

use crate::config::AppState;
use crate::http::{self, ResponseEnvelope};
use crate::logger::{self, AccessLogEntry};
use crate::resolver::{ResolveError, Resource};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::request::Parts;
use hyper::{HeaderMap, Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The request body is never read.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();
    let path = parts.uri.path().to_string();

    let response = dispatch(&state, &parts.method, &path).await;

    if state.access_log() {
        let mut entry = access_entry(&parts, &response, peer_addr);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Build the access log entry for a finished request
fn access_entry(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = http_version(parts.version).to_string();
    entry.status = response.status().as_u16();
    // HEAD answers carry Content-Length but no body
    if parts.method != Method::HEAD {
        entry.body_bytes = content_length(response);
    }
    entry.content_type = header_value(response.headers(), "content-type");
    entry.referer = header_value(&parts.headers, "referer");
    entry.user_agent = header_value(&parts.headers, "user-agent");
    entry
}

/// Answer one request path for the given method
pub async fn dispatch(state: &Arc<AppState>, method: &Method, path: &str) -> Response<Full<Bytes>> {
    if let Some(resp) = check_http_method(method) {
        return resp;
    }

    let is_head = *method == Method::HEAD;
    let resolver = Arc::clone(&state.resolver);
    let request_path = path.to_string();
    let context_path = state.context_path().to_string();

    tracing::debug!("Fetching {path} under {}", resolver.base_location());

    // Catalog reads block
    let result = tokio::task::spawn_blocking(move || {
        resolver.resolve(&request_path, &context_path)
    })
    .await;

    match result {
        Ok(resolution) => {
            log_resolution(path, &resolution);
            ResponseEnvelope::from_resolution(&resolution).into_response(is_head)
        }
        Err(e) => {
            tracing::error!("Resolver task failed for {path}: {e}");
            http::build_500_response()
        }
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            tracing::warn!("Method not allowed: {method}");
            Some(http::build_405_response())
        }
    }
}

/// Report the outcome; read faults keep their cause here even though the
/// client only sees a 404
fn log_resolution(path: &str, resolution: &Result<Resource, ResolveError>) {
    match resolution {
        Ok(resource) => tracing::debug!(
            "Served {} ({}, {} bytes)",
            resource.relative_path,
            resource.content_type,
            resource.content_length()
        ),
        Err(err @ ResolveError::NotFound { .. }) => tracing::info!("{err}"),
        Err(err @ ResolveError::InvalidPath { .. }) => tracing::warn!("Rejected {path}: {err}"),
        Err(err @ ResolveError::Read { .. }) => tracing::error!("{err}"),
    }
}

const fn http_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn content_length(response: &Response<Full<Bytes>>) -> usize {
    header_value(response.headers(), "content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
