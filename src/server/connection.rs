// Connection handling module
// Accepts TCP connections and serves each one on its own task

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;

/// Accept a connection unless the connection limit is reached.
///
/// Returns `false` when the connection was rejected.
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
) -> bool {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            // Exceeded limit: rollback counter and reject
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            );
            drop(stream);
            return false;
        }
    }

    tracing::debug!("Accepted connection from {peer_addr}");
    handle_connection(stream, peer_addr, Arc::clone(state), Arc::clone(conn_counter));
    true
}

/// Connection timeout derived from the performance settings
fn connection_timeout(state: &AppState) -> Duration {
    let perf = &state.config.performance;
    Duration::from_secs(std::cmp::max(perf.read_timeout, perf.write_timeout))
}

/// Serve a single connection in a spawned task.
///
/// The connection counter is decremented when the task finishes, whatever the
/// outcome.
fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let timeout_duration = connection_timeout(&state);

        let mut builder = http1::Builder::new();
        builder.keep_alive(state.config.performance.keep_alive_timeout > 0);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&state), peer_addr)),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::error!("Failed to serve connection from {peer_addr}: {err:?}"),
            Err(_) => tracing::warn!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout_duration.as_secs()
            ),
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EmbeddedCatalog;
    use crate::config::Config;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn create_test_state(extra: &str) -> Arc<AppState> {
        let config =
            Config::from_toml_str(&format!("[logging]\naccess_log = false\n{extra}")).unwrap();
        let catalog = EmbeddedCatalog::new().with("/index.html", "<html>OK</html>");
        Arc::new(AppState::new(config, Arc::new(catalog)))
    }

    #[test]
    fn test_connection_timeout_uses_larger_value() {
        let state = create_test_state("[performance]\nread_timeout = 5\nwrite_timeout = 12");
        assert_eq!(connection_timeout(&state), Duration::from_secs(12));
    }

    #[tokio::test]
    async fn test_serves_over_tcp() {
        let state = create_test_state("");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        let server_state = Arc::clone(&state);
        let server_counter = Arc::clone(&counter);
        tokio::spawn(async move {
            let (stream, peer) = listener.accept().await.unwrap();
            accept_connection(stream, peer, &server_state, &server_counter);
        });

        let mut client = TcpStream::connect(addr).await.unwrap();
        client
            .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = Vec::new();
        client.read_to_end(&mut raw).await.unwrap();
        let text = String::from_utf8_lossy(&raw);

        assert!(text.starts_with("HTTP/1.1 200 OK"), "got: {text}");
        assert!(text.to_ascii_lowercase().contains("content-type: text/html"));
        assert!(text.ends_with("<html>OK</html>"));
    }

    #[tokio::test]
    async fn test_rejects_over_limit() {
        let state = create_test_state("[performance]\nmax_connections = 1");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let counter = Arc::new(AtomicUsize::new(1));

        let _client = TcpStream::connect(addr).await.unwrap();
        let (stream, peer) = listener.accept().await.unwrap();

        assert!(!accept_connection(stream, peer, &state, &counter));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
