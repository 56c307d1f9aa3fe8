// Server module entry point
// Accept loop, connection handling and listener creation

pub mod connection;
pub mod listener;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;

pub use connection::accept_connection;
pub use listener::create_reusable_listener;

/// Accept connections until Ctrl-C is received
pub async fn run(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => tracing::error!("Failed to accept connection: {e}"),
                }
            }

            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!(
                    "Shutdown signal received, {} connection(s) still active",
                    active_connections.load(Ordering::SeqCst)
                );
                return Ok(());
            }
        }
    }
}
