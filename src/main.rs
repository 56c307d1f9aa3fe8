use static_resources::config::{self, AppState};
use static_resources::{logger, server};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;

    logger::init(&cfg.logging)?;

    // Size the Tokio runtime from the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers.get());
        tracing::info!("Using {workers} worker threads");
    } else {
        tracing::info!("Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let state = Arc::new(AppState::from_config(cfg)?);

    logger::log_server_start(&addr, &state.config);

    server::run(listener, state).await?;
    Ok(())
}
