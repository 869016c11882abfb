use std::sync::Arc;

use devserve::config::{AppState, Config};
use devserve::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime; worker thread count follows the config
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    let state = AppState::new(cfg)
        .map_err(|e| format!("Serving root is not accessible: {e}"))?;
    let state = Arc::new(state);

    // Bind failure (port in use) is fatal: report and exit non-zero
    let listener = match server::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            logger::log_bind_failed(&addr, &e);
            return Err(e.into());
        }
    };

    logger::log_server_start(&addr, &state.root);

    server::run(listener, state).await?;
    Ok(())
}
