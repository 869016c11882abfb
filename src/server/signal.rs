// Signal handling module
//
// SIGTERM and SIGINT both mean "stop now". Either resolves the shutdown
// future, letting the accept loop return cleanly with exit status 0.

/// Completes when a termination signal is received
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => {}
        _ = sigint.recv() => {}
    }
}

/// Windows fallback: only Ctrl+C is supported
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        crate::logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
        std::future::pending::<()>().await;
    }
}
