// Server module
// Listener binding, the accept loop, and shutdown handling

mod connection;
mod signal;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

/// Bind the listening socket.
///
/// Plain bind without address reuse: if the port is already taken the error
/// surfaces immediately so startup fails fast instead of sharing the port
/// with another instance.
pub async fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    TcpListener::bind(addr).await
}

/// Accept loop: serve connections until a shutdown signal arrives.
///
/// Each accepted connection runs in its own task; there is no shared mutable
/// state between requests, so nothing here needs locking.
pub async fn run(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let shutdown = signal::shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }
            () = &mut shutdown => {
                logger::log_shutdown();
                return Ok(());
            }
        }
    }
}
