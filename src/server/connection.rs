// Connection handling module
// Serves a single accepted TCP connection

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve one connection in a spawned task.
///
/// Wraps the stream in `TokioIo`, enables HTTP/1.1 keep-alive, and hands
/// every request on the connection to the request handler. Requests hyper
/// cannot parse are answered with its built-in 400 and surface here as a
/// connection error, never as a crash.
pub fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { handler::handle_request(req, state, peer_addr).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
