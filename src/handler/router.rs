//! Request dispatch module
//!
//! Entry point for HTTP request processing: method gate, path resolution,
//! dispatch to the static file responder, access logging, and header
//! finalization.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, Version};

use crate::config::AppState;
use crate::handler::path::{self, Resolution};
use crate::handler::static_files;
use crate::http::{self, headers};
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling.
///
/// Never fails: every error condition becomes a status response, and every
/// response passes through header finalization before it is returned.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let response = dispatch(&req, &state).await;
    let response = headers::finalize(response, &state.config.http.server_name);

    if state.config.logging.access_log {
        let entry = build_log_entry(&req, &response, peer_addr, &started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Gate the method, resolve the path, serve the result
async fn dispatch(
    req: &Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    match req.method() {
        &Method::GET | &Method::HEAD => {}
        &Method::OPTIONS => return http::build_options_response(),
        method => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            return http::build_405_response();
        }
    }
    let is_head = *req.method() == Method::HEAD;

    let raw_path = req.uri().path();
    match path::resolve(&state.root, raw_path, &state.config.files.index_files).await {
        Resolution::File(file) => static_files::serve_file(&file, is_head).await,
        Resolution::Directory(dir) => static_files::serve_listing(&dir, raw_path, is_head).await,
        Resolution::Redirect(location) => http::build_redirect_response(&location),
        Resolution::NotFound => http::build_404_response(),
        Resolution::BadRequest => http::build_400_response(),
    }
}

/// Collect request and response facts into an access log entry
fn build_log_entry(
    req: &Request<hyper::body::Incoming>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: &Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header_value(req, "referer");
    entry.user_agent = header_value(req, "user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn header_value(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}
