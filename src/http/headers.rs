//! Response header finalization module
//!
//! Every response leaves the handler through [`finalize`], which front-loads
//! the no-cache directive and appends the standard trailing headers. This is
//! a plain function applied to the built response, not a hook on a handler
//! type, so any response source gets identical treatment.

use chrono::Utc;
use hyper::header::{HeaderValue, CACHE_CONTROL, DATE, SERVER};
use hyper::Response;

/// Cache-Control value attached to every response.
///
/// Forces clients to revalidate on every request; stale copies of files
/// being edited must never be replayed from the browser cache.
pub const NO_CACHE: &str = "no-cache, must-revalidate";

/// Finalize response headers.
///
/// Rebuilds the header map so `Cache-Control` is emitted ahead of the
/// headers the builder set, then appends `Date` and `Server`. Applied to
/// every response regardless of status code or content type.
pub fn finalize<B>(mut response: Response<B>, server_name: &str) -> Response<B> {
    let existing = std::mem::take(response.headers_mut());

    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    for (name, value) in &existing {
        headers.append(name, value.clone());
    }
    headers.insert(DATE, date_header_value());
    if let Ok(server) = HeaderValue::from_str(server_name) {
        headers.insert(SERVER, server);
    }

    response
}

/// Current time as an RFC 7231 IMF-fixdate, e.g. `Tue, 15 Nov 1994 08:12:31 GMT`
fn date_header_value() -> HeaderValue {
    let now = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
    HeaderValue::from_str(&now).unwrap_or_else(|_| HeaderValue::from_static("-"))
}
