//! Logger module
//!
//! Logging for the HTTP server:
//! - Server lifecycle logging
//! - Access logging in combined, common, or JSON format
//! - Error and warning logging
//! - Optional file-based output

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

use crate::config::Config;

/// Initialize the logger with configuration.
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to the info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to the error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Single startup line announcing the bound address
pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    write_info(&format!("Serving HTTP on http://{addr} from {}", root.display()));
}

/// Log a formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    write_error(&format!("[ERROR] Failed to bind {addr}: {err}"));
}

pub fn log_shutdown() {
    write_info("Shutdown signal received, stopping server");
}
