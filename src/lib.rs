//! devserve - a local development HTTP static file server
//!
//! Serves files from a root directory and attaches a no-cache directive to
//! every response, so browsers revalidate on each reload while files are
//! being edited.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
