//! HTTP protocol layer module
//!
//! Response building, MIME detection, and header finalization, decoupled
//! from the filesystem logic in the handler.

pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_404_response, build_405_response, build_500_response,
    build_file_response, build_html_response, build_options_response, build_redirect_response,
};
