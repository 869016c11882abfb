//! Static file serving module
//!
//! Loads resolved filesystem entries and maps them to HTTP responses.

use std::path::Path;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::http::{self, mime};
use crate::logger;

/// Serve a regular file that already passed path resolution.
///
/// The file may vanish between resolution and read, which is still a 404;
/// any other read failure (permissions, I/O) is a 500.
pub async fn serve_file(path: &Path, is_head: bool) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
            http::build_file_response(content, content_type, is_head)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            http::build_500_response()
        }
    }
}

/// Serve a directory listing for a resolved directory.
pub async fn serve_listing(dir: &Path, display_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match super::listing::render(dir, display_path).await {
        Ok(html) => http::build_html_response(html, is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to list directory '{}': {e}", dir.display()));
            http::build_500_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_root(tag: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("devserve-static-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("temp dir creates");
        dir
    }

    #[tokio::test]
    async fn test_serve_file_sets_content_type() {
        let root = temp_root("serve");
        let path = root.join("style.css");
        std::fs::write(&path, "body {}").expect("file writes");

        let response = serve_file(&path, false).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("content-type").and_then(|v| v.to_str().ok()),
            Some("text/css")
        );
    }

    #[tokio::test]
    async fn test_serve_vanished_file_is_404() {
        let root = temp_root("vanished");
        let response = serve_file(&root.join("gone.txt"), false).await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_serve_listing_is_html() {
        let root = temp_root("listing");
        std::fs::write(root.join("a.txt"), "hello").expect("file writes");

        let response = serve_listing(&root, "/", false).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("content-type").and_then(|v| v.to_str().ok()),
            Some("text/html; charset=utf-8")
        );
    }

    #[tokio::test]
    async fn test_serve_listing_of_missing_dir_is_500() {
        let dir = std::env::temp_dir().join("devserve-static-gone");
        let _ = std::fs::remove_dir_all(&dir);
        let response = serve_listing(&dir, "/", false).await;
        assert_eq!(response.status(), 500);
    }
}
