//! Request path resolution module
//!
//! Maps a raw request path onto the filesystem, rejecting anything that
//! would escape the serving root.

use std::path::{Component, Path, PathBuf};

use crate::logger;

/// Outcome of resolving a request path against the serving root
#[derive(Debug)]
pub enum Resolution {
    /// Regular file to serve
    File(PathBuf),
    /// Directory with no index file: render a listing
    Directory(PathBuf),
    /// Directory reached without a trailing slash: redirect to the slashed path
    Redirect(String),
    /// Path is missing, not a servable entry, or tried to escape the root
    NotFound,
    /// Path could not be decoded
    BadRequest,
}

/// Pre-resolution path rewriting (reserved for future extension)
///
/// Mapping extensionless request paths onto `.html` files is a candidate
/// behavior for this hook. A rewrite applies to the decoded path before
/// [`resolve`] touches the filesystem.
#[derive(Debug, Clone, Copy, Default)]
#[allow(dead_code)]
pub enum PathRewrite {
    /// Serve request paths exactly as sent
    #[default]
    Identity,
}

impl PathRewrite {
    #[allow(dead_code)]
    pub fn apply(self, path: &str) -> &str {
        match self {
            Self::Identity => path,
        }
    }
}

/// Decode a percent-encoded request path.
///
/// Returns `None` for truncated or non-hex escapes, embedded NUL bytes, or
/// decoded bytes that are not valid UTF-8. `+` is left untouched; it only
/// means space in query strings, not in paths.
pub fn percent_decode(path: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(path.len());
    let mut iter = path.bytes();
    while let Some(b) = iter.next() {
        if b == b'%' {
            let hi = iter.next().and_then(hex_value)?;
            let lo = iter.next().and_then(hex_value)?;
            bytes.push((hi << 4) | lo);
        } else {
            bytes.push(b);
        }
    }
    if bytes.contains(&0) {
        return None;
    }
    String::from_utf8(bytes).ok()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Resolve a request path against the canonicalized serving root.
///
/// Parent-directory segments are rejected before the filesystem is touched;
/// the canonical containment check afterwards is the authoritative guard
/// (it also covers symlinks pointing outside the root).
pub async fn resolve(root: &Path, raw_path: &str, index_files: &[String]) -> Resolution {
    let Some(decoded) = percent_decode(raw_path) else {
        return Resolution::BadRequest;
    };

    let relative = decoded.trim_start_matches('/');
    if Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        logger::log_warning(&format!(
            "Parent-directory segment rejected in request path: {raw_path}"
        ));
        return Resolution::NotFound;
    }

    let Ok(canonical) = tokio::fs::canonicalize(root.join(relative)).await else {
        return Resolution::NotFound;
    };
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {raw_path} -> {}",
            canonical.display()
        ));
        return Resolution::NotFound;
    }

    let Ok(metadata) = tokio::fs::metadata(&canonical).await else {
        return Resolution::NotFound;
    };

    if metadata.is_dir() {
        // Relative links inside a directory page only work when the
        // directory URL ends in a slash, so get the client there first.
        if !decoded.ends_with('/') {
            return Resolution::Redirect(format!("{raw_path}/"));
        }
        for index in index_files {
            let index_path = canonical.join(index);
            if tokio::fs::metadata(&index_path)
                .await
                .is_ok_and(|m| m.is_file())
            {
                return Resolution::File(index_path);
            }
        }
        return Resolution::Directory(canonical);
    }

    if metadata.is_file() {
        Resolution::File(canonical)
    } else {
        Resolution::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decode_plain() {
        assert_eq!(percent_decode("/a.txt"), Some("/a.txt".to_string()));
    }

    #[test]
    fn test_percent_decode_escapes() {
        assert_eq!(
            percent_decode("/with%20space.txt"),
            Some("/with space.txt".to_string())
        );
        assert_eq!(percent_decode("/%E2%82%AC"), Some("/\u{20ac}".to_string()));
    }

    #[test]
    fn test_percent_decode_plus_is_literal() {
        assert_eq!(percent_decode("/a+b.txt"), Some("/a+b.txt".to_string()));
    }

    #[test]
    fn test_percent_decode_rejects_bad_escapes() {
        assert_eq!(percent_decode("/bad%"), None);
        assert_eq!(percent_decode("/bad%2"), None);
        assert_eq!(percent_decode("/bad%zz"), None);
    }

    #[test]
    fn test_percent_decode_rejects_nul_and_invalid_utf8() {
        assert_eq!(percent_decode("/nul%00byte"), None);
        assert_eq!(percent_decode("/%ff%fe"), None);
    }

    fn temp_root(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("devserve-path-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("temp dir creates");
        dir.canonicalize().expect("temp dir canonicalizes")
    }

    fn index_files() -> Vec<String> {
        vec!["index.html".to_string(), "index.htm".to_string()]
    }

    #[tokio::test]
    async fn test_resolve_existing_file() {
        let root = temp_root("file");
        std::fs::write(root.join("a.txt"), "hello").expect("file writes");

        match resolve(&root, "/a.txt", &index_files()).await {
            Resolution::File(path) => assert_eq!(path, root.join("a.txt")),
            other => panic!("Expected File, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_nested_file() {
        let root = temp_root("nested");
        std::fs::create_dir_all(root.join("sub")).expect("subdir creates");
        std::fs::write(root.join("sub/b.css"), "body {}").expect("file writes");

        match resolve(&root, "/sub/b.css", &index_files()).await {
            Resolution::File(path) => assert_eq!(path, root.join("sub/b.css")),
            other => panic!("Expected File, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_missing_file() {
        let root = temp_root("missing");
        assert!(matches!(
            resolve(&root, "/nope.txt", &index_files()).await,
            Resolution::NotFound
        ));
    }

    #[tokio::test]
    async fn test_resolve_rejects_traversal() {
        let root = temp_root("traversal");
        assert!(matches!(
            resolve(&root, "/../etc/passwd", &index_files()).await,
            Resolution::NotFound
        ));
        assert!(matches!(
            resolve(&root, "/%2e%2e/etc/passwd", &index_files()).await,
            Resolution::NotFound
        ));
    }

    #[tokio::test]
    async fn test_resolve_directory_redirects_without_slash() {
        let root = temp_root("redirect");
        std::fs::create_dir_all(root.join("sub")).expect("subdir creates");

        match resolve(&root, "/sub", &index_files()).await {
            Resolution::Redirect(location) => assert_eq!(location, "/sub/"),
            other => panic!("Expected Redirect, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_directory_prefers_index_file() {
        let root = temp_root("index");
        std::fs::write(root.join("index.html"), "<html></html>").expect("index writes");

        match resolve(&root, "/", &index_files()).await {
            Resolution::File(path) => assert_eq!(path, root.join("index.html")),
            other => panic!("Expected File, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_directory_without_index_lists() {
        let root = temp_root("listing");
        std::fs::write(root.join("a.txt"), "hello").expect("file writes");

        match resolve(&root, "/", &index_files()).await {
            Resolution::Directory(path) => assert_eq!(path, root),
            other => panic!("Expected Directory, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_bad_escape_is_bad_request() {
        let root = temp_root("badreq");
        assert!(matches!(
            resolve(&root, "/bad%zz", &index_files()).await,
            Resolution::BadRequest
        ));
    }
}
