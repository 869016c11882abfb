//! Directory listing module
//!
//! Renders an HTML index for directories without an index file: entries
//! sorted by name, directories suffixed with a slash.

use std::io;
use std::path::Path;

/// Render an HTML listing of `dir`. `display_path` is the request path shown
/// in the page title.
pub async fn render(dir: &Path, display_path: &str) -> io::Result<String> {
    let mut entries = Vec::new();
    let mut reader = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();

    let title = format!("Directory listing for {display_path}");
    let mut html = String::with_capacity(512);
    html.push_str("<!DOCTYPE HTML>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n<hr>\n<ul>\n", escape_html(&title)));
    for name in &entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            encode_href(name),
            escape_html(name)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

/// Escape text for inclusion in HTML
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Percent-encode a file name for use in an href
fn encode_href(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for b in name.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(char::from(b));
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>&\"quoted\"</b>"),
            "&lt;b&gt;&amp;&quot;quoted&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_encode_href() {
        assert_eq!(encode_href("a b.txt"), "a%20b.txt");
        assert_eq!(encode_href("sub/"), "sub/");
        assert_eq!(encode_href("plain-name_1.html"), "plain-name_1.html");
    }

    fn temp_root(tag: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("devserve-listing-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("temp dir creates");
        dir
    }

    #[tokio::test]
    async fn test_render_lists_sorted_entries() {
        let root = temp_root("render");
        std::fs::write(root.join("zeta.txt"), "z").expect("file writes");
        std::fs::write(root.join("alpha.txt"), "a").expect("file writes");
        std::fs::create_dir_all(root.join("sub")).expect("subdir creates");

        let html = render(&root, "/").await.expect("listing renders");
        assert!(html.contains("Directory listing for /"));

        let alpha = html.find("alpha.txt").expect("alpha listed");
        let sub = html.find("sub/").expect("directory listed with slash");
        let zeta = html.find("zeta.txt").expect("zeta listed");
        assert!(alpha < sub && sub < zeta);
    }

    #[tokio::test]
    async fn test_render_escapes_names() {
        let root = temp_root("escape");
        std::fs::write(root.join("a&b.txt"), "x").expect("file writes");

        let html = render(&root, "/").await.expect("listing renders");
        assert!(html.contains("a&amp;b.txt"));
        assert!(html.contains("href=\"a%26b.txt\""));
    }

    #[tokio::test]
    async fn test_render_missing_dir_errors() {
        let dir = std::env::temp_dir().join("devserve-listing-gone");
        let _ = std::fs::remove_dir_all(&dir);
        assert!(render(&dir, "/").await.is_err());
    }
}
