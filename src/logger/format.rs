//! Access log format module
//!
//! Supported formats:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format)
//! - `json` (JSON structured logging)

use chrono::Local;

/// Access log entry containing request and response facts
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method
    pub method: String,
    /// Request URI path
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Referer header
    pub referer: Option<String>,
    /// User-Agent header
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with the current timestamp
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            query: None,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Format the entry; unknown format names fall back to `combined`
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            _ => self.format_combined(),
        }
    }

    fn request_line(&self) -> String {
        let query = self
            .query
            .as_ref()
            .map(|q| format!("?{q}"))
            .unwrap_or_default();
        format!(
            "{} {}{} HTTP/{}",
            self.method, self.path, query, self.http_version
        )
    }

    /// Apache/Nginx combined log format:
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes "$referer" "$user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {} \"{}\" \"{}\"",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// Common Log Format: combined without referer and user agent
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y:%H:%M:%S %z"),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// JSON structured log format, one object per line
    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".to_string(),
            "GET".to_string(),
            "/assets/app.js".to_string(),
        );
        entry.query = Some("v=3".to_string());
        entry.status = 200;
        entry.body_bytes = 1234;
        entry.referer = Some("http://localhost:8080/".to_string());
        entry.user_agent = Some("Mozilla/5.0".to_string());
        entry.request_time_us = 1500;
        entry
    }

    #[test]
    fn test_format_combined() {
        let log = sample_entry().format("combined");
        assert!(log.contains("192.168.1.1"));
        assert!(log.contains("\"GET /assets/app.js?v=3 HTTP/1.1\""));
        assert!(log.contains("200 1234"));
        assert!(log.contains("\"Mozilla/5.0\""));
    }

    #[test]
    fn test_format_common_omits_headers() {
        let log = sample_entry().format("common");
        assert!(log.contains("GET /assets/app.js?v=3 HTTP/1.1"));
        assert!(log.contains("200 1234"));
        assert!(!log.contains("Mozilla/5.0"));
    }

    #[test]
    fn test_format_json() {
        let log = sample_entry().format("json");
        let parsed: serde_json::Value = serde_json::from_str(&log).expect("valid json");
        assert_eq!(parsed["remote_addr"], "192.168.1.1");
        assert_eq!(parsed["status"], 200);
        assert_eq!(parsed["body_bytes"], 1234);
        assert_eq!(parsed["query"], "v=3");
    }

    #[test]
    fn test_unknown_format_falls_back_to_combined() {
        let log = sample_entry().format("fancy");
        assert!(log.contains("\"GET /assets/app.js?v=3 HTTP/1.1\""));
    }

    #[test]
    fn test_missing_optionals_render_as_dashes() {
        let entry = AccessLogEntry::new("::1".to_string(), "GET".to_string(), "/".to_string());
        let log = entry.format("combined");
        assert!(log.ends_with("\"-\" \"-\""));
    }
}
