//! Access log format module
//!
//! Supports three log formats:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format - CLF)
//! - `json` (JSON structured logging)
//!
//! Unknown format names fall back to `combined`.

use chrono::Local;

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, POST, etc.)
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
    /// Create a new access log entry with current timestamp
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

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "common" => self.format_common(),
            "json" => self.format_json(),
            _ => self.format_combined(),
        }
    }

    fn request_line(&self) -> String {
        format!(
            "{} {}{} HTTP/{}",
            self.method,
            self.path,
            self.query
                .as_ref()
                .map(|q| format!("?{q}"))
                .unwrap_or_default(),
            self.http_version,
        )
    }

    /// Apache/Nginx Combined Log Format
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent "$http_referer" "$http_user_agent"`
    fn format_combined(&self) -> String {
        format!(
            "{} \"{}\" \"{}\"",
            self.format_common(),
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// Common Log Format (CLF)
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
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

    /// JSON structured log format
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

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".to_string(),
            "POST".to_string(),
            "/products/42/details".to_string(),
        );
        entry.query = Some("trace=1".to_string());
        entry.http_version = "1.1".to_string();
        entry.status = 204;
        entry.body_bytes = 0;
        entry.referer = Some("https://example.com".to_string());
        entry.user_agent = Some("curl/8.0".to_string());
        entry.request_time_us = 1500;
        entry
    }

    #[test]
    fn test_format_combined() {
        let entry = create_test_entry();
        let log = entry.format("combined");
        assert!(log.starts_with("192.168.1.1 - - ["));
        assert!(log.contains("\"POST /products/42/details?trace=1 HTTP/1.1\""));
        assert!(log.contains("204 0"));
        assert!(log.contains("https://example.com"));
        assert!(log.ends_with("\"curl/8.0\""));
    }

    #[test]
    fn test_format_common() {
        let entry = create_test_entry();
        let log = entry.format("common");
        assert!(log.contains("POST /products/42/details?trace=1 HTTP/1.1"));
        assert!(log.ends_with("204 0"));
        // Common format does not include referer/user-agent
        assert!(!log.contains("https://example.com"));
    }

    #[test]
    fn test_format_json() {
        let mut entry = create_test_entry();
        entry.path = "/products/\"x\"".to_string();
        let log = entry.format("json");
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["remote_addr"], "192.168.1.1");
        assert_eq!(value["method"], "POST");
        assert_eq!(value["path"], "/products/\"x\"");
        assert_eq!(value["status"], 204);
        assert_eq!(value["request_time_us"], 1500);
    }

    #[test]
    fn test_missing_headers_render_dash() {
        let mut entry = create_test_entry();
        entry.referer = None;
        entry.user_agent = None;
        entry.query = None;
        let log = entry.format("combined");
        assert!(log.contains("\"POST /products/42/details HTTP/1.1\""));
        assert!(log.ends_with("\"-\" \"-\""));
    }

    #[test]
    fn test_unknown_format_falls_back() {
        let entry = create_test_entry();
        assert_eq!(entry.format("bogus"), entry.format("combined"));
    }
}
