//! Access log format module
//!
//! Supports multiple log formats:
//! - `combined` (Apache/Nginx combined format)
//! - `common` (Common Log Format - CLF)
//! - `json` (one JSON object per line)
//! - Custom patterns with variables

use chrono::Local;
use serde_json::json;

const CLF_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Access log entry for one served request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// Query string (without leading ?)
    pub query: Option<String>,
    /// HTTP version (1.0, 1.1, 2)
    pub http_version: String,
    /// Page identifier the request was routed to, if any
    pub page: Option<String>,
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
            page: None,
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
            "combined" => format!(
                "{} \"{}\" \"{}\"",
                self.format_common(),
                self.referer.as_deref().unwrap_or("-"),
                self.user_agent.as_deref().unwrap_or("-"),
            ),
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    fn request_uri(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.request_uri(), self.http_version)
    }

    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    fn format_json(&self) -> String {
        json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "query": self.query,
            "http_version": self.http_version,
            "page": self.page,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$remote_addr` - Client IP address
    /// - `$time_local` - Local time in Common Log Format
    /// - `$time_iso8601` - ISO 8601 timestamp
    /// - `$request` - Full request line ("METHOD /path HTTP/version")
    /// - `$request_method` - HTTP method
    /// - `$request_uri` - Request URI with query string
    /// - `$request_time` - Processing time in seconds (3 decimal places)
    /// - `$page` - Page identifier the request was routed to (`-` if none)
    /// - `$status` - Response status code
    /// - `$body_bytes_sent` - Response body size
    /// - `$http_referer` - Referer header
    /// - `$http_user_agent` - User-Agent header
    fn format_custom(&self, pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len() * 2);
        let mut rest = pattern;

        // Values are written as-is, so client-supplied text is never expanded
        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos + 1..];
            match VARIABLES.iter().find(|name| tail.starts_with(*name)) {
                Some(name) => {
                    out.push_str(&self.variable(name));
                    rest = &tail[name.len()..];
                }
                None => {
                    out.push('$');
                    rest = tail;
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn variable(&self, name: &str) -> String {
        let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
        match name {
            "remote_addr" => self.remote_addr.clone(),
            "time_local" => self.time.format(CLF_TIME).to_string(),
            "time_iso8601" => self.time.to_rfc3339(),
            "request_time" => {
                #[allow(clippy::cast_precision_loss)]
                let seconds = self.request_time_us as f64 / 1_000_000.0;
                format!("{seconds:.3}")
            }
            "request_method" => self.method.clone(),
            "request_uri" => self.request_uri(),
            "request" => self.request_line(),
            "page" => or_dash(&self.page),
            "status" => self.status.to_string(),
            "body_bytes_sent" => self.body_bytes.to_string(),
            "http_referer" => or_dash(&self.referer),
            "http_user_agent" => or_dash(&self.user_agent),
            _ => String::new(),
        }
    }
}

/// Custom format variable names; a name is listed before any of its prefixes
const VARIABLES: &[&str] = &[
    "remote_addr",
    "time_local",
    "time_iso8601",
    "request_time",
    "request_method",
    "request_uri",
    "request",
    "page",
    "status",
    "body_bytes_sent",
    "http_referer",
    "http_user_agent",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".to_string(),
            "GET".to_string(),
            "/essay".to_string(),
        );
        entry.query = Some("slug=documentation".to_string());
        entry.page = Some("/essay".to_string());
        entry.status = 200;
        entry.body_bytes = 1234;
        entry.referer = Some("https://example.com".to_string());
        entry.user_agent = Some("Mozilla/5.0".to_string());
        entry.request_time_us = 1_250_000;
        entry
    }

    #[test]
    fn test_format_combined() {
        let log = create_test_entry().format("combined");
        assert!(log.starts_with("192.168.1.1 - - ["));
        assert!(log.contains("\"GET /essay?slug=documentation HTTP/1.1\" 200 1234"));
        assert!(log.ends_with("\"https://example.com\" \"Mozilla/5.0\""));
    }

    #[test]
    fn test_format_common() {
        let log = create_test_entry().format("common");
        assert!(log.contains("\"GET /essay?slug=documentation HTTP/1.1\" 200 1234"));
        // Common format does not include referer/user-agent
        assert!(!log.contains("https://example.com"));
    }

    #[test]
    fn test_format_json() {
        let log = create_test_entry().format("json");
        let value: serde_json::Value = serde_json::from_str(&log).unwrap();
        assert_eq!(value["remote_addr"], "192.168.1.1");
        assert_eq!(value["page"], "/essay");
        assert_eq!(value["status"], 200);
        assert_eq!(value["body_bytes"], 1234);
    }

    #[test]
    fn test_format_json_escapes() {
        let mut entry = create_test_entry();
        entry.user_agent = Some("quote\"and\nnewline".to_string());
        entry.query = None;
        let value: serde_json::Value = serde_json::from_str(&entry.format("json")).unwrap();
        assert_eq!(value["user_agent"], "quote\"and\nnewline");
        assert!(value["query"].is_null());
    }

    #[test]
    fn test_format_custom() {
        let log = create_test_entry().format("$remote_addr $page $status $request_time $request");
        assert_eq!(
            log,
            "192.168.1.1 /essay 200 1.250 GET /essay?slug=documentation HTTP/1.1"
        );
    }

    #[test]
    fn test_format_custom_without_page() {
        let mut entry = create_test_entry();
        entry.page = None;
        assert_eq!(entry.format("[$page]"), "[-]");
    }

    #[test]
    fn test_format_custom_does_not_expand_request_text() {
        let mut entry = create_test_entry();
        entry.path = "/x$status".to_string();
        entry.query = Some("q=$page$remote_addr".to_string());
        entry.status = 404;
        assert_eq!(
            entry.format("$request_uri $status"),
            "/x$status?q=$page$remote_addr 404"
        );
    }

    #[test]
    fn test_format_custom_keeps_unknown_variables() {
        let entry = create_test_entry();
        assert_eq!(entry.format("$unknown $$status cost $5"), "$unknown $200 cost $5");
    }
}
