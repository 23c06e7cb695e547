// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{AnalyticsConfig, Config, ContentConfig, ServiceWorkerConfig, SiteConfig};

/// Default content service endpoint
pub const DEFAULT_CONTENT_ENDPOINT: &str = "http://127.0.0.1:4000/graphql";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SITE").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.show_headers", false)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "site-server")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("content.endpoint", DEFAULT_CONTENT_ENDPOINT)?
            .set_default("content.timeout_secs", 10)?
            .set_default("site.static_dir", "static")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("does-not-exist/config").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.content.timeout_secs, 10);
        assert_eq!(cfg.site.static_dir, "static");
        assert!(cfg.site.analytics.tracking_id.is_none());
        assert!(!cfg.site.service_worker.enabled);
        assert_eq!(cfg.site.service_worker.script, "/sw.js");
        assert!(cfg.routes.entries.is_empty());
        assert!(cfg.routes.health.enabled);
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("does-not-exist/config").unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }
}
