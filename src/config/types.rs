// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

use crate::routing::RouteEntry;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub content: ContentConfig,
    pub site: SiteConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Content service (GraphQL) configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// GraphQL endpoint receiving `{query, variables}` as a JSON POST
    pub endpoint: String,
    /// Request timeout for a single query, in seconds
    pub timeout_secs: u64,
}

/// Site presentation configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Directory served under `/static/`
    pub static_dir: String,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub service_worker: ServiceWorkerConfig,
}

/// Analytics reporting; disabled when no tracking id is set
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub tracking_id: Option<String>,
}

/// Background caching/offline worker registration
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceWorkerConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_worker_script")]
    pub script: String,
    #[serde(default = "default_worker_scope")]
    pub scope: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_worker_script() -> String {
    "/sw.js".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_worker_scope() -> String {
    "/".to_string()
}

impl Default for ServiceWorkerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            script: default_worker_script(),
            scope: default_worker_scope(),
        }
    }
}

/// Routes configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RoutesConfig {
    /// Extra route table entries, appended to the built-in ones
    #[serde(default)]
    pub entries: Vec<RouteEntry>,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}
