// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
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
    /// Default tracing filter, used when `RUST_LOG` is not set
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
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
    pub max_body_size: u64,
}

/// Routes configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Reject GET on `/details` and POST on the bare product path.
    /// When false, only the method decides between fetch and write.
    #[serde(default = "default_strict_details")]
    pub strict_details: bool,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
}

#[allow(clippy::missing_const_for_fn)]
fn default_strict_details() -> bool {
    true
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable the liveness endpoint
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            strict_details: default_strict_details(),
            health: HealthConfig::default(),
        }
    }
}
