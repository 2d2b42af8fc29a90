// Configuration module entry point
// Loads layered configuration and owns the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, RoutesConfig};

/// Default config file name (extension resolved by the `config` crate)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. Environment variables prefixed with `PRODUCTS_`
    /// override it, using `__` between nested keys (`PRODUCTS_SERVER__PORT`).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("PRODUCTS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "product-service/0.1")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("routes.strict_details", true)?
            .set_default("routes.health.enabled", true)?
            .set_default("routes.health.liveness_path", "/healthz")?
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
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.server.workers.is_none());
        assert!(cfg.routes.strict_details);
        assert!(cfg.routes.health.enabled);
        assert_eq!(cfg.routes.health.liveness_path, "/healthz");
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 9090;
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:9090".parse::<SocketAddr>().unwrap()
        );

        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
