//! Logger module
//!
//! Provides logging utilities for the product service including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//!
//! Everything goes through `tracing`; [`init`] installs the subscriber.

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Target used for access log lines, so they can be filtered separately
const ACCESS_TARGET: &str = "access";

/// Initialize the tracing subscriber with configuration
///
/// `RUST_LOG` takes precedence over `logging.level`.
/// Should be called once at application startup.
pub fn init(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("Product service started");
    tracing::info!("Listening on: http://{addr}");
    tracing::info!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    tracing::info!(
        strict_details = config.routes.strict_details,
        health = config.routes.health.enabled,
        max_body_size = config.http.max_body_size,
        max_connections = ?config.performance.max_connections,
        "Routing configuration"
    );
}

pub fn log_server_stop(addr: &SocketAddr) {
    tracing::info!("Shutdown requested, no longer accepting on {addr}");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}
