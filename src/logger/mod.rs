//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Subscriber setup from configuration
//! - Server lifecycle logging
//! - Access logging with multiple formats

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target used for access log lines, filterable with `RUST_LOG=access=off`
pub const ACCESS_TARGET: &str = "access";

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`. Calling this twice is
/// harmless: the first subscriber stays installed.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();

    if let Err(e) = installed {
        tracing::debug!("Keeping existing subscriber: {e}");
    }
}


pub fn log_server_start(addr: &SocketAddr, config: &Config, root: &std::path::Path) {
    tracing::info!(
        "Serving HTTP on {} port {} (http://{addr}/) ...",
        addr.ip(),
        addr.port()
    );
    tracing::info!("Document root: {}", root.display());
    match config.server.workers {
        Some(workers) => tracing::debug!("Worker threads: {workers}"),
        None => tracing::debug!("Worker threads: CPU cores"),
    }
    if let Some(max) = config.performance.max_connections {
        tracing::debug!("Max connections: {max}");
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("Accepted connection from {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    tracing::debug!("Failed to serve connection: {err}");
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

pub fn log_shutdown(reason: &str) {
    tracing::info!("{reason} received, exiting.");
}
