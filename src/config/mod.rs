// Configuration module entry point
// Layered loading: defaults, optional TOML file, environment, command line

mod state;
mod types;

use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::{Result, ServerError};

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, RootConfig, ServerConfig};

/// Environment prefix, e.g. `COI_SERVE__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "COI_SERVE";

/// Values given on the command line, applied over every other source
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub directory: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from an optional file path plus command-line overrides
    ///
    /// A file named explicitly must exist; without one only defaults and the
    /// environment apply.
    pub fn load(config_path: Option<&str>, overrides: &Overrides) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("root.directory", ".")?
            .set_default("root.index_files", vec!["index.html", "index.htm"])?
            .set_default("http.server_name", concat!("coi-serve/", env!("CARGO_PKG_VERSION")))?
            .set_default("http.keep_alive", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .set_default("performance.connection_timeout", 0)?;

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .set_override_option("server.port", overrides.port.map(i64::from))?
            .set_override_option("server.host", overrides.bind.clone())?
            .set_override_option("root.directory", overrides.directory.clone())?
            .set_override_option("logging.level", overrides.log_level.clone())?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Resolve the listen address, accepting IP literals and host names
    pub fn get_socket_addr(&self) -> Result<SocketAddr> {
        let host = self.server.host.trim_start_matches('[').trim_end_matches(']');
        let address = format!("{host}:{}", self.server.port);

        (host, self.server.port)
            .to_socket_addrs()
            .and_then(|mut addrs| {
                addrs
                    .next()
                    .ok_or_else(|| std::io::Error::other("host resolved to no addresses"))
            })
            .map_err(|source| ServerError::InvalidAddress { address, source })
    }
}
