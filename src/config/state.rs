// Application state module
// Read-only state shared by every connection

use std::path::PathBuf;

use super::types::Config;
use crate::error::{Result, ServerError};

/// Application state
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Canonical serving root, resolved once at startup
    pub root: PathBuf,
}

impl AppState {
    /// Create `AppState`, failing when the root directory is unusable
    pub fn new(config: Config) -> Result<Self> {
        let configured = PathBuf::from(&config.root.directory);
        let root = configured
            .canonicalize()
            .map_err(|source| ServerError::RootDirectory {
                path: configured.clone(),
                source,
            })?;

        if !root.is_dir() {
            return Err(ServerError::RootDirectory {
                path: configured,
                source: std::io::Error::other("not a directory"),
            });
        }

        Ok(Self { config, root })
    }
}
