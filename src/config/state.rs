// Application state module
// Holds the loaded configuration and the canonicalized serving root

use std::path::PathBuf;

use super::types::Config;

/// Runtime state shared by every connection
pub struct AppState {
    pub config: Config,
    /// Canonicalized serving root; every resolved path must stay inside it
    pub root: PathBuf,
}

impl AppState {
    /// Build runtime state from configuration.
    ///
    /// The serving root is canonicalized once at startup so per-request
    /// containment checks compare against a stable absolute path. Fails if
    /// the configured root does not exist or is not readable.
    pub fn new(config: Config) -> std::io::Result<Self> {
        let root = PathBuf::from(&config.files.root).canonicalize()?;
        Ok(Self { config, root })
    }
}
