// Configuration module entry point
// Layered configuration: coded defaults, optional config file, environment

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, FilesConfig, HttpConfig, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from `config.toml` (if present), `SERVER_`-prefixed
    /// environment variables, and coded defaults.
    ///
    /// With no file and no environment overrides this yields the stock
    /// development-server behavior: all interfaces, port 8080, serving the
    /// current working directory.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("files.root", ".")?
            .set_default("files.index_files", vec!["index.html", "index.htm"])?
            .set_default("http.server_name", "devserve/0.1")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid listen address: {e}"))
    }
}

#[cfg(test)]
impl Config {
    /// Coded defaults only, independent of config files and environment.
    pub fn with_defaults() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: None,
            },
            files: FilesConfig {
                root: ".".to_string(),
                index_files: vec!["index.html".to_string(), "index.htm".to_string()],
            },
            http: HttpConfig {
                server_name: "devserve/0.1".to_string(),
            },
            logging: LoggingConfig {
                access_log: false,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
        }
    }
}
