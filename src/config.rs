use serde::Deserialize;
use std::net::SocketAddr;

use crate::data::{self, Tree};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    /// Optional override for the built-in record set. The schema is opaque
    /// to the server; records only need to be serializable.
    #[serde(default)]
    pub trees: Option<Vec<Tree>>,
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
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
}

impl Config {
    /// Load configuration from `config.toml` (if present), code defaults,
    /// and finally the `SERVE_PORT` environment variable.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?;

        // SERVE_PORT is resolved once at startup. Both "8888" and the
        // ":8888" form are accepted.
        if let Ok(port) = std::env::var("SERVE_PORT") {
            builder = builder.set_override("server.port", port.trim_start_matches(':'))?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Shared application state: resolved configuration plus the immutable
/// record set. Built once at startup and shared by `Arc`; nothing here is
/// mutated after construction, so no locking is needed.
pub struct AppState {
    pub config: Config,
    pub trees: Vec<Tree>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let trees = config
            .trees
            .clone()
            .unwrap_or_else(data::default_trees);

        Self {
            config: config.clone(),
            trees,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
            },
            trees: None,
        }
    }

    #[test]
    fn test_socket_addr_valid() {
        let cfg = base_config();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_socket_addr_invalid_host() {
        let mut cfg = base_config();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn test_state_uses_default_trees_when_unset() {
        let cfg = base_config();
        let state = AppState::new(&cfg);
        assert_eq!(state.trees, crate::data::default_trees());
    }

    #[test]
    fn test_state_uses_configured_trees() {
        let mut cfg = base_config();
        cfg.trees = Some(vec![Tree {
            name: "Willow".to_string(),
        }]);
        let state = AppState::new(&cfg);
        assert_eq!(state.trees.len(), 1);
        assert_eq!(state.trees[0].name, "Willow");
    }
}
