//! Configuration management for the map asset server
//!
//! Settings come from built-in defaults, an optional `config.toml`, and
//! `MAPSTORE__*` environment variables, in increasing order of precedence.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Locations tried for the configuration file, without extension
const CONFIG_PATHS: [&str; 2] = [
    "map-asset-server/config", // Container layout: /app/map-asset-server/config.toml
    "config",                  // Local development: ./config.toml
];

const ENV_PREFIX: &str = "MAPSTORE";

/// Server configuration, fixed for the lifetime of the process
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address the HTTP listener binds to
    /// Environment: MAPSTORE__BIND_ADDRESS
    pub bind_address: String,

    /// HTTP port; 0 is rejected
    /// Environment: MAPSTORE__PORT
    pub port: u16,

    /// Directory holding one subdirectory per category
    /// Environment: MAPSTORE__DATA_ROOT
    pub data_root: String,

    /// Largest accepted request body in MB
    pub max_upload_size_mb: u64,

    /// `Cache-Control: max-age` sent with served files
    pub cache_max_age_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 5173,
            data_root: "./data".to_string(),
            max_upload_size_mb: 100,
            cache_max_age_secs: 3600,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the first config file found, with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::with_defaults()?;
        for path in CONFIG_PATHS {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from one explicit file, without environment overrides
    #[cfg(test)]
    fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = Self::with_defaults()?
            .add_source(File::with_name(path))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError>
    {
        let defaults = ServerConfig::default();
        Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("data_root", defaults.data_root)?
            .set_default("max_upload_size_mb", defaults.max_upload_size_mb as i64)?
            .set_default("cache_max_age_secs", defaults.cache_max_age_secs as i64)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.data_root.trim().is_empty() {
            return Err(ConfigError::Message("data_root cannot be empty".into()));
        }

        if self.max_upload_size_mb == 0 {
            return Err(ConfigError::Message(
                "max_upload_size_mb must be greater than 0".into(),
            ));
        }

        self.socket_addr()?;
        Ok(())
    }

    /// Bind address and port as a socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::Message(format!(
                    "invalid bind address {}:{}: {e}",
                    self.bind_address, self.port
                ))
            })
    }

    pub fn data_root_path(&self) -> PathBuf {
        PathBuf::from(&self.data_root)
    }

    /// Get maximum upload size in bytes
    pub fn max_upload_size_bytes(&self) -> usize {
        usize::try_from(self.max_upload_size_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }

    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.cache_max_age_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.socket_addr().unwrap().port(), 5173);
        assert_eq!(config.max_upload_size_bytes(), 100 * 1024 * 1024);
        assert_eq!(config.cache_max_age(), Duration::from_secs(3600));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            data_root: "  ".into(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            max_upload_size_mb: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            bind_address: "not an ip".into(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "port = 8088").unwrap();
        writeln!(file, "data_root = \"/srv/maps\"").unwrap();

        let config = ServerConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.port, 8088);
        assert_eq!(config.data_root_path(), PathBuf::from("/srv/maps"));
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.cache_max_age_secs, 3600);
    }

    #[test]
    fn test_load_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        std::fs::write(&path, "max_upload_size_mb = 0\n").unwrap();

        assert!(ServerConfig::load_from(path.to_str().unwrap()).is_err());
    }
}
