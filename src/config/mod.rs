//! Configuration module for clusterview
//!
//! Provides layered configuration loading from files, environment variables,
//! and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`CLUSTERVIEW_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use clusterview::config::ClusterviewConfig;
//!
//! // Load defaults
//! let config = ClusterviewConfig::default();
//! assert_eq!(config.server.port, 5000);
//!
//! // Parse from TOML
//! let toml = r#"
//! [server]
//! port = 9000
//! "#;
//! let config: ClusterviewConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! ```

pub mod backup;
pub mod containers;
pub mod database;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod server;

pub use backup::BackupConfig;
pub use containers::ContainersConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use monitor::MonitorConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the clusterview server.
///
/// Aggregates the HTTP server settings, the three data-plane endpoints,
/// container names, monitor cache/timeouts, backup credentials, and logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterviewConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// ProxySQL admin interface
    pub router: DatabaseConfig,
    /// Write-serving MySQL instance
    pub primary: DatabaseConfig,
    /// Read-only replicated follower
    pub replica: DatabaseConfig,
    /// Container names for the three services
    pub containers: ContainersConfig,
    /// Snapshot cache and probe timeouts
    pub monitor: MonitorConfig,
    /// Backup action credentials
    pub backup: BackupConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for ClusterviewConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            router: DatabaseConfig::router_default(),
            primary: DatabaseConfig::primary_default(),
            replica: DatabaseConfig::replica_default(),
            containers: ContainersConfig::default(),
            monitor: MonitorConfig::default(),
            backup: BackupConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ClusterviewConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports CLUSTERVIEW_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("CLUSTERVIEW_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("CLUSTERVIEW_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("CLUSTERVIEW_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CLUSTERVIEW_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        // Credentials are env-only deployments' preferred path
        if let Ok(password) = std::env::var("CLUSTERVIEW_ROUTER_PASSWORD") {
            self.router.password = password;
        }
        if let Ok(password) = std::env::var("CLUSTERVIEW_DB_PASSWORD") {
            self.primary.password = password.clone();
            self.replica.password = password.clone();
            self.backup.password = password;
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        for (field, endpoint) in [
            ("router", &self.router),
            ("primary", &self.primary),
            ("replica", &self.replica),
        ] {
            if endpoint.host.is_empty() {
                return Err(ConfigError::Validation {
                    field: format!("{field}.host"),
                    message: "host cannot be empty".to_string(),
                });
            }
        }

        for (field, name) in [
            ("containers.router", &self.containers.router),
            ("containers.primary", &self.containers.primary),
            ("containers.replica", &self.containers.replica),
        ] {
            if name.is_empty() {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    message: "container name cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_config_defaults() {
        let config = ClusterviewConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.router.port, 6032);
        assert_eq!(config.primary.host, "mysql-primary");
        assert_eq!(config.monitor.cache_ttl_seconds, 5);
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [server]
        port = 9000
        "#;

        let config: ClusterviewConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0"); // Default
    }

    #[test]
    fn test_config_parse_full_toml() {
        let toml = include_str!("../../clusterview.example.toml");
        let config: ClusterviewConfig = toml::from_str(toml).unwrap();
        assert!(config.server.port > 0);
        assert_eq!(config.containers.router, "proxysql");
    }

    #[test]
    fn test_config_parse_endpoint_sections() {
        let toml = r#"
        [router]
        host = "10.0.0.1"
        port = 6032
        user = "radmin"

        [replica]
        host = "10.0.0.3"
        "#;

        let config: ClusterviewConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.router.host, "10.0.0.1");
        assert_eq!(config.router.user, "radmin");
        assert_eq!(config.replica.host, "10.0.0.3");
        // Untouched section keeps role defaults
        assert_eq!(config.primary.host, "mysql-primary");
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server]\nport = 8080").unwrap();

        let config = ClusterviewConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = ClusterviewConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = ClusterviewConfig::load(None).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_config_env_override_port() {
        let _guard = test_env::LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("CLUSTERVIEW_PORT", "9999");
        let config = ClusterviewConfig::default().with_env_overrides();
        std::env::remove_var("CLUSTERVIEW_PORT");

        assert_eq!(config.server.port, 9999);
    }

    #[test]
    fn test_config_env_invalid_value_ignored() {
        let _guard = test_env::LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("CLUSTERVIEW_PORT", "not-a-number");
        let config = ClusterviewConfig::default().with_env_overrides();
        std::env::remove_var("CLUSTERVIEW_PORT");

        // Should keep default, not crash
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_config_env_override_db_password() {
        let _guard = test_env::LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("CLUSTERVIEW_DB_PASSWORD", "secret");
        let config = ClusterviewConfig::default().with_env_overrides();
        std::env::remove_var("CLUSTERVIEW_DB_PASSWORD");

        assert_eq!(config.primary.password, "secret");
        assert_eq!(config.replica.password, "secret");
        assert_eq!(config.backup.password, "secret");
        assert_eq!(config.router.password, "");
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = ClusterviewConfig::default();
        config.server.port = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "server.port"
        ));
    }

    #[test]
    fn test_config_validation_empty_host() {
        let mut config = ClusterviewConfig::default();
        config.replica.host = String::new();

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "replica.host"
        ));
    }

    #[test]
    fn test_config_validation_empty_container_name() {
        let mut config = ClusterviewConfig::default();
        config.containers.primary = String::new();

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "containers.primary"
        ));
    }
}
