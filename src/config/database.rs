//! Connection parameters for one data-plane endpoint.

use serde::{Deserialize, Serialize};

/// Connection parameters for a SQL endpoint (router admin interface or a
/// MySQL server). Passwords come from the config file or a
/// `CLUSTERVIEW_*_PASSWORD` env override and are never logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Defaults for the ProxySQL admin interface.
    pub fn router_default() -> Self {
        Self {
            host: "proxysql".to_string(),
            port: 6032,
            user: "admin".to_string(),
            password: String::new(),
        }
    }

    pub fn primary_default() -> Self {
        Self {
            host: "mysql-primary".to_string(),
            ..Self::default()
        }
    }

    pub fn replica_default() -> Self {
        Self {
            host: "mysql-replica".to_string(),
            ..Self::default()
        }
    }
}
