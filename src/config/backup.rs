//! Backup action configuration

use serde::{Deserialize, Serialize};

/// Credentials for the in-container `mysqldump` run against the primary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    pub user: String,
    pub password: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            user: "root".to_string(),
            password: String::new(),
        }
    }
}
