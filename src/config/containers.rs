//! Container name mapping for the three cluster services.

use serde::{Deserialize, Serialize};

/// Well-known container names for the router, primary, and replica. The API
/// accepts the role names and maps them to these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainersConfig {
    pub router: String,
    pub primary: String,
    pub replica: String,
}

impl Default for ContainersConfig {
    fn default() -> Self {
        Self {
            router: "proxysql".to_string(),
            primary: "mysql-primary".to_string(),
            replica: "mysql-replica".to_string(),
        }
    }
}

impl ContainersConfig {
    /// Container names in a fixed display order.
    pub fn names(&self) -> [&str; 3] {
        [&self.router, &self.primary, &self.replica]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_container_names() {
        let config = ContainersConfig::default();
        assert_eq!(
            config.names(),
            ["proxysql", "mysql-primary", "mysql-replica"]
        );
    }
}
