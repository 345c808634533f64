//! Tracing filter construction from the logging configuration.

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level and
/// any component-specific log levels, e.g. "info,clusterview::probe=debug".
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",clusterview::{}={}", component, level));
        }
    }

    filter_str
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use std::collections::HashMap;

    #[test]
    fn test_base_level_only() {
        let config = LoggingConfig::default();
        assert_eq!(build_filter_directives(&config), "info");
    }

    #[test]
    fn test_component_level_appended() {
        let mut component_levels = HashMap::new();
        component_levels.insert("probe".to_string(), "debug".to_string());

        let config = LoggingConfig {
            level: "warn".to_string(),
            component_levels: Some(component_levels),
            ..LoggingConfig::default()
        };

        assert_eq!(
            build_filter_directives(&config),
            "warn,clusterview::probe=debug"
        );
    }
}
