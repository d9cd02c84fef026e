//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{LogOutput, LoggingConfig, PewterConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &PewterConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_adapters(config)?;
    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File {
        match &logging.file_path {
            None => return Err(ConfigError::missing_field("logging.file_path")),
            Some(path) if path.file_name().is_none() => {
                return Err(ConfigError::validation(format!(
                    "Log file path has no file name: {}",
                    path.display()
                )));
            }
            Some(_) => {}
        }

        if logging.max_files == 0 {
            return Err(ConfigError::validation("max_files must be greater than 0"));
        }
    }

    for module in logging.filters.keys() {
        if module.is_empty() || module.contains(char::is_whitespace) || module.contains('=') {
            return Err(ConfigError::validation(format!(
                "Invalid log filter target: {module:?}"
            )));
        }
    }

    Ok(())
}

/// Every adapter section must be a table.
fn validate_adapters(config: &PewterConfig) -> ConfigResult<()> {
    for (name, section) in &config.adapters {
        if name.is_empty() {
            return Err(ConfigError::validation("Adapter name cannot be empty"));
        }
        if !section.is_object() {
            return Err(ConfigError::AdapterConfig {
                adapter: name.clone(),
                reason: "section must be a table".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::config::LogLevel;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&PewterConfig::default()).is_ok());
    }

    #[test]
    fn test_file_output_requires_path() {
        let mut config = PewterConfig::default();
        config.logging.output = LogOutput::File;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField { .. })
        ));

        config.logging.file_path = Some("logs/pewter.log".into());
        assert!(validate_config(&config).is_ok());

        config.logging.max_files = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_invalid_filter_target() {
        let mut config = PewterConfig::default();
        config
            .logging
            .filters
            .insert("pewter adapter".into(), LogLevel::Debug);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_adapter_section_must_be_table() {
        let mut config = PewterConfig::default();
        config.adapters.insert("slack".into(), json!("hubot"));
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::AdapterConfig { .. })
        ));
    }
}
