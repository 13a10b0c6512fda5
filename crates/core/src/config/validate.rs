use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0 and the body limit is positive
/// - Storage bucket and notification topic are set
/// - The credentials file exists when one is configured
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.server.max_body_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "server.max_body_bytes must be greater than 0".to_string(),
        ));
    }

    if config.storage.bucket.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.bucket is required".to_string(),
        ));
    }

    if config.notifier.topic.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "notifier.topic cannot be empty".to_string(),
        ));
    }

    if let Some(path) = &config.google.credentials_path {
        if !path.exists() {
            return Err(ConfigError::ValidationError(format!(
                "google.credentials_path does not exist: {}",
                path.display()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;
    use std::path::PathBuf;

    fn base_config() -> Config {
        load_config_from_str(
            r#"
[storage]
bucket = "watermarks"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&base_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = base_config();
        config.server.port = 0;
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_empty_bucket_fails() {
        let mut config = base_config();
        config.storage.bucket = "  ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("storage.bucket"));
    }

    #[test]
    fn test_validate_empty_topic_fails() {
        let mut config = base_config();
        config.notifier.topic = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_missing_credentials_file_fails() {
        let mut config = base_config();
        config.google.credentials_path = Some(PathBuf::from("/nonexistent/key.json"));
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("credentials_path"));
    }
}
