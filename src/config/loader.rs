//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::MintConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<MintConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<MintConfig, ConfigError> {
    let config: MintConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the file when one is given, otherwise fall back to defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<MintConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(MintConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("cryptomania-config-{}.toml", std::process::id()));
        fs::write(
            &path,
            r#"
            [network]
            rpc_url = "https://goerli.example.org"
            confirmations = 2

            [polling]
            interval_secs = 3
            "#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.network.confirmations, 2);
        assert_eq!(config.polling.interval_secs, 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = parse_config("[network\nrpc_url = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = parse_config("[polling]\ninterval_secs = 0\n[network]\nrpc_timeout_secs = 0").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("network.rpc_timeout_secs"));
        assert!(message.contains("polling.interval_secs"));
    }

    #[test]
    fn test_no_path_uses_defaults() {
        let config = load_or_default(None).unwrap();
        assert_eq!(config.polling.interval_secs, 5);
    }
}
