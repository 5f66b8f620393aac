//! Configuration management for the bellq server.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with BELLQ_ prefix)
//! 3. .env files
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::tracing_config::LogFormat;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Shots used when a request omits `shots`.
    #[serde(default = "default_shots")]
    pub default_shots: u32,

    /// Largest shot count the simulator accepts per run.
    #[serde(default = "default_max_shots")]
    pub max_shots: u32,

    /// Widest circuit the simulator accepts.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Allowed CORS origins: `*` or a comma-separated list.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "console" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_bind_address() -> SocketAddr {
    ([127, 0, 0, 1], 5000).into()
}

fn default_shots() -> u32 {
    1024
}

fn default_max_shots() -> u32 {
    bellq_adapter_sim::DEFAULT_MAX_SHOTS
}

fn default_max_qubits() -> u32 {
    bellq_adapter_sim::DEFAULT_MAX_QUBITS
}

fn default_cors_origins() -> String {
    "*".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: default_bind_address(),
            default_shots: default_shots(),
            max_shots: default_max_shots(),
            max_qubits: default_max_qubits(),
            cors_origins: default_cors_origins(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `BELLQ_*` overrides from the process environment.
    pub fn merge_env(&mut self) -> Result<(), ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn merge_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("BELLQ_BIND") {
            self.bind_address = parse_var("BELLQ_BIND", &bind)?;
        }
        if let Some(shots) = lookup("BELLQ_DEFAULT_SHOTS") {
            self.default_shots = parse_var("BELLQ_DEFAULT_SHOTS", &shots)?;
        }
        if let Some(max) = lookup("BELLQ_MAX_SHOTS") {
            self.max_shots = parse_var("BELLQ_MAX_SHOTS", &max)?;
        }
        if let Some(max) = lookup("BELLQ_MAX_QUBITS") {
            self.max_qubits = parse_var("BELLQ_MAX_QUBITS", &max)?;
        }
        if let Some(origins) = lookup("BELLQ_CORS_ORIGINS") {
            self.cors_origins = origins;
        }
        if let Some(level) = lookup("BELLQ_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BELLQ_LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }

    /// Load configuration with full precedence chain.
    ///
    /// Reads `.env` if present, then the YAML file (when given), then applies
    /// environment overrides and validates the result.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_shots == 0 {
            return Err(ConfigError::Invalid(
                "default_shots must be at least 1".to_string(),
            ));
        }
        if self.max_shots == 0 {
            return Err(ConfigError::Invalid(
                "max_shots must be at least 1".to_string(),
            ));
        }
        if self.default_shots > self.max_shots {
            return Err(ConfigError::Invalid(format!(
                "default_shots ({}) exceeds max_shots ({})",
                self.default_shots, self.max_shots
            )));
        }
        if self.max_qubits < 2 {
            return Err(ConfigError::Invalid(format!(
                "max_qubits must be at least 2, got {}",
                self.max_qubits
            )));
        }
        self.log_format()?;
        self.cors_origin_list()?;
        Ok(())
    }

    /// Parsed CORS origins; `None` allows any origin.
    ///
    /// `*` is only accepted on its own. A list must hold at least one origin
    /// and every entry must be a valid header value.
    pub fn cors_origin_list(&self) -> Result<Option<Vec<HeaderValue>>, ConfigError> {
        let origins = self.cors_origins.trim();
        if origins == "*" {
            return Ok(None);
        }

        let list = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| {
                if o == "*" {
                    return Err(ConfigError::Invalid(
                        "cors_origins: '*' cannot be combined with other origins".to_string(),
                    ));
                }
                HeaderValue::from_str(o).map_err(|e| {
                    ConfigError::Invalid(format!("cors_origins: invalid origin {o:?}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if list.is_empty() {
            return Err(ConfigError::Invalid(
                "cors_origins must be '*' or a comma-separated list of origins".to_string(),
            ));
        }
        Ok(Some(list))
    }

    /// The configured log format.
    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        self.logging.format.parse().map_err(ConfigError::Invalid)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("{key}={value:?}: {e}")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(String, #[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:5000");
        assert_eq!(config.default_shots, 1024);
        assert_eq!(config.max_shots, 1_000_000);
        assert_eq!(config.max_qubits, 20);
        assert_eq!(config.cors_origins, "*");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r"
bind_address: 0.0.0.0:8080
default_shots: 512
logging:
  format: json
";
        let config = ServerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.default_shots, 512);
        assert_eq!(config.max_shots, 1_000_000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.log_format().unwrap(), LogFormat::Json);
    }

    #[test]
    fn test_bad_yaml_is_parse_error() {
        let err = ServerConfig::from_yaml("default_shots: lots").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ServerConfig::from_file("/nonexistent/bellq.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServerConfig::default();
        config
            .merge_vars(vars(&[
                ("BELLQ_BIND", "0.0.0.0:9000"),
                ("BELLQ_DEFAULT_SHOTS", " 2048 "),
                ("BELLQ_CORS_ORIGINS", "http://localhost:3000"),
                ("BELLQ_LOG_LEVEL", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:9000");
        assert_eq!(config.default_shots, 2048);
        assert_eq!(config.cors_origins, "http://localhost:3000");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.max_shots, 1_000_000);
    }

    #[test]
    fn test_unparsable_env_override() {
        let mut config = ServerConfig::default();
        let err = config
            .merge_vars(vars(&[("BELLQ_MAX_SHOTS", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("BELLQ_MAX_SHOTS"));
    }

    #[test]
    fn test_validate_rejects_bad_limits() {
        let config = ServerConfig {
            default_shots: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            default_shots: 2000,
            max_shots: 1000,
            ..ServerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds max_shots"));

        let config = ServerConfig {
            max_qubits: 1,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_origin_list() {
        assert_eq!(ServerConfig::default().cors_origin_list().unwrap(), None);

        let config = ServerConfig {
            cors_origins: "http://localhost:3000, https://app.example".to_string(),
            ..ServerConfig::default()
        };
        let list = config.cors_origin_list().unwrap().unwrap();
        assert_eq!(list, ["http://localhost:3000", "https://app.example"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_wildcard_inside_origin_list() {
        let config = ServerConfig {
            cors_origins: "http://localhost:3000, *".to_string(),
            ..ServerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("'*'"));
    }

    #[test]
    fn test_validate_rejects_unparsable_origin() {
        let config = ServerConfig {
            cors_origins: "http://localhost:3000,http://bad\u{7f}host".to_string(),
            ..ServerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("invalid origin"));

        let config = ServerConfig {
            cors_origins: " , ".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_format() {
        let mut config = ServerConfig::default();
        config.logging.format = "xml".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
