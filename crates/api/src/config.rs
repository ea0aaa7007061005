//! Application configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `HEART_RISK__*` environment variables.

use config::{Config, Environment, File};
use inference_engine::ModelConfig;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::rate_limit::RateLimitConfig;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/heart-risk.toml";

/// Environment variable that overrides the configuration file path
pub const CONFIG_PATH_ENV: &str = "HEART_RISK_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human readable text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Top level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load from the file named by `HEART_RISK_CONFIG` (or the default path)
    /// and the environment
    pub fn load() -> Result<Self, ApiError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load using `path` as the optional configuration file
    pub fn load_from(path: &str) -> Result<Self, ApiError> {
        let defaults = Config::try_from(&AppConfig::default()).map_err(config_error)?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("HEART_RISK")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("model.class_labels")
                    .try_parsing(true),
            )
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(config_error)
    }
}

fn config_error(e: config::ConfigError) -> ApiError {
    ApiError::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load_from("does/not/exist.toml").unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.model.positive_label, "Present");
        assert_eq!(config.model.class_labels, vec!["Absent", "Present"]);
        assert_eq!(config.rate_limit.burst_size, 5);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join("heart-risk-config-test.toml");
        std::fs::write(
            &path,
            r#"
[server]
bind_addr = "127.0.0.1:9000"

[model]
path = "/srv/models/rfc.onnx"
class_labels = ["No", "Yes"]
positive_label = "Yes"

[logging]
json = true
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.model.path, "/srv/models/rfc.onnx");
        assert_eq!(config.model.positive_label, "Yes");
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");

        let _ = std::fs::remove_file(&path);
    }
}
