#![deny(unsafe_code)]

//! Configuration loading, validation, and tool filtering for DevForge.
//!
//! Loads TOML configuration files and validates them. Provides the
//! [`AppConfig`] type as the central configuration structure, and the
//! [`filter`] module that decides which tools the registry exposes.

/// Allow/deny filtering of tool ids.
pub mod filter;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use filter::{FilterDecision, ToolFilter};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP API server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Which tools are exposed.
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Configuration for the HTTP API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the API server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Port the API server binds to.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Browser origins allowed by CORS. `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            listen_port: default_listen_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_listen_port() -> u16 {
    5080
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:5174".to_string(),
    ]
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Tool enable/disable lists.
///
/// ## TOML Example
///
/// ```toml
/// [tools]
/// enabled = ["json.formatter", "text.diff"]
/// disabled = ["generation.uuid"]
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Allow-list of tool ids. When absent every tool may be enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<Vec<String>>,

    /// Deny-list of tool ids. Always applied, and wins over `enabled`.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl ToolsConfig {
    /// Build the [`ToolFilter`] described by this section.
    pub fn filter(&self) -> ToolFilter {
        ToolFilter::new(self.enabled.as_ref(), &self.disabled)
    }
}

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        debug!(path = %path.display(), bytes = content.len(), "Read config file");
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.listen_port == 0 {
            return Err(ConfigError::Validation(
                "server.listen_port must be non-zero".to_string(),
            ));
        }
        if self.server.listen_addr.is_empty() {
            return Err(ConfigError::Validation(
                "server.listen_addr must not be empty".to_string(),
            ));
        }
        for (i, origin) in self.server.cors_origins.iter().enumerate() {
            if origin.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "server.cors_origins[{i}] must not be empty"
                )));
            }
        }

        let level = self.logging.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {:?}, got {:?}",
                VALID_LOG_LEVELS, self.logging.level
            )));
        }

        if let Some(enabled) = &self.tools.enabled {
            for (i, id) in enabled.iter().enumerate() {
                if id.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "tools.enabled[{i}] must not be empty"
                    )));
                }
            }
        }
        for (i, id) in self.tools.disabled.iter().enumerate() {
            if id.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "tools.disabled[{i}] must not be empty"
                )));
            }
        }

        Ok(())
    }

    /// The socket address string the API server should bind to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.listen_addr, self.server.listen_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.listen_addr, "127.0.0.1");
        assert_eq!(config.server.listen_port, 5080);
        assert_eq!(config.server.cors_origins.len(), 2);
        assert_eq!(config.logging.level, "info");
        assert!(config.tools.enabled.is_none());
        assert!(config.tools.disabled.is_empty());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.server.listen_port, 5080);
        assert_eq!(config.bind_addr(), "127.0.0.1:5080");
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
            [server]
            listen_addr = "0.0.0.0"
            listen_port = 8080
            cors_origins = ["*"]

            [logging]
            level = "debug"

            [tools]
            enabled = ["json.formatter", "text.diff"]
            disabled = ["text.diff"]
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0");
        assert_eq!(config.server.listen_port, 8080);
        assert_eq!(config.server.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.tools.enabled,
            Some(vec!["json.formatter".to_string(), "text.diff".to_string()])
        );
        assert_eq!(config.tools.disabled, vec!["text.diff".to_string()]);
    }

    #[test]
    fn test_tools_filter_from_config() {
        let toml = r#"
            [tools]
            enabled = ["a", "B"]
            disabled = ["b"]
        "#;
        let config = AppConfig::parse(toml).unwrap();
        let filter = config.tools.filter();
        assert!(filter.is_enabled("a"));
        assert!(!filter.is_enabled("b"));
        assert!(!filter.is_enabled("c"));
    }

    #[test]
    fn test_tools_filter_without_allow_list() {
        let toml = r#"
            [tools]
            disabled = ["b"]
        "#;
        let config = AppConfig::parse(toml).unwrap();
        let filter = config.tools.filter();
        assert!(filter.is_enabled("a"));
        assert!(!filter.is_enabled("b"));
        assert!(filter.is_enabled("c"));
    }

    #[test]
    fn test_validation_rejects_zero_port() {
        let toml = r#"
            [server]
            listen_port = 0
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_empty_addr() {
        let toml = r#"
            [server]
            listen_addr = ""
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let toml = r#"
            [logging]
            level = "loud"
        "#;
        let err = AppConfig::parse(toml).unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_validation_accepts_uppercase_log_level() {
        let toml = r#"
            [logging]
            level = "WARN"
        "#;
        assert!(AppConfig::parse(toml).is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_tool_id() {
        let toml = r#"
            [tools]
            disabled = ["crypto.hash", " "]
        "#;
        let err = AppConfig::parse(toml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: tools.disabled[1] must not be empty"
        );

        let toml = r#"
            [tools]
            enabled = [""]
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_validation_rejects_empty_origin() {
        let toml = r#"
            [server]
            cors_origins = [""]
        "#;
        assert!(AppConfig::parse(toml).is_err());
    }

    #[test]
    fn test_serialize_roundtrip_keeps_missing_allow_list() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(!text.contains("enabled"));
        let parsed = AppConfig::parse(&text).unwrap();
        assert!(parsed.tools.enabled.is_none());
    }

    // ── Async file-based loading ──────────────────────────────────────

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("devforge.toml");
        tokio::fs::write(
            &path,
            b"[server]\nlisten_port = 4242\nlisten_addr = \"0.0.0.0\"\n",
        )
        .await
        .unwrap();

        let config = AppConfig::load(&path).await.unwrap();
        assert_eq!(config.server.listen_port, 4242);
        assert_eq!(config.server.listen_addr, "0.0.0.0");
    }

    #[tokio::test]
    async fn test_load_nonexistent_file() {
        let result = AppConfig::load(Path::new("/nonexistent/file.toml")).await;
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[tokio::test]
    async fn test_load_invalid_toml_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        tokio::fs::write(&path, b"not valid toml [[[").await.unwrap();

        let result = AppConfig::load(&path).await;
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("bad value".to_string());
        assert_eq!(err.to_string(), "validation error: bad value");
    }
}
