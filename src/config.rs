//! Configuration for scicalc.
//!
//! Configuration is loaded from `~/.config/scicalc/config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP service settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Interactive prompt settings.
    #[serde(default)]
    pub repl: ReplConfig,
}

/// Settings for `scicalc serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allow cross-origin requests from any origin.
    #[serde(default = "default_true")]
    pub cors: bool,
}

/// Settings for the interactive prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplConfig {
    /// Prompt shown before each line.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Persist line history between sessions.
    #[serde(default = "default_true")]
    pub history: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_prompt() -> String {
    "calc> ".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: default_true(),
        }
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            history: default_true(),
        }
    }
}

impl ServerConfig {
    /// The `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            tracing::debug!("No config directory available, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the default config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scicalc").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert!(config.server.cors);
        assert_eq!(config.repl.prompt, "calc> ");
        assert!(config.repl.history);
        assert_eq!(config.server.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
cors = false

[repl]
prompt = ">> "
history = false
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert!(!config.server.cors);
        assert_eq!(config.repl.prompt, ">> ");
        assert!(!config.repl.history);
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.repl.prompt, "calc> ");

        let empty = Config::parse("").unwrap();
        assert_eq!(empty.server.port, 5000);
    }

    #[test]
    fn test_parse_invalid_config() {
        assert!(Config::parse("[server]\nport = \"not a port\"\n").is_err());
        assert!(Config::parse("not toml at all [").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("scicalc-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[repl]\nprompt = \"? \"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.repl.prompt, "? ");

        std::fs::remove_file(&path).unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
