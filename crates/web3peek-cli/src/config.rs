//! CLI configuration management.
//!
//! Stored as TOML at `~/.web3peek/config.toml`. Flags and environment
//! variables override what the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use web3peek_client::{ClientConfig, DEFAULT_RPC_URL, DEFAULT_TIMEOUT};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default RPC endpoint
    pub rpc_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e))?;
        Ok(())
    }

    /// Get configuration file path.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".web3peek").join("config.toml"))
    }

    /// Client settings after applying overrides: flag/env first, then file.
    pub fn client_config(&self, rpc: Option<&str>, timeout_secs: Option<u64>) -> ClientConfig {
        let url = rpc.unwrap_or(&self.rpc_url);
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(self.timeout_secs));
        ClientConfig::new(url).with_timeout(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = CliConfig::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = CliConfig {
            rpc_url: "http://test:8545".to_string(),
            timeout_secs: 5,
        };
        config.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("http://test:8545"));
        assert_eq!(CliConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "rpc_url = \"http://node:8545\"\n").unwrap();

        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.rpc_url, "http://node:8545");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "rpc_url = [").unwrap();

        let err = CliConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig {
            rpc_url: "http://file:8545".to_string(),
            timeout_secs: 10,
        };

        let from_file = config.client_config(None, None);
        assert_eq!(from_file.url, "http://file:8545");
        assert_eq!(from_file.timeout, Duration::from_secs(10));

        let from_flag = config.client_config(Some("http://flag:8545"), Some(3));
        assert_eq!(from_flag.url, "http://flag:8545");
        assert_eq!(from_flag.timeout, Duration::from_secs(3));
    }
}
