//! Configuration for the game session, ledger seed, and storage location.
//!
//! Values come from defaults, then an optional TOML file, then `LEAPSTAKE_*`
//! environment variable overrides, and are validated before use.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub session: SessionConfig,
    pub ledger: LedgerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Length of the wagering window in minutes.
    pub duration_minutes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Balance seeded into a fresh store on first use.
    pub starting_balance: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_minutes: 3,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./leapstake_data".to_string(),
        }
    }
}

impl GameConfig {
    pub fn session_duration(&self) -> Duration {
        Duration::from_secs(self.session.duration_minutes * 60)
    }
}

/// Configuration loader with environment variable support.
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path.
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables.
    pub fn load(&self) -> Result<GameConfig, ConfigError> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            GameConfig::default()
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> Result<GameConfig, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::LoadFailed(format!("failed to parse TOML: {}", e)))
    }

    fn apply_env_overrides(&self, config: &mut GameConfig) -> Result<(), ConfigError> {
        if let Ok(value) = env::var("LEAPSTAKE_DURATION_MINUTES") {
            config.session.duration_minutes = parse_env_u64("LEAPSTAKE_DURATION_MINUTES", &value)?;
        }
        if let Ok(value) = env::var("LEAPSTAKE_STARTING_BALANCE") {
            config.ledger.starting_balance = parse_env_u64("LEAPSTAKE_STARTING_BALANCE", &value)?;
        }
        if let Ok(value) = env::var("LEAPSTAKE_DATA_DIR") {
            config.storage.data_dir = value;
        }
        Ok(())
    }

    fn validate(&self, config: &GameConfig) -> Result<(), ConfigError> {
        if config.session.duration_minutes < 1 {
            return Err(ConfigError::InvalidValue {
                field: "session.duration_minutes".to_string(),
                value: config.session.duration_minutes.to_string(),
                reason: "session must run for at least one minute".to_string(),
            });
        }
        if config.ledger.starting_balance < 1 {
            return Err(ConfigError::InvalidValue {
                field: "ledger.starting_balance".to_string(),
                value: config.ledger.starting_balance.to_string(),
                reason: "a fresh balance must hold at least one point".to_string(),
            });
        }
        if config.storage.data_dir.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.data_dir".to_string(),
                value: String::new(),
                reason: "data directory must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env_u64(name: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
        field: name.to_string(),
        value: value.to_string(),
        reason: "expected an unsigned integer".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.session.duration_minutes, 3);
        assert_eq!(config.ledger.starting_balance, 1000);
        assert_eq!(config.session_duration(), Duration::from_secs(180));
    }

    #[test]
    fn test_load_from_toml_file_with_partial_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[session]\nduration_minutes = 5").unwrap();

        let config = ConfigLoader::new().with_path(file.path()).load().unwrap();
        assert_eq!(config.session.duration_minutes, 5);
        // Unspecified sections keep their defaults.
        assert_eq!(config.ledger.starting_balance, 1000);
    }

    #[test]
    fn test_missing_file_fails_to_load() {
        let err = ConfigLoader::new()
            .with_path("/nonexistent/leapstake.toml")
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::LoadFailed(_)));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[session]\nduration_minutes = 0").unwrap();

        let err = ConfigLoader::new().with_path(file.path()).load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
