//! Configuration management for cardtracker.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rules::{FiveTwentyFourRule, DEFAULT_ISSUER_KEYWORD, DEFAULT_WINDOW_DAYS};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "cardtracker";

/// Default data file name.
const DATA_FILE_NAME: &str = "cards.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CARDTRACKER_`)
/// 2. TOML config file at `~/.config/cardtracker/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Eligibility rule configuration.
    pub rules: RulesConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the JSON data file.
    /// Defaults to `~/.local/share/cardtracker/cards.json`
    pub data_path: Option<PathBuf>,
}

/// Parameters of the 5/24 count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Issuer substring (case-insensitive) that makes a card count.
    pub issuer_keyword: String,
    /// Look-back window in days.
    pub window_days: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            issuer_keyword: DEFAULT_ISSUER_KEYWORD.to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("CARDTRACKER_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.rules.window_days == 0 {
            return Err(Error::ConfigValidation {
                message: "window_days must be greater than 0".to_string(),
            });
        }

        if self.rules.issuer_keyword.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "issuer_keyword cannot be empty".to_string(),
            });
        }

        if let Some(path) = &self.storage.data_path {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "data_path cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the data file path, resolving defaults if not set.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.storage
            .data_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }

    /// The configured 5/24 rule.
    #[must_use]
    pub fn five_24_rule(&self) -> FiveTwentyFourRule {
        FiveTwentyFourRule {
            issuer_keyword: self.rules.issuer_keyword.trim().to_string(),
            window_days: self.rules.window_days,
        }
    }
}
