//! Discovery configuration.
//!
//! Loaded from JSON at `MINTQUOTE_CONFIG_PATH` or the user config directory.
//! A missing file means defaults.

use std::{env, path::Path, path::PathBuf};

use alloy_primitives::U256;
use dirs_next::{config_dir, home_dir};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// 0.0001 native currency units, in the smallest unit.
pub const NFTS2ME_DEFAULT_FEE_PER_UNIT: U256 = U256::from_limbs([100_000_000_000_000, 0, 0, 0]);

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "MINTQUOTE_CONFIG_PATH";

/// Tunables for price discovery. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscoveryConfig {
    /// Surface invalid ERC-20 decimals as an error instead of a zero-cost quote.
    pub strict_token_validation: bool,
    /// Creator fee per unit assumed when no nfts2me fee function responds.
    pub nfts2me_fallback_creator_fee: U256,
    /// Protocol fee per unit assumed when no nfts2me fee function responds.
    pub nfts2me_fallback_protocol_fee: U256,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            strict_token_validation: false,
            nfts2me_fallback_creator_fee: NFTS2ME_DEFAULT_FEE_PER_UNIT,
            nfts2me_fallback_protocol_fee: NFTS2ME_DEFAULT_FEE_PER_UNIT,
        }
    }
}

impl DiscoveryConfig {
    /// Load from the default location, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load() -> Self {
        let path = default_config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "ignoring discovery config");
                Self::default()
            }
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Get the default path for the discovery configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(path.trim());
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mintquote")
        .join("config.json")
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_nfts2me_platform_fee() {
        let config = DiscoveryConfig::default();
        assert!(!config.strict_token_validation);
        assert_eq!(config.nfts2me_fallback_creator_fee, U256::from(100_000_000_000_000u64));
        assert_eq!(config.nfts2me_fallback_protocol_fee, U256::from(100_000_000_000_000u64));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "strictTokenValidation": true }"#).unwrap();

        let config = DiscoveryConfig::load_from(&path).expect("load config");
        assert!(config.strict_token_validation);
        assert_eq!(config.nfts2me_fallback_protocol_fee, NFTS2ME_DEFAULT_FEE_PER_UNIT);
    }

    #[test]
    fn save_then_load_from_env_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = DiscoveryConfig {
            strict_token_validation: true,
            nfts2me_fallback_creator_fee: U256::from(7u64),
            ..DiscoveryConfig::default()
        };
        config.save_to(&path).expect("save config");

        temp_env::with_var(CONFIG_PATH_ENV, Some(path.to_str().unwrap()), || {
            assert_eq!(default_config_path(), path);
            assert_eq!(DiscoveryConfig::load(), config);
        });
    }

    #[test]
    fn malformed_file_is_an_error_but_load_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(DiscoveryConfig::load_from(&path), Err(ConfigError::Parse { .. })));
        temp_env::with_var(CONFIG_PATH_ENV, Some(path.to_str().unwrap()), || {
            assert_eq!(DiscoveryConfig::load(), DiscoveryConfig::default());
        });
    }

    #[test]
    fn missing_file_loads_defaults() {
        temp_env::with_var(CONFIG_PATH_ENV, Some("/definitely/not/here/config.json"), || {
            assert_eq!(DiscoveryConfig::load(), DiscoveryConfig::default());
        });
    }
}
