//! Error types for price discovery, mint planning and configuration.

use std::{io, path::PathBuf};

use alloy_primitives::Address;
use mintquote_types::Degradation;
use thiserror::Error;

use crate::client::ReadError;

/// Failures raised inside a discovery attempt.
///
/// Only [`DiscoveryError::InvalidDecimals`] can escape `fetch_price_data`, and
/// only when strict token validation is enabled. Everything else is absorbed
/// into a best-effort quote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("invalid ERC-20 decimals for {token}: {value}")]
    InvalidDecimals { token: Address, value: String },

    #[error("failed to decode `{function}` result: {reason}")]
    Decode { function: &'static str, reason: String },

    #[error(transparent)]
    Read(#[from] ReadError),
}

impl DiscoveryError {
    /// Whether the failure came from untrustworthy chain data rather than transport.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidDecimals { .. } | Self::Decode { .. } | Self::Read(ReadError::Decode { .. })
        )
    }

    /// Describe the failure as a quote degradation.
    pub fn degradation(&self) -> Degradation {
        let reason = self.to_string();
        if self.is_validation() {
            Degradation::InvalidTokenData { reason }
        } else {
            Degradation::ReadFailed { reason }
        }
    }
}

/// Failures building a mint transaction plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MintPlanError {
    #[error("provider {provider} requires missing parameters: {}", missing.join(", "))]
    MissingParams { provider: &'static str, missing: Vec<&'static str> },

    #[error("provider {provider} declares no `{function}` fragment in its mint ABI")]
    MissingMintFunction { provider: &'static str, function: &'static str },

    #[error("provider {provider} mint arguments do not match `{function}`: {reason}")]
    Encode {
        provider: &'static str,
        function: String,
        reason: String,
    },
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}
