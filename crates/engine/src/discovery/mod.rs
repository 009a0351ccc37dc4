//! Price discovery engine.
//!
//! Each call is a linear pipeline: classify the provider, issue the primary
//! read(s), issue dependent reads, validate, compute, return. Every phase has
//! a fallback, so the pipeline terminates with a quote rather than a fault.
//!
//! Modules:
//! - `candidate_probe`: Ordered getter probing (opensea, zora, generic, unknown)
//! - `claim_extension`: Extension fee + claim terms (manifold)
//! - `erc20`: ERC-20 payment detail batch and decimals validation
//! - `fallback_probe`: Fixed pricing patterns with constant fallback (nfts2me)

mod candidate_probe;
mod claim_extension;
mod erc20;
mod fallback_probe;

use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::Function;
use alloy_primitives::{Address, U256};
use mintquote_types::{MintParams, NftContractInfo, PriceQuoteResult};
use tracing::{info, warn};

use crate::{
    client::ChainReadClient,
    config::DiscoveryConfig,
    error::DiscoveryError,
    provider::{DiscoveryStrategy, ProviderRegistry, builtin_registry},
};

pub use erc20::validate_decimals;

/// Computes normalized mint quotes against a chain read client.
#[derive(Debug, Clone)]
pub struct PriceDiscoveryEngine {
    registry: &'static ProviderRegistry,
    config: DiscoveryConfig,
}

impl Default for PriceDiscoveryEngine {
    fn default() -> Self {
        Self::new(DiscoveryConfig::default())
    }
}

impl PriceDiscoveryEngine {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            registry: builtin_registry(),
            config,
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Discover the cost of minting against `contract_info`'s provider.
    ///
    /// `contract_info` is an output parameter: a successful Manifold claim read
    /// stores the claim terms in `contract_info.claim` so later mint calls can
    /// reuse them.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidDecimals`] only when
    /// `strict_token_validation` is enabled. All other failures degrade to a
    /// best-effort quote.
    pub async fn fetch_price_data(
        &self,
        client: &dyn ChainReadClient,
        params: &MintParams,
        contract_info: &mut NftContractInfo,
    ) -> Result<PriceQuoteResult, DiscoveryError> {
        let provider = self.registry.lookup(&contract_info.provider);

        let quote = match (provider.price_discovery.strategy, contract_info.extension_address) {
            (DiscoveryStrategy::ClaimExtension, Some(extension)) => {
                claim_extension::fetch_price(client, provider, params, contract_info, extension, &self.config).await?
            }
            (DiscoveryStrategy::FallbackProbe, _) => fallback_probe::fetch_price(client, provider, params, &self.config).await,
            (DiscoveryStrategy::ClaimExtension, None) | (DiscoveryStrategy::CandidateProbe, _) => {
                candidate_probe::fetch_price(client, provider, params).await
            }
        };

        info!(
            provider = provider.name,
            contract = %params.contract_address,
            chain_id = params.chain_id,
            total_cost = %quote.total_cost,
            erc20 = quote.erc20_details.is_some(),
            degraded = quote.is_degraded(),
            "price quote computed"
        );
        Ok(quote)
    }
}

/// Run discovery with the default configuration.
pub async fn fetch_price_data(
    client: &dyn ChainReadClient,
    params: &MintParams,
    contract_info: &mut NftContractInfo,
) -> Result<PriceQuoteResult, DiscoveryError> {
    PriceDiscoveryEngine::default()
        .fetch_price_data(client, params, contract_info)
        .await
}

/// Fault-isolated read: failures are logged and resolve to `None`.
async fn read_or_none(
    client: &dyn ChainReadClient,
    address: Address,
    abi: &[Function],
    function: &str,
    args: &[DynSolValue],
) -> Option<DynSolValue> {
    match client.read(address, abi, function, args).await {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(%address, function, %error, "chain read failed");
            None
        }
    }
}

/// Fault-isolated read of an unsigned integer; non-numeric results count as failures.
async fn read_uint(
    client: &dyn ChainReadClient,
    address: Address,
    abi: &[Function],
    function: &str,
    args: &[DynSolValue],
) -> Option<U256> {
    let value = read_or_none(client, address, abi, function, args).await?;
    let number = value.as_uint().map(|(number, _)| number);
    if number.is_none() {
        warn!(%address, function, ?value, "expected a numeric result");
    }
    number
}
