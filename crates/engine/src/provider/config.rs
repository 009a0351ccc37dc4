//! Declarative provider descriptors.
//!
//! A provider is fully described by one [`ProviderConfig`] record: how its
//! price is discovered, how its mint call is shaped, and what it supports.
//! Adding a provider means adding a record, not a type.

use alloy_dyn_abi::{DynSolValue, JsonAbiExt};
use alloy_json_abi::Function;
use alloy_primitives::{Address, Bytes, U256};
use mintquote_types::{MintParams, NftContractInfo, PriceQuoteResult};
use serde::Serialize;

use super::abis::find_function;
use crate::error::MintPlanError;

/// Maps mint parameters to the mint call's positional arguments.
pub type BuildArgsFn = fn(&MintParams) -> Vec<DynSolValue>;

/// Maps an observed on-chain price to the native value attached to the mint.
pub type CalculateValueFn = fn(U256, &MintParams) -> U256;

/// Closed set of price discovery shapes the engine knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscoveryStrategy {
    /// Fee and claim terms live on a satellite extension contract.
    ClaimExtension,
    /// Fixed sequence of pricing patterns ending in constant fees.
    FallbackProbe,
    /// Ordered candidate getters; first responder wins.
    CandidateProbe,
}

#[derive(Debug, Clone)]
pub struct PriceDiscovery {
    pub strategy: DiscoveryStrategy,
    pub abi: Vec<Function>,
    /// Candidate getters in priority order.
    pub function_names: &'static [&'static str],
    /// Claim terms are only read when the caller names an instance.
    pub requires_instance_id: bool,
    pub requires_amount_param: bool,
}

#[derive(Debug, Clone)]
pub struct MintConfig {
    pub abi: Vec<Function>,
    pub function_name: &'static str,
    pub build_args: BuildArgsFn,
    pub calculate_value: CalculateValueFn,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub name: &'static str,
    /// Known extension deployments, most preferred first.
    pub extension_addresses: Vec<Address>,
    pub price_discovery: PriceDiscovery,
    pub mint_config: MintConfig,
    pub required_params: &'static [&'static str],
    pub supports_erc20: bool,
}

/// Everything needed to assemble a mint transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintPlan {
    pub chain_id: u64,
    pub to: Address,
    pub function: Function,
    #[serde(skip)]
    pub args: Vec<DynSolValue>,
    /// Selector followed by the encoded arguments.
    pub calldata: Bytes,
    /// Native currency to attach.
    pub value: U256,
}

impl ProviderConfig {
    pub fn build_args(&self, params: &MintParams) -> Vec<DynSolValue> {
        (self.mint_config.build_args)(params)
    }

    pub fn calculate_value(&self, price: U256, params: &MintParams) -> U256 {
        (self.mint_config.calculate_value)(price, params)
    }

    /// Required parameter names that `params` leaves empty.
    pub fn missing_params(&self, params: &MintParams) -> Vec<&'static str> {
        self.required_params
            .iter()
            .copied()
            .filter(|name| !params.has_param(name))
            .collect()
    }

    pub fn mint_function(&self) -> Option<&Function> {
        find_function(&self.mint_config.abi, self.mint_config.function_name)
    }

    /// Address the mint transaction is sent to.
    ///
    /// Extension-brokered providers mint through the contract info's extension,
    /// then the first known deployment; everything else mints on the contract.
    pub fn mint_target(&self, contract_info: &NftContractInfo) -> Address {
        match self.price_discovery.strategy {
            DiscoveryStrategy::ClaimExtension => contract_info
                .extension_address
                .or_else(|| self.extension_addresses.first().copied())
                .unwrap_or(contract_info.contract_address),
            DiscoveryStrategy::FallbackProbe | DiscoveryStrategy::CandidateProbe => contract_info.contract_address,
        }
    }

    /// Combine a quote with this provider's mint shape.
    pub fn mint_plan(
        &self,
        params: &MintParams,
        contract_info: &NftContractInfo,
        quote: &PriceQuoteResult,
    ) -> Result<MintPlan, MintPlanError> {
        let missing = self.missing_params(params);
        if !missing.is_empty() {
            return Err(MintPlanError::MissingParams {
                provider: self.name,
                missing,
            });
        }
        let function = self.mint_function().ok_or(MintPlanError::MissingMintFunction {
            provider: self.name,
            function: self.mint_config.function_name,
        })?;

        let args = self.build_args(params);
        let calldata = function.abi_encode_input(&args).map_err(|error| MintPlanError::Encode {
            provider: self.name,
            function: function.signature(),
            reason: error.to_string(),
        })?;

        Ok(MintPlan {
            chain_id: params.chain_id,
            to: self.mint_target(contract_info),
            function: function.clone(),
            args,
            calldata: calldata.into(),
            value: quote.total_cost,
        })
    }
}
