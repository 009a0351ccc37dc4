//! Shared data model for mint price discovery.
//!
//! These types cross the boundary between callers (which describe the mint
//! they intend to perform), the discovery engine, and the mint transaction
//! builders.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

fn default_amount() -> u64 {
    1
}

/// Caller supplied parameters for a single mint attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintParams {
    /// NFT contract the mint targets.
    pub contract_address: Address,
    /// EVM chain identifier.
    pub chain_id: u64,
    /// Number of tokens to mint. Zero is treated as one.
    #[serde(default = "default_amount")]
    pub amount: u64,
    /// Wallet receiving the minted tokens.
    #[serde(default)]
    pub recipient: Option<Address>,
    /// Provider specific claim selector (Manifold instance id).
    #[serde(default)]
    pub instance_id: Option<U256>,
    /// Mint index passed to providers that take one.
    #[serde(default)]
    pub token_id: Option<u32>,
    /// Allowlist proof, ordered leaf to root.
    #[serde(default)]
    pub merkle_proof: Vec<B256>,
}

impl MintParams {
    pub fn new(contract_address: Address, chain_id: u64) -> Self {
        Self {
            contract_address,
            chain_id,
            amount: default_amount(),
            recipient: None,
            instance_id: None,
            token_id: None,
            merkle_proof: Vec::new(),
        }
    }

    pub fn with_amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_recipient(mut self, recipient: Address) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn with_instance_id(mut self, instance_id: U256) -> Self {
        self.instance_id = Some(instance_id);
        self
    }

    pub fn with_token_id(mut self, token_id: u32) -> Self {
        self.token_id = Some(token_id);
        self
    }

    pub fn with_merkle_proof(mut self, merkle_proof: Vec<B256>) -> Self {
        self.merkle_proof = merkle_proof;
        self
    }

    /// Effective number of units as a `U256`, never less than one.
    pub fn unit_count(&self) -> U256 {
        U256::from(self.amount.max(1))
    }

    /// Whether a named parameter carries a usable value.
    ///
    /// Zero addresses and a zero chain id count as absent. Unknown names are
    /// reported as absent.
    pub fn has_param(&self, name: &str) -> bool {
        match name {
            "contractAddress" => !self.contract_address.is_zero(),
            "chainId" => self.chain_id != 0,
            "amount" => true,
            "recipient" => self.recipient.is_some_and(|recipient| !recipient.is_zero()),
            "instanceId" => self.instance_id.is_some(),
            "tokenId" => self.token_id.is_some(),
            "merkleProof" => !self.merkle_proof.is_empty(),
            _ => false,
        }
    }
}

/// Manifold claim terms for one instance of a mintable collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimTerms {
    /// Price per mint in the smallest unit of the payment currency.
    pub cost: U256,
    pub merkle_root: B256,
    /// Payment token; the zero address means native currency.
    pub erc20: Address,
    pub start_date: u64,
    pub end_date: u64,
    pub wallet_max: u32,
}

impl ClaimTerms {
    /// Whether the claim is paid in an ERC-20 token rather than native currency.
    pub fn pays_in_erc20(&self) -> bool {
        !self.erc20.is_zero()
    }
}

/// Per-contract metadata describing which provider a contract belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftContractInfo {
    /// Registry key of the minting provider.
    pub provider: String,
    pub contract_address: Address,
    /// Satellite contract brokering mints, when the provider uses one.
    #[serde(default)]
    pub extension_address: Option<Address>,
    /// Claim terms cached by price discovery.
    #[serde(default)]
    pub claim: Option<ClaimTerms>,
}

impl NftContractInfo {
    pub fn new(provider: impl Into<String>, contract_address: Address) -> Self {
        Self {
            provider: provider.into(),
            contract_address,
            extension_address: None,
            claim: None,
        }
    }

    pub fn with_extension(mut self, extension_address: Address) -> Self {
        self.extension_address = Some(extension_address);
        self
    }
}

/// ERC-20 payment terms attached to a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20Details {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    /// `None` when no recipient was supplied; distinct from a queried zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowance: Option<U256>,
    /// `None` when no recipient was supplied; distinct from a queried zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<U256>,
}

/// Reason a quote was degraded to a zero estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Degradation {
    /// A required chain read failed.
    ReadFailed { reason: String },
    /// Chain data was read but could not be trusted (for example, bad decimals).
    InvalidTokenData { reason: String },
}

/// Normalized price quote for a mint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteResult {
    /// Observed price; per unit or flat fee depending on the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mint_price: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erc20_details: Option<Erc20Details>,
    /// Native currency to attach to the mint transaction.
    pub total_cost: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim: Option<ClaimTerms>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degraded: Option<Degradation>,
}

impl PriceQuoteResult {
    pub fn priced(mint_price: U256, total_cost: U256) -> Self {
        Self {
            mint_price: Some(mint_price),
            total_cost,
            ..Self::default()
        }
    }

    /// No price could be discovered; treated as a free mint.
    pub fn free() -> Self {
        Self::priced(U256::ZERO, U256::ZERO)
    }

    /// Zero-cost estimate carrying the reason discovery degraded.
    pub fn degraded(degradation: Degradation) -> Self {
        Self {
            degraded: Some(degradation),
            ..Self::default()
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}
