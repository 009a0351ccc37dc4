//! Per-provider mint argument and value builders.
//!
//! Each function is referenced from a provider record; they are pure and
//! never touch the chain.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use mintquote_types::MintParams;

/// `[creatorContract, instanceId, mintIndex, merkleProof, mintFor]`.
pub fn manifold_args(params: &MintParams) -> Vec<DynSolValue> {
    vec![
        DynSolValue::Address(params.contract_address),
        DynSolValue::Uint(params.instance_id.unwrap_or(U256::ZERO), 256),
        DynSolValue::Uint(U256::from(params.token_id.unwrap_or(0)), 32),
        DynSolValue::Array(
            params
                .merkle_proof
                .iter()
                .map(|leaf| DynSolValue::FixedBytes(*leaf, 32))
                .collect(),
        ),
        DynSolValue::Address(params.recipient.unwrap_or(Address::ZERO)),
    ]
}

/// `[amount]`.
pub fn amount_args(params: &MintParams) -> Vec<DynSolValue> {
    vec![DynSolValue::Uint(params.unit_count(), 256)]
}

/// `[recipient, amount]`.
pub fn recipient_amount_args(params: &MintParams) -> Vec<DynSolValue> {
    vec![
        DynSolValue::Address(params.recipient.unwrap_or(Address::ZERO)),
        DynSolValue::Uint(params.unit_count(), 256),
    ]
}

/// Flat fee: the observed price is the whole value.
pub fn flat_value(price: U256, _params: &MintParams) -> U256 {
    price
}

/// Unit price times the number of units minted.
pub fn per_unit_value(price: U256, params: &MintParams) -> U256 {
    price.saturating_mul(params.unit_count())
}
