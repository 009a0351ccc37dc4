//! nfts2me pricing patterns.
//!
//! 1. `mintPrice()` as a per-unit price.
//! 2. `mintFee(amount)` (creator revenue) plus `protocolFee()` per unit.
//! 3. Configured constant fees.
//!
//! Never fails outward; a stale estimate beats no estimate here.

use alloy_dyn_abi::DynSolValue;
use mintquote_types::{MintParams, PriceQuoteResult};
use tracing::{debug, warn};

use super::read_uint;
use crate::{client::ChainReadClient, config::DiscoveryConfig, provider::ProviderConfig};

pub(super) async fn fetch_price(
    client: &dyn ChainReadClient,
    provider: &ProviderConfig,
    params: &MintParams,
    config: &DiscoveryConfig,
) -> PriceQuoteResult {
    let abi = &provider.price_discovery.abi;
    let contract = params.contract_address;
    let units = params.unit_count();

    if let Some(price) = read_uint(client, contract, abi, "mintPrice", &[]).await {
        return PriceQuoteResult::priced(price, price.saturating_mul(units));
    }
    debug!(%contract, "mintPrice() unavailable, trying mintFee/protocolFee");

    let amount_args = [DynSolValue::Uint(units, 256)];
    let (mint_fee, protocol_fee) = tokio::join!(
        read_uint(client, contract, abi, "mintFee", &amount_args),
        read_uint(client, contract, abi, "protocolFee", &[]),
    );
    if let (Some(mint_fee), Some(protocol_fee)) = (mint_fee, protocol_fee) {
        let total_cost = mint_fee.saturating_add(protocol_fee.saturating_mul(units));
        return PriceQuoteResult::priced(mint_fee, total_cost);
    }

    warn!(%contract, provider = provider.name, "no fee function responded; using default fees");
    let creator_fee = config.nfts2me_fallback_creator_fee;
    let protocol_fee = config.nfts2me_fallback_protocol_fee;
    PriceQuoteResult::priced(
        creator_fee.saturating_mul(units),
        creator_fee.saturating_add(protocol_fee).saturating_mul(units),
    )
}
