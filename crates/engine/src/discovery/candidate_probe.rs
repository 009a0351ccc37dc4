use alloy_dyn_abi::DynSolValue;
use mintquote_types::{MintParams, PriceQuoteResult};
use tracing::debug;

use crate::{client::ChainReadClient, provider::ProviderConfig};

/// Probe the provider's candidate getters in order; the first numeric answer wins.
///
/// Later candidates are never called once one succeeds. When none respond the
/// mint is assumed free.
pub(super) async fn fetch_price(client: &dyn ChainReadClient, provider: &ProviderConfig, params: &MintParams) -> PriceQuoteResult {
    let discovery = &provider.price_discovery;
    let args = if discovery.requires_amount_param {
        vec![DynSolValue::Uint(params.unit_count(), 256)]
    } else {
        Vec::new()
    };

    for function in discovery.function_names {
        match client.read(params.contract_address, &discovery.abi, function, &args).await {
            Ok(DynSolValue::Uint(price, _)) => {
                debug!(provider = provider.name, function, %price, "price candidate responded");
                return PriceQuoteResult::priced(price, provider.calculate_value(price, params));
            }
            Ok(other) => debug!(provider = provider.name, function, value = ?other, "non-numeric price candidate"),
            Err(error) => debug!(provider = provider.name, function, %error, "price candidate failed"),
        }
    }

    debug!(provider = provider.name, contract = %params.contract_address, "no price candidate responded; assuming free mint");
    PriceQuoteResult::free()
}
