//! Extension-brokered claims (Manifold).
//!
//! The extension charges a flat native `MINT_FEE` and stores per-instance claim
//! terms. Claim cost is added to the native total unless the claim is paid in
//! an ERC-20 token, in which case the token terms are reported separately.

use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::Function;
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolValue;
use mintquote_types::{ClaimTerms, MintParams, NftContractInfo, PriceQuoteResult};
use tracing::{debug, error, warn};

use super::{erc20, read_uint};
use crate::{
    client::{ChainReadClient, ReadError},
    config::DiscoveryConfig,
    error::DiscoveryError,
    provider::{ProviderConfig, abis::ManifoldClaim},
};

/// Run claim discovery, degrading every failure to a zero-cost quote.
///
/// Invalid token decimals are returned as an error instead when strict token
/// validation is enabled.
pub(super) async fn fetch_price(
    client: &dyn ChainReadClient,
    provider: &ProviderConfig,
    params: &MintParams,
    contract_info: &mut NftContractInfo,
    extension: Address,
    config: &DiscoveryConfig,
) -> Result<PriceQuoteResult, DiscoveryError> {
    match discover(client, provider, params, contract_info, extension).await {
        Ok(quote) => Ok(quote),
        Err(failure @ DiscoveryError::InvalidDecimals { .. }) if config.strict_token_validation => {
            error!(provider = provider.name, %extension, error = %failure, "rejecting claim with invalid token data");
            Err(failure)
        }
        Err(failure) => {
            error!(provider = provider.name, %extension, error = %failure, "claim price discovery failed; quoting zero");
            Ok(PriceQuoteResult::degraded(failure.degradation()))
        }
    }
}

async fn discover(
    client: &dyn ChainReadClient,
    provider: &ProviderConfig,
    params: &MintParams,
    contract_info: &mut NftContractInfo,
    extension: Address,
) -> Result<PriceQuoteResult, DiscoveryError> {
    let abi = &provider.price_discovery.abi;
    let claim_args = match (provider.price_discovery.requires_instance_id, params.instance_id) {
        (true, None) => None,
        (_, instance_id) => Some([
            DynSolValue::Address(params.contract_address),
            DynSolValue::Uint(instance_id.unwrap_or(U256::ZERO), 256),
        ]),
    };

    let fee_read = read_uint(client, extension, abi, "MINT_FEE", &[]);
    let claim_read = async {
        match &claim_args {
            Some(args) => read_claim(client, extension, abi, args).await,
            None => Ok(None),
        }
    };
    let (mint_fee, claim) = tokio::join!(fee_read, claim_read);
    let mint_fee = mint_fee.unwrap_or(U256::ZERO);

    let Some(claim) = claim? else {
        debug!(%extension, has_instance = params.instance_id.is_some(), "no claim terms; quoting extension fee only");
        return Ok(PriceQuoteResult::priced(mint_fee, mint_fee));
    };
    contract_info.claim = Some(claim.clone());

    let mut quote = PriceQuoteResult::priced(mint_fee, mint_fee);
    if provider.supports_erc20 && claim.pays_in_erc20() {
        let details = erc20::fetch_details(client, claim.erc20, params.recipient, extension).await?;
        debug!(token = %details.address, symbol = %details.symbol, decimals = details.decimals, "claim paid in ERC-20");
        quote.erc20_details = Some(details);
    } else {
        quote.total_cost = mint_fee.saturating_add(claim.cost);
    }
    quote.claim = Some(claim);
    Ok(quote)
}

/// Read and decode the claim struct.
///
/// A failed read means no claim terms; a result that does not decode as a
/// claim is untrusted data and aborts discovery.
async fn read_claim(
    client: &dyn ChainReadClient,
    extension: Address,
    abi: &[Function],
    args: &[DynSolValue],
) -> Result<Option<ClaimTerms>, DiscoveryError> {
    let value = match client.read(extension, abi, "getClaim", args).await {
        Ok(value) => value,
        Err(failure @ ReadError::Decode { .. }) => return Err(failure.into()),
        Err(failure) => {
            warn!(%extension, error = %failure, "claim read failed");
            return Ok(None);
        }
    };
    let claim = ManifoldClaim::abi_decode(&value.abi_encode()).map_err(|source| DiscoveryError::Decode {
        function: "getClaim",
        reason: source.to_string(),
    })?;
    Ok(Some(ClaimTerms::from(claim)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    use crate::{client::ScriptedReadClient, provider::lookup};

    const CONTRACT: Address = address!("0x8888888888888888888888888888888888888888");
    const EXTENSION: Address = address!("0x9999999999999999999999999999999999999999");

    #[tokio::test]
    async fn instance_requirement_gates_the_claim_read() {
        let client = ScriptedReadClient::new()
            .returning(EXTENSION, "MINT_FEE", U256::from(50u64))
            .reverting(EXTENSION, "getClaim", "no such claim");
        let params = MintParams::new(CONTRACT, 8453);
        let mut info = NftContractInfo::new("manifold", CONTRACT).with_extension(EXTENSION);

        let manifold = lookup("manifold");
        let quote = discover(&client, manifold, &params, &mut info, EXTENSION).await.unwrap();
        assert_eq!(quote.total_cost, U256::from(50u64));
        assert_eq!(client.call_count("getClaim"), 0);

        let mut keyless = manifold.clone();
        keyless.price_discovery.requires_instance_id = false;
        let quote = discover(&client, &keyless, &params, &mut info, EXTENSION).await.unwrap();
        assert_eq!(quote.total_cost, U256::from(50u64));
        assert_eq!(client.call_count("getClaim"), 1);
        assert_eq!(
            client.calls().last().map(|call| call.args.clone()),
            Some(vec![DynSolValue::Address(CONTRACT), DynSolValue::Uint(U256::ZERO, 256)])
        );
    }
}
