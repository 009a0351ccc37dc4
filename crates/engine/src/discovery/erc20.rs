use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, U256};
use mintquote_types::Erc20Details;
use tracing::error;

use super::read_uint;
use crate::{client::ChainReadClient, error::DiscoveryError, provider::abis::ERC20_ABI};

/// Fetch symbol, decimals and (with a recipient) allowance and balance in one batch.
///
/// Symbol and decimals failures propagate. Allowance and balance failures read
/// as zero; without a recipient they are never queried and stay `None`.
pub(super) async fn fetch_details(
    client: &dyn ChainReadClient,
    token: Address,
    recipient: Option<Address>,
    spender: Address,
) -> Result<Erc20Details, DiscoveryError> {
    let abi = ERC20_ABI.as_slice();

    let symbol = client.read(token, abi, "symbol", &[]);
    let decimals = client.read(token, abi, "decimals", &[]);
    let allowance = async {
        match recipient {
            Some(owner) => {
                let args = [DynSolValue::Address(owner), DynSolValue::Address(spender)];
                Some(read_uint(client, token, abi, "allowance", &args).await.unwrap_or(U256::ZERO))
            }
            None => None,
        }
    };
    let balance = async {
        match recipient {
            Some(owner) => Some(
                read_uint(client, token, abi, "balanceOf", &[DynSolValue::Address(owner)])
                    .await
                    .unwrap_or(U256::ZERO),
            ),
            None => None,
        }
    };
    let (symbol, decimals, allowance, balance) = tokio::join!(symbol, decimals, allowance, balance);

    let symbol = symbol?;
    let symbol = symbol
        .as_str()
        .ok_or_else(|| DiscoveryError::Decode {
            function: "symbol",
            reason: format!("expected a string, found {symbol:?}"),
        })?
        .to_string();
    let decimals = validate_decimals(token, &decimals?)?;

    Ok(Erc20Details {
        address: token,
        symbol,
        decimals,
        allowance,
        balance,
    })
}

/// Accept only integer decimals in `0..=255`.
pub fn validate_decimals(token: Address, value: &DynSolValue) -> Result<u8, DiscoveryError> {
    let decimals = value.as_uint().and_then(|(raw, _)| u8::try_from(raw).ok());
    decimals.ok_or_else(|| {
        let value = match value {
            DynSolValue::Uint(raw, _) => raw.to_string(),
            DynSolValue::String(text) => format!("{text:?}"),
            other => format!("{other:?}"),
        };
        error!(%token, %value, "invalid ERC-20 decimals");
        DiscoveryError::InvalidDecimals { token, value }
    })
}
