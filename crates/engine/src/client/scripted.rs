//! Scripted chain read client.
//!
//! Answers reads from a fixed list of responses and records every call it
//! receives. Useful for tests, offline quotes, and replaying captured chain
//! state from a JSON fixture.

use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

use alloy_dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy_json_abi::Function;
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolValue;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChainReadClient, ReadError};
use crate::provider::abis::find_function;

/// Result a scripted response produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptedOutcome {
    /// ABI-encoded return data, exactly as `eth_call` would hand it back.
    Returns(Bytes),
    Reverts(String),
}

/// One scripted answer, matched by address, function name and optionally args.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptedResponse {
    pub address: Address,
    pub function: String,
    /// ABI-encoded arguments (calldata without the selector). When `None`,
    /// the response matches any argument list.
    #[serde(default)]
    pub args: Option<Bytes>,
    pub outcome: ScriptedOutcome,
}

impl ScriptedResponse {
    fn matches(&self, address: Address, function_name: &str, encoded_args: &[u8]) -> bool {
        self.address == address
            && self.function == function_name
            && self.args.as_deref().is_none_or(|expected| expected == encoded_args)
    }
}

/// On-disk fixture format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedFixture {
    #[serde(default)]
    pub responses: Vec<ScriptedResponse>,
}

/// A read the client received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub address: Address,
    pub function: String,
    pub args: Vec<DynSolValue>,
}

/// Chain read client that answers from scripted return data.
///
/// Arguments are encoded and results decoded through the supplied ABI, so a
/// fixture that does not match a fragment fails the same way a real node
/// response would.
#[derive(Debug, Default)]
pub struct ScriptedReadClient {
    responses: Vec<ScriptedResponse>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedReadClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fixture(fixture: ScriptedFixture) -> Self {
        Self {
            responses: fixture.responses,
            calls: Mutex::default(),
        }
    }

    /// Load a JSON fixture of scripted responses.
    pub fn from_fixture_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read fixture file: {}", path.display()))?;
        let fixture: ScriptedFixture =
            serde_json::from_str(&content).with_context(|| format!("Failed to parse fixture file: {}", path.display()))?;
        Ok(Self::from_fixture(fixture))
    }

    /// Script `function` at `address` to return `value` for any arguments.
    pub fn returning<T: SolValue>(self, address: Address, function: &str, value: T) -> Self {
        self.respond(address, function, None, ScriptedOutcome::Returns(value.abi_encode().into()))
    }

    /// Script `function` at `address` to return `value` only for exactly `args`.
    pub fn returning_for<T: SolValue>(self, address: Address, function: &str, args: &[DynSolValue], value: T) -> Self {
        let encoded_args = encode_args(args);
        self.respond(
            address,
            function,
            Some(encoded_args),
            ScriptedOutcome::Returns(value.abi_encode().into()),
        )
    }

    /// Script `function` at `address` to revert with `reason`.
    pub fn reverting(self, address: Address, function: &str, reason: &str) -> Self {
        self.respond(address, function, None, ScriptedOutcome::Reverts(reason.to_string()))
    }

    fn respond(mut self, address: Address, function: &str, args: Option<Bytes>, outcome: ScriptedOutcome) -> Self {
        self.responses.push(ScriptedResponse {
            address,
            function: function.to_string(),
            args,
            outcome,
        });
        self
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    /// Number of calls made to `function`, across all addresses.
    pub fn call_count(&self, function: &str) -> usize {
        self.lock_calls().iter().filter(|call| call.function == function).count()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn encode_args(args: &[DynSolValue]) -> Bytes {
    DynSolValue::Tuple(args.to_vec()).abi_encode_params().into()
}

fn decode_returns(function: &Function, data: &[u8]) -> Result<DynSolValue, ReadError> {
    let mut outputs = function.abi_decode_output(data).map_err(|error| ReadError::Decode {
        function: function.name.clone(),
        reason: error.to_string(),
    })?;
    if outputs.len() == 1 {
        return Ok(outputs.remove(0));
    }
    Ok(DynSolValue::Tuple(outputs))
}

#[async_trait]
impl ChainReadClient for ScriptedReadClient {
    async fn read(
        &self,
        address: Address,
        abi: &[Function],
        function_name: &str,
        args: &[DynSolValue],
    ) -> Result<DynSolValue, ReadError> {
        self.lock_calls().push(RecordedCall {
            address,
            function: function_name.to_string(),
            args: args.to_vec(),
        });
        debug!(%address, function = function_name, argument_count = args.len(), "scripted read");

        let function = find_function(abi, function_name).ok_or_else(|| ReadError::UnknownFunction {
            function: function_name.to_string(),
        })?;
        let calldata = function.abi_encode_input(args).map_err(|error| ReadError::Encode {
            function: function_name.to_string(),
            reason: error.to_string(),
        })?;
        let encoded_args = calldata.get(4..).unwrap_or_default();

        let response = self
            .responses
            .iter()
            .find(|response| response.matches(address, function_name, encoded_args))
            .ok_or_else(|| ReadError::Unscripted {
                address,
                function: function_name.to_string(),
            })?;

        match &response.outcome {
            ScriptedOutcome::Returns(data) => decode_returns(function, data),
            ScriptedOutcome::Reverts(reason) => Err(ReadError::Reverted {
                function: function_name.to_string(),
                reason: reason.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{U256, address};

    use crate::provider::abis::nfts2me_price_abi;

    const CONTRACT: Address = address!("0x1111111111111111111111111111111111111111");

    fn uint(value: u64) -> DynSolValue {
        DynSolValue::Uint(U256::from(value), 256)
    }

    #[tokio::test]
    async fn returns_scripted_values_and_records_calls() {
        let client = ScriptedReadClient::new().returning(CONTRACT, "mintPrice", U256::from(42u64));

        let value = client.read(CONTRACT, &nfts2me_price_abi(), "mintPrice", &[]).await.unwrap();
        assert_eq!(value.as_uint(), Some((U256::from(42u64), 256)));
        assert_eq!(client.call_count("mintPrice"), 1);
        assert_eq!(client.calls()[0].address, CONTRACT);
    }

    #[tokio::test]
    async fn reverts_and_unscripted_calls_fail() {
        let client = ScriptedReadClient::new().reverting(CONTRACT, "protocolFee", "not supported");

        let reverted = client.read(CONTRACT, &nfts2me_price_abi(), "protocolFee", &[]).await;
        assert!(matches!(reverted, Err(ReadError::Reverted { .. })));

        let unscripted = client.read(CONTRACT, &nfts2me_price_abi(), "mintPrice", &[]).await;
        assert!(matches!(unscripted, Err(ReadError::Unscripted { .. })));
    }

    #[tokio::test]
    async fn rejects_functions_missing_from_the_abi() {
        let client = ScriptedReadClient::new().returning(CONTRACT, "publicMintPrice", U256::from(1u64));
        let result = client.read(CONTRACT, &nfts2me_price_abi(), "publicMintPrice", &[]).await;
        assert_eq!(
            result,
            Err(ReadError::UnknownFunction {
                function: "publicMintPrice".into()
            })
        );
    }

    #[tokio::test]
    async fn arguments_are_checked_against_the_fragment() {
        let client = ScriptedReadClient::new().returning(CONTRACT, "mintFee", U256::from(1u64));
        let result = client.read(CONTRACT, &nfts2me_price_abi(), "mintFee", &[]).await;
        assert!(matches!(result, Err(ReadError::Encode { .. })));
    }

    #[tokio::test]
    async fn return_data_that_does_not_fit_the_fragment_fails_to_decode() {
        let client = ScriptedReadClient::from_fixture(ScriptedFixture {
            responses: vec![ScriptedResponse {
                address: CONTRACT,
                function: "mintPrice".into(),
                args: None,
                outcome: ScriptedOutcome::Returns(Bytes::from_static(&[0x01])),
            }],
        });
        let result = client.read(CONTRACT, &nfts2me_price_abi(), "mintPrice", &[]).await;
        assert!(matches!(result, Err(ReadError::Decode { .. })));
    }

    #[tokio::test]
    async fn argument_specific_responses_take_priority_in_order() {
        let client = ScriptedReadClient::new()
            .returning_for(CONTRACT, "mintFee", &[uint(2)], U256::from(200u64))
            .returning(CONTRACT, "mintFee", U256::from(100u64));

        let abi = nfts2me_price_abi();
        let two = client.read(CONTRACT, &abi, "mintFee", &[uint(2)]).await.unwrap();
        let three = client.read(CONTRACT, &abi, "mintFee", &[uint(3)]).await.unwrap();
        assert_eq!(two, uint(200));
        assert_eq!(three, uint(100));
    }

    #[test]
    fn loads_fixture_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.json");
        std::fs::write(
            &path,
            r#"{
  "responses": [
    {
      "address": "0x1111111111111111111111111111111111111111",
      "function": "mintPrice",
      "outcome": { "returns": "0x00000000000000000000000000000000000000000000000000005af3107a4000" }
    },
    {
      "address": "0x1111111111111111111111111111111111111111",
      "function": "price",
      "outcome": { "reverts": "execution reverted" }
    }
  ]
}"#,
        )
        .unwrap();

        let client = ScriptedReadClient::from_fixture_path(&path).expect("load fixture");
        assert_eq!(client.responses.len(), 2);
        assert_eq!(
            client.responses[0].outcome,
            ScriptedOutcome::Returns(U256::from(100_000_000_000_000u64).abi_encode().into())
        );
    }

    #[test]
    fn missing_fixture_reports_path() {
        let error = ScriptedReadClient::from_fixture_path("/definitely/not/here.json").unwrap_err();
        assert!(error.to_string().contains("/definitely/not/here.json"));
    }
}
