//! Chain read client abstraction.
//!
//! Modules:
//! - `scripted`: In-memory client answering from scripted responses

mod scripted;

use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::Function;
use alloy_primitives::Address;
use async_trait::async_trait;
use thiserror::Error;

pub use scripted::{RecordedCall, ScriptedFixture, ScriptedOutcome, ScriptedReadClient, ScriptedResponse};

/// Capability to execute a single read-only contract call.
///
/// Implementations own transport, calldata encoding, result decoding, and any
/// timeout policy. The engine only issues reads and never depends on logs or
/// write transactions.
#[async_trait]
pub trait ChainReadClient: Send + Sync {
    /// Call `function_name` on `address`, using `abi` to locate the fragment.
    ///
    /// Single-output functions resolve to that output; anything else resolves
    /// to a tuple of the outputs.
    async fn read(
        &self,
        address: Address,
        abi: &[Function],
        function_name: &str,
        args: &[DynSolValue],
    ) -> Result<DynSolValue, ReadError>;
}

/// Errors a chain read can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("call to {function} reverted: {reason}")]
    Reverted { function: String, reason: String },

    #[error("failed to encode arguments for {function}: {reason}")]
    Encode { function: String, reason: String },

    #[error("failed to decode {function} result: {reason}")]
    Decode { function: String, reason: String },

    #[error("function `{function}` is not declared in the supplied ABI")]
    UnknownFunction { function: String },

    #[error("no scripted response for {function} at {address}")]
    Unscripted { address: Address, function: String },
}
