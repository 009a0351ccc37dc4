//! # Mintquote Engine
//!
//! Discovers what it costs to mint an NFT from one of several minting
//! providers, each exposing a different on-chain pricing interface.
//!
//! ## Key Features
//!
//! - **Provider Registry**: Declarative records for `manifold`, `opensea`, `zora`, `generic` and `nfts2me`
//! - **Price Discovery**: Batched and sequenced chain reads with per-provider fallbacks
//! - **Graceful Degradation**: Failed reads produce a best-effort quote instead of an error
//! - **Mint Plans**: Provider-specific mint arguments and attached value
//!
//! ## Usage
//!
//! ```rust
//! use alloy_primitives::{U256, address};
//! use mintquote_engine::{PriceDiscoveryEngine, ScriptedReadClient};
//! use mintquote_types::{MintParams, NftContractInfo};
//!
//! # tokio_test_block_on(async {
//! let contract = address!("0x1111111111111111111111111111111111111111");
//! let client = ScriptedReadClient::new().returning(contract, "mintPrice", U256::from(1_000u64));
//! let params = MintParams::new(contract, 8453).with_amount(2);
//! let mut info = NftContractInfo::new("opensea", contract);
//!
//! let quote = PriceDiscoveryEngine::default()
//!     .fetch_price_data(&client, &params, &mut info)
//!     .await?;
//! assert_eq!(quote.total_cost, U256::from(2_000u64));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # })?;
//! # fn tokio_test_block_on<F: std::future::Future>(future: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(future)
//! # }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **`client`**: The chain read capability the engine consumes, plus a scripted implementation
//! - **`provider`**: Provider descriptors, `sol!` interfaces, mint argument builders and the registry
//! - **`discovery`**: The per-strategy price discovery pipeline
//! - **`config`**: Discovery tunables loaded from JSON
//! - **`error`**: Error types

pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod provider;

// Re-export commonly used types for convenience
pub use client::{ChainReadClient, ReadError, ScriptedFixture, ScriptedReadClient};
pub use config::DiscoveryConfig;
pub use discovery::{PriceDiscoveryEngine, fetch_price_data};
pub use error::{ConfigError, DiscoveryError, MintPlanError};
pub use provider::{DiscoveryStrategy, MintPlan, ProviderConfig, ProviderRegistry, builtin_registry, lookup};
