//! Provider registry and descriptors.
//!
//! Modules:
//! - `abis`: `sol!` interfaces for provider contracts and ERC-20 tokens
//! - `builders`: Pure mint argument and value builders
//! - `config`: Provider descriptor records and mint plans
//! - `registry`: Static registry of the built-in providers

pub mod abis;
mod builders;
mod config;
mod registry;

pub use builders::{amount_args, flat_value, manifold_args, per_unit_value, recipient_amount_args};
pub use config::{BuildArgsFn, CalculateValueFn, DiscoveryStrategy, MintConfig, MintPlan, PriceDiscovery, ProviderConfig};
pub use registry::{GENERIC_PROVIDER, MANIFOLD_EXTENSION, ProviderRegistry, builtin_registry, lookup};
