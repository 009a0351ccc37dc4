use alloy_primitives::{Address, address};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use super::{
    abis::{amount_mint_abi, manifold_extension_abi, nfts2me_price_abi, price_discovery_abi, recipient_mint_abi},
    builders::{amount_args, flat_value, manifold_args, per_unit_value, recipient_amount_args},
    config::{DiscoveryStrategy, MintConfig, PriceDiscovery, ProviderConfig},
};

/// Registry key unknown providers resolve to.
pub const GENERIC_PROVIDER: &str = "generic";

/// Manifold ERC-1155 lazy payable claim extension.
pub const MANIFOLD_EXTENSION: Address = address!("0x26bbea7803dcac346d5f5f135b57cf2c752a02be");

const BASE_REQUIRED_PARAMS: &[&str] = &["contractAddress", "chainId"];

static BUILTIN_REGISTRY: Lazy<ProviderRegistry> = Lazy::new(ProviderRegistry::builtin);

/// Static mapping from provider key to provider descriptor.
///
/// Built once and never mutated, so lookups are safe from any number of
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    configs: IndexMap<&'static str, ProviderConfig>,
    fallback: ProviderConfig,
}

impl ProviderRegistry {
    /// Registry holding the five built-in providers.
    pub fn builtin() -> Self {
        let fallback = generic();
        let configs = [manifold(), opensea(), zora(), fallback.clone(), nfts2me()]
            .into_iter()
            .map(|config| (config.name, config))
            .collect();
        Self { configs, fallback }
    }

    /// Resolve a provider key; unknown keys resolve to the generic provider.
    pub fn lookup(&self, provider: &str) -> &ProviderConfig {
        self.configs.get(provider).unwrap_or(&self.fallback)
    }

    pub fn is_registered(&self, provider: &str) -> bool {
        self.configs.contains_key(provider)
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.configs.keys().copied()
    }

    pub fn configs(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.configs.values()
    }
}

/// The process-wide built-in registry.
pub fn builtin_registry() -> &'static ProviderRegistry {
    &BUILTIN_REGISTRY
}

/// Look up a built-in provider by key.
pub fn lookup(provider: &str) -> &'static ProviderConfig {
    BUILTIN_REGISTRY.lookup(provider)
}

fn manifold() -> ProviderConfig {
    ProviderConfig {
        name: "manifold",
        extension_addresses: vec![MANIFOLD_EXTENSION],
        price_discovery: PriceDiscovery {
            strategy: DiscoveryStrategy::ClaimExtension,
            abi: manifold_extension_abi(),
            function_names: &["MINT_FEE"],
            requires_instance_id: true,
            requires_amount_param: false,
        },
        // The mint value is the extension fee; claim cost may be paid in ERC-20.
        mint_config: MintConfig {
            abi: manifold_extension_abi(),
            function_name: "mint",
            build_args: manifold_args,
            calculate_value: flat_value,
        },
        required_params: BASE_REQUIRED_PARAMS,
        supports_erc20: true,
    }
}

fn opensea() -> ProviderConfig {
    ProviderConfig {
        name: "opensea",
        extension_addresses: Vec::new(),
        price_discovery: PriceDiscovery {
            strategy: DiscoveryStrategy::CandidateProbe,
            abi: price_discovery_abi(),
            function_names: &["mintPrice", "price", "publicMintPrice"],
            requires_instance_id: false,
            requires_amount_param: false,
        },
        mint_config: MintConfig {
            abi: amount_mint_abi(),
            function_name: "mint",
            build_args: amount_args,
            calculate_value: per_unit_value,
        },
        required_params: BASE_REQUIRED_PARAMS,
        supports_erc20: false,
    }
}

fn zora() -> ProviderConfig {
    ProviderConfig {
        name: "zora",
        extension_addresses: Vec::new(),
        price_discovery: PriceDiscovery {
            strategy: DiscoveryStrategy::CandidateProbe,
            abi: price_discovery_abi(),
            function_names: &["mintPrice", "price"],
            requires_instance_id: false,
            requires_amount_param: false,
        },
        mint_config: MintConfig {
            abi: recipient_mint_abi(),
            function_name: "mint",
            build_args: recipient_amount_args,
            calculate_value: per_unit_value,
        },
        required_params: BASE_REQUIRED_PARAMS,
        supports_erc20: false,
    }
}

fn generic() -> ProviderConfig {
    ProviderConfig {
        name: GENERIC_PROVIDER,
        extension_addresses: Vec::new(),
        price_discovery: PriceDiscovery {
            strategy: DiscoveryStrategy::CandidateProbe,
            abi: price_discovery_abi(),
            function_names: &["mintPrice", "price", "MINT_PRICE", "getMintPrice"],
            requires_instance_id: false,
            requires_amount_param: false,
        },
        mint_config: MintConfig {
            abi: amount_mint_abi(),
            function_name: "mint",
            build_args: amount_args,
            calculate_value: per_unit_value,
        },
        required_params: BASE_REQUIRED_PARAMS,
        supports_erc20: false,
    }
}

fn nfts2me() -> ProviderConfig {
    ProviderConfig {
        name: "nfts2me",
        extension_addresses: Vec::new(),
        price_discovery: PriceDiscovery {
            strategy: DiscoveryStrategy::FallbackProbe,
            abi: nfts2me_price_abi(),
            function_names: &["mintFee"],
            requires_instance_id: false,
            requires_amount_param: true,
        },
        // mint(amount) is paid entirely through the attached value.
        mint_config: MintConfig {
            abi: amount_mint_abi(),
            function_name: "mint",
            build_args: amount_args,
            calculate_value: per_unit_value,
        },
        required_params: BASE_REQUIRED_PARAMS,
        supports_erc20: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_dyn_abi::DynSolValue;
    use alloy_primitives::U256;
    use mintquote_types::{MintParams, NftContractInfo, PriceQuoteResult};

    use crate::{error::MintPlanError, provider::abis::find_function};

    const CONTRACT: Address = address!("0x4444444444444444444444444444444444444444");
    const EXTENSION: Address = address!("0x5555555555555555555555555555555555555555");

    #[test]
    fn registers_five_providers_in_order() {
        let keys: Vec<_> = builtin_registry().keys().collect();
        assert_eq!(keys, vec!["manifold", "opensea", "zora", "generic", "nfts2me"]);
    }

    #[test]
    fn unknown_keys_resolve_to_generic() {
        assert!(!builtin_registry().is_registered("highlight"));
        let config = lookup("highlight");
        assert_eq!(config.name, GENERIC_PROVIDER);
        assert_eq!(
            config.price_discovery.function_names,
            lookup("generic").price_discovery.function_names
        );
    }

    #[test]
    fn candidate_functions_exist_in_discovery_abis() {
        for config in builtin_registry().configs() {
            for name in config.price_discovery.function_names {
                assert!(
                    find_function(&config.price_discovery.abi, name).is_some(),
                    "{} is missing fragment {}",
                    config.name,
                    name
                );
            }
            assert!(config.mint_function().is_some(), "{} has no mint fragment", config.name);
        }
    }

    #[test]
    fn only_manifold_supports_erc20_and_extensions() {
        let manifold = lookup("manifold");
        assert!(manifold.supports_erc20);
        assert_eq!(manifold.price_discovery.strategy, DiscoveryStrategy::ClaimExtension);
        assert_eq!(manifold.extension_addresses, vec![MANIFOLD_EXTENSION]);
        for key in ["opensea", "zora", "generic", "nfts2me"] {
            assert!(!lookup(key).supports_erc20, "{key}");
        }
        assert!(lookup("nfts2me").price_discovery.requires_amount_param);
    }

    #[test]
    fn manifold_plan_targets_extension_with_quote_value() {
        let params = MintParams::new(CONTRACT, 8453).with_instance_id(U256::from(9u64));
        let info = NftContractInfo::new("manifold", CONTRACT).with_extension(EXTENSION);
        let quote = PriceQuoteResult::priced(U256::from(5u64), U256::from(15u64));

        let plan = lookup("manifold").mint_plan(&params, &info, &quote).expect("plan");
        assert_eq!(plan.to, EXTENSION);
        assert_eq!(plan.value, U256::from(15u64));
        assert_eq!(plan.function.signature(), "mint(address,uint256,uint32,bytes32[],address)");
        assert_eq!(plan.args[1], DynSolValue::Uint(U256::from(9u64), 256));
        assert_eq!(plan.calldata[..4], plan.function.selector()[..]);

        let without_extension = NftContractInfo::new("manifold", CONTRACT);
        assert_eq!(lookup("manifold").mint_target(&without_extension), MANIFOLD_EXTENSION);
    }

    #[test]
    fn zora_plan_mints_on_contract_with_recipient_first() {
        let wallet = address!("0x6666666666666666666666666666666666666666");
        let params = MintParams::new(CONTRACT, 7777777).with_recipient(wallet).with_amount(2);
        let info = NftContractInfo::new("zora", CONTRACT);
        let plan = lookup("zora")
            .mint_plan(&params, &info, &PriceQuoteResult::free())
            .expect("plan");
        assert_eq!(plan.to, CONTRACT);
        assert_eq!(plan.args, vec![DynSolValue::Address(wallet), DynSolValue::Uint(U256::from(2u64), 256)]);
        assert_eq!(plan.value, U256::ZERO);
        assert_eq!(plan.calldata.len(), 4 + 2 * 32);
        assert_eq!(plan.calldata[4 + 12..4 + 32], wallet[..]);
    }

    #[test]
    fn plan_rejects_missing_required_params() {
        let params = MintParams::new(Address::ZERO, 0);
        let info = NftContractInfo::new("opensea", CONTRACT);
        let error = lookup("opensea")
            .mint_plan(&params, &info, &PriceQuoteResult::free())
            .unwrap_err();
        assert_eq!(
            error,
            MintPlanError::MissingParams {
                provider: "opensea",
                missing: vec!["contractAddress", "chainId"],
            }
        );
    }
}
