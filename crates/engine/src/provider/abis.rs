//! Solidity interfaces for the built-in minting providers and ERC-20 tokens.
//!
//! Each interface is declared once with `sol!`; the JSON-ABI fragments handed
//! to chain read clients are generated from the same declarations.

use std::collections::BTreeMap;

use alloy_json_abi::Function;
use alloy_sol_types::sol;
use mintquote_types::ClaimTerms;
use once_cell::sync::Lazy;

sol! {
    /// ERC-20 read surface used for claim payment details.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(abi)]
    interface IERC20 {
        function symbol() external view returns (string);
        /// Read wide so out-of-range answers reach validation instead of failing decode.
        function decimals() external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function balanceOf(address owner) external view returns (uint256);
    }
}

sol! {
    /// Manifold lazy payable claim extension: fee, claim lookup and mint.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(abi)]
    interface IManifoldClaimExtension {
        struct Claim {
            uint32 total;
            uint32 totalMax;
            uint32 walletMax;
            uint48 startDate;
            uint48 endDate;
            uint8 storageProtocol;
            bytes32 merkleRoot;
            string location;
            uint256 tokenId;
            uint256 cost;
            address paymentReceiver;
            address erc20;
            address signingAddress;
        }

        function MINT_FEE() external view returns (uint256);
        function getClaim(address creatorContractAddress, uint256 instanceId) external view returns (Claim memory claim);
        function mint(
            address creatorContractAddress,
            uint256 instanceId,
            uint32 mintIndex,
            bytes32[] calldata merkleProof,
            address mintFor
        ) external payable;
    }
}

sol! {
    /// Zero-argument price getters probed on generic drops.
    #[allow(missing_docs)]
    #[sol(abi)]
    interface IPriceGetters {
        function mintPrice() external view returns (uint256);
        function price() external view returns (uint256);
        function publicMintPrice() external view returns (uint256);
        function MINT_PRICE() external view returns (uint256);
        function getMintPrice() external view returns (uint256);
    }
}

sol! {
    /// nfts2me pricing surface: flat price, creator fee for an amount, protocol fee.
    #[allow(missing_docs)]
    #[sol(abi)]
    interface INfts2MePricing {
        function mintPrice() external view returns (uint256);
        function mintFee(uint256 amount) external view returns (uint256);
        function protocolFee() external view returns (uint256);
    }
}

sol! {
    /// `mint(uint256 amount)`, paid through the attached value.
    #[allow(missing_docs)]
    #[sol(abi)]
    interface IAmountMint {
        function mint(uint256 amount) external payable;
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(abi)]
    interface IRecipientMint {
        function mint(address recipient, uint256 quantity) external payable;
    }
}

pub use IManifoldClaimExtension::Claim as ManifoldClaim;

impl From<ManifoldClaim> for ClaimTerms {
    fn from(claim: ManifoldClaim) -> Self {
        Self {
            cost: claim.cost,
            merkle_root: claim.merkleRoot,
            erc20: claim.erc20,
            start_date: claim.startDate.to::<u64>(),
            end_date: claim.endDate.to::<u64>(),
            wallet_max: claim.walletMax,
        }
    }
}

fn fragments(functions: BTreeMap<String, Vec<Function>>) -> Vec<Function> {
    functions.into_values().flatten().collect()
}

pub static ERC20_ABI: Lazy<Vec<Function>> = Lazy::new(|| fragments(IERC20::abi::functions()));

pub fn manifold_extension_abi() -> Vec<Function> {
    fragments(IManifoldClaimExtension::abi::functions())
}

pub fn price_discovery_abi() -> Vec<Function> {
    fragments(IPriceGetters::abi::functions())
}

pub fn amount_mint_abi() -> Vec<Function> {
    fragments(IAmountMint::abi::functions())
}

pub fn recipient_mint_abi() -> Vec<Function> {
    fragments(IRecipientMint::abi::functions())
}

pub fn nfts2me_price_abi() -> Vec<Function> {
    fragments(INfts2MePricing::abi::functions())
}

/// Find a function fragment by name.
pub fn find_function<'a>(abi: &'a [Function], name: &str) -> Option<&'a Function> {
    abi.iter().find(|function| function.name == name)
}
