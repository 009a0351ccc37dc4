use std::path::PathBuf;

use alloy_primitives::{Address, B256, U256};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mintquote_engine::{DiscoveryConfig, PriceDiscoveryEngine, ScriptedReadClient, builtin_registry, config::default_config_path, lookup};
use mintquote_types::{MintParams, NftContractInfo};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mintquote", version, about = "Quote NFT mint costs across minting providers")]
struct Cli {
    /// Discovery config file; defaults to MINTQUOTE_CONFIG_PATH or the user config dir
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered minting providers
    Providers,
    /// Print the effective discovery configuration
    Config,
    /// Quote a mint against chain state replayed from a fixture
    Quote(QuoteArgs),
}

#[derive(Debug, Args)]
struct QuoteArgs {
    /// JSON fixture of scripted chain read responses
    #[arg(long, short = 'f')]
    fixture: PathBuf,
    /// Provider key (unknown keys use the generic provider)
    #[arg(long, short = 'p', default_value = "generic")]
    provider: String,
    #[arg(long)]
    contract: Address,
    #[arg(long, default_value_t = 8453)]
    chain_id: u64,
    #[arg(long, default_value_t = 1)]
    amount: u64,
    #[arg(long)]
    recipient: Option<Address>,
    #[arg(long)]
    instance_id: Option<U256>,
    #[arg(long)]
    token_id: Option<u32>,
    /// Comma separated merkle proof hashes
    #[arg(long, value_delimiter = ',')]
    merkle_proof: Vec<B256>,
    /// Extension contract brokering the mint
    #[arg(long)]
    extension: Option<Address>,
    /// Also print the mint transaction plan
    #[arg(long)]
    plan: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Providers => print_providers(),
        Command::Config => print_config(cli.config.as_ref(), &config),
        Command::Quote(args) => run_quote(config, args).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&PathBuf>) -> Result<DiscoveryConfig> {
    match path {
        Some(path) => DiscoveryConfig::load_from(path).with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(DiscoveryConfig::load()),
    }
}

fn print_providers() -> Result<()> {
    println!("{:<10} {:<15} {:<6} CANDIDATES", "PROVIDER", "STRATEGY", "ERC20");
    for config in builtin_registry().configs() {
        let strategy = serde_json::to_value(config.price_discovery.strategy)?;
        println!(
            "{:<10} {:<15} {:<6} {}",
            config.name,
            strategy.as_str().unwrap_or_default(),
            if config.supports_erc20 { "yes" } else { "no" },
            config.price_discovery.function_names.join(", ")
        );
    }
    Ok(())
}

fn print_config(path: Option<&PathBuf>, config: &DiscoveryConfig) -> Result<()> {
    let path = path.cloned().unwrap_or_else(default_config_path);
    let out = serde_json::json!({
        "path": path.display().to_string(),
        "config": config,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

async fn run_quote(config: DiscoveryConfig, args: QuoteArgs) -> Result<()> {
    let client = ScriptedReadClient::from_fixture_path(&args.fixture)?;
    debug!(fixture = %args.fixture.display(), "loaded read fixture");

    let mut params = MintParams::new(args.contract, args.chain_id)
        .with_amount(args.amount)
        .with_merkle_proof(args.merkle_proof);
    params.recipient = args.recipient;
    params.instance_id = args.instance_id;
    params.token_id = args.token_id;

    let mut contract_info = NftContractInfo::new(args.provider, args.contract);
    contract_info.extension_address = args.extension;

    let engine = PriceDiscoveryEngine::new(config);
    let quote = engine
        .fetch_price_data(&client, &params, &mut contract_info)
        .await
        .context("price discovery rejected the token data")?;
    info!(reads = client.calls().len(), "quote finished");

    let mut out = serde_json::json!({
        "quote": quote,
        "contractInfo": contract_info,
    });
    if args.plan {
        let plan = lookup(&contract_info.provider).mint_plan(&params, &contract_info, &quote)?;
        out["mintPlan"] = serde_json::to_value(plan)?;
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quote_arguments() {
        let cli = Cli::try_parse_from([
            "mintquote",
            "quote",
            "--fixture",
            "reads.json",
            "--provider",
            "manifold",
            "--contract",
            "0x1111111111111111111111111111111111111111",
            "--instance-id",
            "4113376496",
            "--merkle-proof",
            "0x0000000000000000000000000000000000000000000000000000000000000001,0x0000000000000000000000000000000000000000000000000000000000000002",
            "--plan",
        ])
        .expect("parse cli");

        let Command::Quote(args) = cli.command else {
            panic!("expected quote command");
        };
        assert_eq!(args.provider, "manifold");
        assert_eq!(args.chain_id, 8453);
        assert_eq!(args.amount, 1);
        assert_eq!(args.instance_id, Some(U256::from(4_113_376_496u64)));
        assert_eq!(args.merkle_proof.len(), 2);
        assert!(args.plan);
    }

    #[tokio::test]
    async fn bundled_manifold_fixture_quotes_erc20_claim() {
        let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/manifold-erc20-claim.json");
        let client = ScriptedReadClient::from_fixture_path(fixture).expect("load fixture");
        let contract: Address = "0x1111111111111111111111111111111111111111".parse().unwrap();
        let wallet: Address = "0xb0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0".parse().unwrap();
        let params = MintParams::new(contract, 8453).with_instance_id(U256::from(1u64)).with_recipient(wallet);
        let mut info = NftContractInfo::new("manifold", contract).with_extension(mintquote_engine::provider::MANIFOLD_EXTENSION);

        let quote = PriceDiscoveryEngine::default()
            .fetch_price_data(&client, &params, &mut info)
            .await
            .expect("quote");

        let details = quote.erc20_details.expect("erc20 details");
        assert_eq!(details.symbol, "USDC");
        assert_eq!(details.allowance, Some(U256::ZERO));
        assert_eq!(details.balance, Some(U256::from(5_000_000u64)));
        assert_eq!(quote.total_cost, U256::from(500_000_000_000_000u64));
        assert_eq!(info.claim.map(|claim| claim.cost), Some(U256::from(2_000_000u64)));
    }

    #[test]
    fn rejects_malformed_addresses() {
        let result = Cli::try_parse_from(["mintquote", "quote", "--fixture", "reads.json", "--contract", "0x1234"]);
        assert!(result.is_err());
    }
}
