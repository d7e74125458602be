//! Inspect and connect to deployment networks.
//!
//! - `list`: show every environment with its network id and chain parameters
//! - `signer`: build the selected network's provider and show the bound signer
//! - `status`: additionally query the RPC endpoint (chain ID, block, balance)

use alloy_primitives::utils::format_ether;
use clap::{Parser, Subcommand};
use deployer::{build_registry, check_status, load_config, summarize};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deployer")]
#[command(about = "Inspect and connect to deployment networks")]
struct Cli {
    /// Network to use (local, testnet or mainnet)
    #[arg(short, long, env = "DEPLOY_NETWORK", default_value = "local")]
    network: String,

    /// Path to a TOML configuration file. Environment variables are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a `.env` file loaded before reading environment variables
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all networks and their parameters
    List,

    /// Build the provider and show the active signer (no network calls)
    Signer,

    /// Build the provider and query the RPC endpoint
    Status,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = load_config(cli.config.as_deref(), cli.env_file.as_deref())?;
    let registry = build_registry(config);

    match cli.command {
        Command::List => {
            for network in summarize(&registry) {
                info!(
                    "{}: network_id={} shard_id={} chain_id={} url={} private_key={} mnemonic={}",
                    network.environment,
                    network.network_id,
                    network.shard_id,
                    network.chain_id,
                    if network.rpc_url.is_empty() { "<unset>" } else { network.rpc_url.as_str() },
                    if network.has_private_key { "set" } else { "unset" },
                    if network.has_mnemonic { "set (unused)" } else { "unset" },
                );
            }
        }
        Command::Signer => {
            let entry = registry.get(&cli.network)?;
            let provider = entry.provider()?;
            let chain = provider.chain_params();

            info!("Network: {}", provider.environment());
            info!("  Network ID: {}", provider.network_id());
            info!("  Shard ID: {}", chain.shard_id);
            info!("  Chain ID: {}", chain.chain_id);
            info!("  Signer: {}", provider.signer_address());
        }
        Command::Status => {
            let entry = registry.get(&cli.network)?;
            let provider = entry.provider()?;

            info!("Querying {} ({})...", provider.environment(), entry.config().rpc_url);
            let status = check_status(&provider).await?;

            info!("  Remote chain ID: {}", status.remote_chain_id);
            info!("  Latest block: {}", status.block_number);
            info!(
                "  Signer {} balance: {} ETH",
                provider.signer_address(),
                format_ether(status.signer_balance)
            );
            if !status.matches(&provider) {
                eyre::bail!(
                    "chain ID mismatch: configured {}, endpoint reports {}",
                    provider.chain_params().chain_id,
                    status.remote_chain_id
                );
            }
        }
    }

    Ok(())
}
