use alloy_primitives::U256;
use client::{DeployProvider, HttpConnector};
use config::{DeployConfig, Environment};
use registry::NetworkRegistry;
use std::path::Path;
use tracing::{info, warn};

/// Read the deployment configuration once at process start.
///
/// A TOML file takes precedence. Otherwise variables come from the process
/// environment, seeded from `env_file` or a `.env` in the working directory.
pub fn load_config(
    config_path: Option<&Path>,
    env_file: Option<&Path>,
) -> eyre::Result<DeployConfig> {
    if let Some(path) = config_path {
        info!("Loading config: {}", path.display());
        return Ok(DeployConfig::from_file(path)?);
    }

    if let Some(loaded) = config::load_env_file(env_file)? {
        info!("Loaded env file: {}", loaded.display());
    }

    Ok(DeployConfig::from_env())
}

/// Registry backed by alloy HTTP providers.
pub fn build_registry(config: DeployConfig) -> NetworkRegistry<HttpConnector> {
    NetworkRegistry::new(config, HttpConnector)
}

/// Non-secret view of one registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSummary {
    pub environment: Environment,
    pub network_id: String,
    pub rpc_url: String,
    pub shard_id: u32,
    pub chain_id: u64,
    pub has_private_key: bool,
    pub has_mnemonic: bool,
}

pub fn summarize(registry: &NetworkRegistry<HttpConnector>) -> Vec<NetworkSummary> {
    registry
        .iter()
        .map(|entry| {
            let config = entry.config();
            NetworkSummary {
                environment: config.environment,
                network_id: entry.network_id().to_string(),
                rpc_url: config.rpc_url.clone(),
                shard_id: config.shard_id,
                chain_id: config.chain_id,
                has_private_key: config.has_private_key(),
                has_mnemonic: config.has_mnemonic(),
            }
        })
        .collect()
}

/// Remote state of a network as seen through its provider.
#[derive(Debug, Clone)]
pub struct NetworkStatus {
    pub remote_chain_id: u64,
    pub block_number: u64,
    pub signer_balance: U256,
}

impl NetworkStatus {
    /// Whether the endpoint serves the chain the provider is bound to.
    pub const fn matches(&self, provider: &DeployProvider) -> bool {
        self.remote_chain_id == provider.chain_params().chain_id
    }
}

/// Query the endpoint behind `provider`. This is the only place the CLI touches the network.
pub async fn check_status(provider: &DeployProvider) -> eyre::Result<NetworkStatus> {
    let remote_chain_id = provider.remote_chain_id().await?;
    let block_number = provider.block_number().await?;
    let signer_balance = provider.signer_balance().await?;

    let status = NetworkStatus {
        remote_chain_id,
        block_number,
        signer_balance,
    };
    if !status.matches(provider) {
        warn!(
            network = %provider.environment(),
            expected = provider.chain_params().chain_id,
            actual = remote_chain_id,
            "RPC endpoint reports a different chain ID"
        );
    }

    Ok(status)
}
