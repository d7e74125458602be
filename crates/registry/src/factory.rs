use crate::Error;
use client::{ConnectionTarget, Connector, GasParams};
use config::NetworkConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Zero-argument constructor of a signing provider for one network.
///
/// Each call builds a fresh provider; nothing is cached between calls.
pub struct ProviderFactory<C> {
    config: Arc<NetworkConfig>,
    connector: Arc<C>,
}

impl<C> Clone for ProviderFactory<C> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            connector: Arc::clone(&self.connector),
        }
    }
}

impl<C: Connector> ProviderFactory<C> {
    pub(crate) fn new(config: NetworkConfig, connector: Arc<C>) -> Self {
        Self {
            config: Arc::new(config),
            connector,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Build a provider with the network's signing account bound as active signer.
    ///
    /// Fails before reaching the connector when the private key is missing or
    /// malformed, or when the gas settings are not numeric.
    pub fn provider(&self) -> Result<C::Provider, Error> {
        let config = &*self.config;
        let environment = config.environment;

        if config.has_mnemonic() {
            warn!(network = %environment, "Mnemonic is configured but unused, signing with the private key");
        }

        let signer =
            client::signer_from_key(environment, config.private_key.as_ref(), config.chain_id)?;
        let gas = GasParams::parse(
            environment,
            config.gas_limit.as_deref(),
            config.gas_price.as_deref(),
        )?;

        let target = ConnectionTarget {
            environment,
            network_id: &config.network_id,
            rpc_url: &config.rpc_url,
            chain: config.chain_params(),
            gas,
        };
        let signer_address = signer.address();
        let provider = self.connector.connect(&target, signer)?;

        info!(
            network = %environment,
            network_id = %config.network_id,
            shard_id = config.shard_id,
            chain_id = config.chain_id,
            signer = %signer_address,
            "Provider constructed"
        );

        Ok(provider)
    }
}
