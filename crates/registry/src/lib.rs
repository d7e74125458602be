//! Network registry consumed by the deployment tool.
//!
//! Maps each deployment environment to its network id and a
//! [`ProviderFactory`]. The registry is built once from an explicit
//! [`DeployConfig`]; providers are only constructed when a factory is invoked.

mod error;
mod factory;

pub use error::Error;
pub use factory::ProviderFactory;

use client::Connector;
use config::{DeployConfig, Environment, NetworkConfig};
use std::sync::Arc;
use tracing::debug;

/// Registry entry for one environment.
pub struct NetworkEntry<C> {
    network_id: String,
    factory: ProviderFactory<C>,
}

impl<C: Connector> NetworkEntry<C> {
    fn new(config: NetworkConfig, connector: Arc<C>) -> Self {
        Self {
            network_id: config.network_id.clone(),
            factory: ProviderFactory::new(config, connector),
        }
    }

    pub fn environment(&self) -> Environment {
        self.factory.config().environment
    }

    /// Network id reported to the deployment tool.
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    pub fn config(&self) -> &NetworkConfig {
        self.factory.config()
    }

    pub const fn factory(&self) -> &ProviderFactory<C> {
        &self.factory
    }

    /// Invoke the factory. See [`ProviderFactory::provider`].
    pub fn provider(&self) -> Result<C::Provider, Error> {
        self.factory.provider()
    }
}

/// Mapping from environment to [`NetworkEntry`].
pub struct NetworkRegistry<C> {
    entries: [NetworkEntry<C>; 3],
}

impl<C: Connector> NetworkRegistry<C> {
    /// Build the registry. No provider is constructed here.
    pub fn new(config: DeployConfig, connector: C) -> Self {
        let connector = Arc::new(connector);
        let entries = config
            .into_networks()
            .map(|network| NetworkEntry::new(network, Arc::clone(&connector)));

        Self { entries }
    }

    /// Look up an environment by name.
    pub fn get(&self, name: &str) -> Result<&NetworkEntry<C>, Error> {
        let environment: Environment = name.parse()?;
        debug!(network = %environment, "Selected network");
        Ok(self.entry(environment))
    }

    pub const fn entry(&self, environment: Environment) -> &NetworkEntry<C> {
        // `DeployConfig::into_networks` yields local, testnet, mainnet.
        match environment {
            Environment::Local => &self.entries[0],
            Environment::Testnet => &self.entries[1],
            Environment::Mainnet => &self.entries[2],
        }
    }

    /// Entries in the order local, testnet, mainnet.
    pub fn iter(&self) -> impl Iterator<Item = &NetworkEntry<C>> {
        self.entries.iter()
    }
}
