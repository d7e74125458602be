//! Network configuration for deployment environments.
//!
//! Provides the fixed chain parameters of each environment together with the
//! endpoint, credentials and gas settings read at process start.

use crate::{error::ConfigError, secret::SecretString};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Deployment environment selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Testnet,
    Mainnet,
}

impl Environment {
    /// All environments, in registry order.
    pub const ALL: [Self; 3] = [Self::Local, Self::Testnet, Self::Mainnet];

    /// Lowercase name used on the command line and in config files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        }
    }

    /// Prefix of the environment variables belonging to this environment.
    pub const fn env_prefix(self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Testnet => "TESTNET",
            Self::Mainnet => "MAINNET",
        }
    }

    /// Network id reported to the deployment tool.
    pub const fn network_id(self) -> &'static str {
        match self {
            Self::Local | Self::Testnet => "2",
            Self::Mainnet => "1",
        }
    }

    /// Shard and chain identifiers transactions are bound to.
    pub const fn chain_params(self) -> ChainParams {
        match self {
            Self::Local | Self::Testnet => ChainParams {
                shard_id: 0,
                chain_id: 2,
            },
            Self::Mainnet => ChainParams {
                shard_id: 0,
                chain_id: 1,
            },
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|env| env.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownEnvironment(s.to_string()))
    }
}

/// Shard and chain identifiers of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    /// Shard the transactions target
    pub shard_id: u32,
    /// Chain ID used for replay protection
    pub chain_id: u64,
}

/// Complete configuration of one deployment environment.
///
/// `network_id`, `shard_id` and `chain_id` always come from the
/// [`Environment`]; only the endpoint, credentials and gas settings are
/// read from the outside.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Environment this configuration belongs to
    pub environment: Environment,
    /// Network id reported to the deployment tool
    pub network_id: String,
    /// RPC endpoint url, empty when not configured
    pub rpc_url: String,
    /// Mnemonic phrase. Read but never used for signing.
    pub mnemonic: Option<SecretString>,
    /// Hex encoded private key of the deploying account
    pub private_key: Option<SecretString>,
    /// Shard ID
    pub shard_id: u32,
    /// Chain ID
    pub chain_id: u64,
    /// Gas limit as a decimal string
    pub gas_limit: Option<String>,
    /// Gas price in wei as a decimal string
    pub gas_price: Option<String>,
}

impl NetworkConfig {
    /// Configuration with the environment's constants and nothing else set.
    pub fn new(environment: Environment) -> Self {
        let ChainParams { shard_id, chain_id } = environment.chain_params();
        Self {
            environment,
            network_id: environment.network_id().to_string(),
            rpc_url: String::new(),
            mnemonic: None,
            private_key: None,
            shard_id,
            chain_id,
            gas_limit: None,
            gas_price: None,
        }
    }

    /// Bound shard and chain identifiers.
    pub const fn chain_params(&self) -> ChainParams {
        ChainParams {
            shard_id: self.shard_id,
            chain_id: self.chain_id,
        }
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.as_ref().is_some_and(|key| !key.is_empty())
    }

    pub fn has_mnemonic(&self) -> bool {
        self.mnemonic.as_ref().is_some_and(|m| !m.is_empty())
    }
}

/// Builder for network configurations.
#[derive(Debug, Clone)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Start from the defaults of `environment`.
    pub fn new(environment: Environment) -> Self {
        Self {
            config: NetworkConfig::new(environment),
        }
    }

    pub fn local() -> Self {
        Self::new(Environment::Local)
    }

    pub fn testnet() -> Self {
        Self::new(Environment::Testnet)
    }

    pub fn mainnet() -> Self {
        Self::new(Environment::Mainnet)
    }

    /// Set the RPC endpoint url.
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.config.rpc_url = url.into();
        self
    }

    /// Set the signing private key. Empty values are treated as absent.
    pub fn private_key(mut self, key: impl Into<SecretString>) -> Self {
        self.config.private_key = non_empty(key.into());
        self
    }

    /// Set the mnemonic phrase. Empty values are treated as absent.
    pub fn mnemonic(mut self, mnemonic: impl Into<SecretString>) -> Self {
        self.config.mnemonic = non_empty(mnemonic.into());
        self
    }

    /// Set the gas limit.
    pub fn gas_limit(mut self, limit: Option<String>) -> Self {
        self.config.gas_limit = limit.filter(|v| !v.trim().is_empty());
        self
    }

    /// Set the gas price.
    pub fn gas_price(mut self, price: Option<String>) -> Self {
        self.config.gas_price = price.filter(|v| !v.trim().is_empty());
        self
    }

    /// Build the network configuration.
    pub fn build(self) -> NetworkConfig {
        self.config
    }
}

fn non_empty(secret: SecretString) -> Option<SecretString> {
    (!secret.is_empty()).then_some(secret)
}
