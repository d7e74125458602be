//! Loading deployment configuration at process start.
//!
//! Configuration is read exactly once, either from the process environment
//! (optionally seeded from a `.env` file) or from a TOML file, and then passed
//! around explicitly as a [`DeployConfig`].

use crate::{
    error::ConfigError,
    network::{Environment, NetworkConfig, NetworkConfigBuilder},
    secret::SecretString,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Gas limit shared by all environments.
pub const GAS_LIMIT_VAR: &str = "GAS_LIMIT";
/// Gas price shared by all environments.
pub const GAS_PRICE_VAR: &str = "GAS_PRICE";

/// Gas settings applied to every environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GasSettings {
    /// Gas limit as a decimal string
    #[serde(default, deserialize_with = "numeric_string")]
    pub limit: Option<String>,
    /// Gas price in wei as a decimal string
    #[serde(default, deserialize_with = "numeric_string")]
    pub price: Option<String>,
}

/// Per-environment section of the TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EndpointSection {
    url: Option<String>,
    private_key: Option<SecretString>,
    mnemonic: Option<SecretString>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    gas: GasSettings,
    #[serde(default)]
    local: EndpointSection,
    #[serde(default)]
    testnet: EndpointSection,
    #[serde(default)]
    mainnet: EndpointSection,
}

/// One [`NetworkConfig`] per environment.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    local: NetworkConfig,
    testnet: NetworkConfig,
    mainnet: NetworkConfig,
}

impl DeployConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration from an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_lookup(|name| vars.get(name).cloned())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let gas = GasSettings {
            limit: lookup(GAS_LIMIT_VAR),
            price: lookup(GAS_PRICE_VAR),
        };
        let network = |env: Environment| {
            let prefix = env.env_prefix();
            let mut builder = NetworkConfigBuilder::new(env)
                .gas_limit(gas.limit.clone())
                .gas_price(gas.price.clone());
            if let Some(url) = lookup(&format!("{prefix}_URL")) {
                builder = builder.rpc_url(url);
            }
            if let Some(key) = lookup(&format!("{prefix}_PRIVATE_KEY")) {
                builder = builder.private_key(key);
            }
            if let Some(mnemonic) = lookup(&format!("{prefix}_MNEMONIC")) {
                builder = builder.mnemonic(mnemonic);
            }
            builder.build()
        };

        Self {
            local: network(Environment::Local),
            testnet: network(Environment::Testnet),
            mainnet: network(Environment::Mainnet),
        }
    }

    /// Read configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_file_config(file))
    }

    fn from_file_config(file: FileConfig) -> Self {
        let FileConfig {
            gas,
            local,
            testnet,
            mainnet,
        } = file;
        let network = |env: Environment, section: EndpointSection| {
            let mut builder = NetworkConfigBuilder::new(env)
                .gas_limit(gas.limit.clone())
                .gas_price(gas.price.clone());
            if let Some(url) = section.url {
                builder = builder.rpc_url(url);
            }
            if let Some(key) = section.private_key {
                builder = builder.private_key(key);
            }
            if let Some(mnemonic) = section.mnemonic {
                builder = builder.mnemonic(mnemonic);
            }
            builder.build()
        };

        Self {
            local: network(Environment::Local, local),
            testnet: network(Environment::Testnet, testnet),
            mainnet: network(Environment::Mainnet, mainnet),
        }
    }

    /// Configuration of `environment`.
    pub const fn network(&self, environment: Environment) -> &NetworkConfig {
        match environment {
            Environment::Local => &self.local,
            Environment::Testnet => &self.testnet,
            Environment::Mainnet => &self.mainnet,
        }
    }

    /// Consume into the per-environment configurations, in registry order.
    pub fn into_networks(self) -> [NetworkConfig; 3] {
        [self.local, self.testnet, self.mainnet]
    }
}

/// Load variables from a `.env` file without overriding ones already set.
///
/// With no explicit path, a missing `.env` in the working directory (or its
/// parents) is not an error. Returns the path that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)?;
            Ok(Some(path.to_path_buf()))
        }
        None => optional(dotenvy::dotenv()),
    }
}

/// A `.env` that does not exist is not an error when none was asked for.
fn optional(loaded: Result<PathBuf, dotenvy::Error>) -> Result<Option<PathBuf>, ConfigError> {
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Accept both `limit = 6721900` and `limit = "6721900"`.
fn numeric_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Str(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Int(n) => n.to_string(),
        Raw::Str(s) => s,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_from_vars() {
        let config = DeployConfig::from_vars([
            ("LOCAL_URL", "http://localhost:9500"),
            ("LOCAL_PRIVATE_KEY", KEY),
            ("TESTNET_URL", "https://api.s0.b.hmny.io"),
            ("MAINNET_MNEMONIC", "word word word"),
            ("GAS_LIMIT", "6721900"),
            ("GAS_PRICE", "1000000000"),
        ]);

        let local = config.network(Environment::Local);
        assert_eq!(local.rpc_url, "http://localhost:9500");
        assert_eq!(local.private_key.as_ref().unwrap().expose(), KEY);
        assert_eq!(local.gas_limit.as_deref(), Some("6721900"));
        assert_eq!(local.gas_price.as_deref(), Some("1000000000"));

        let testnet = config.network(Environment::Testnet);
        assert_eq!(testnet.rpc_url, "https://api.s0.b.hmny.io");
        assert!(!testnet.has_private_key());

        let mainnet = config.network(Environment::Mainnet);
        assert!(mainnet.rpc_url.is_empty());
        assert!(mainnet.has_mnemonic());
        assert!(!mainnet.has_private_key());
        assert_eq!(mainnet.gas_limit.as_deref(), Some("6721900"));
    }

    #[test]
    fn test_empty_vars_are_absent() {
        let config = DeployConfig::from_vars([("MAINNET_PRIVATE_KEY", ""), ("GAS_LIMIT", "")]);
        let mainnet = config.network(Environment::Mainnet);
        assert!(mainnet.private_key.is_none());
        assert!(mainnet.gas_limit.is_none());
    }

    #[test]
    fn test_whitespace_vars_are_absent() {
        let config = DeployConfig::from_vars([
            ("LOCAL_PRIVATE_KEY", "  "),
            ("GAS_LIMIT", "  "),
            ("GAS_PRICE", "\t"),
        ]);
        let local = config.network(Environment::Local);
        assert!(!local.has_private_key());
        assert!(local.gas_limit.is_none());
        assert!(local.gas_price.is_none());
    }

    #[test]
    fn test_network_ids_ignore_vars() {
        let config = DeployConfig::from_vars([
            ("LOCAL_URL", "https://api.s0.t.hmny.io"),
            ("MAINNET_URL", "http://localhost:9500"),
            ("MAINNET_PRIVATE_KEY", KEY),
        ]);

        assert_eq!(config.network(Environment::Local).network_id, "2");
        assert_eq!(config.network(Environment::Testnet).network_id, "2");
        assert_eq!(config.network(Environment::Mainnet).network_id, "1");
        assert_eq!(config.network(Environment::Mainnet).chain_id, 1);
    }

    #[test]
    fn test_file_matches_env() {
        let file: FileConfig = toml::from_str(&format!(
            r#"
            [gas]
            limit = 6721900
            price = "1000000000"

            [local]
            url = "http://localhost:9500"
            private_key = "{KEY}"
            "#
        ))
        .unwrap();
        let from_file = DeployConfig::from_file_config(file);
        let from_env = DeployConfig::from_vars([
            ("LOCAL_URL", "http://localhost:9500"),
            ("LOCAL_PRIVATE_KEY", KEY),
            ("GAS_LIMIT", "6721900"),
            ("GAS_PRICE", "1000000000"),
        ]);

        for env in Environment::ALL {
            let (a, b) = (from_file.network(env), from_env.network(env));
            assert_eq!(a.rpc_url, b.rpc_url);
            assert_eq!(a.private_key, b.private_key);
            assert_eq!(a.gas_limit, b.gas_limit);
            assert_eq!(a.gas_price, b.gas_price);
            assert_eq!(a.chain_params(), b.chain_params());
        }
    }

    #[test]
    fn test_file_rejects_chain_overrides() {
        let result = toml::from_str::<FileConfig>(
            r#"
            [mainnet]
            url = "http://localhost:9500"
            chain_id = 2
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = DeployConfig::from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_into_networks_order() {
        let networks = DeployConfig::from_vars(Vec::<(String, String)>::new()).into_networks();
        let envs: Vec<_> = networks.iter().map(|n| n.environment).collect();
        assert_eq!(envs, Environment::ALL);
    }

    fn write_env_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("deploy-{}-{name}.env", std::process::id()));
        std::fs::write(&path, contents).expect("Failed to write env file");
        path
    }

    #[test]
    fn test_load_explicit_env_file() {
        let var = format!("DEPLOY_ENV_FILE_{}_URL", std::process::id());
        let path = write_env_file("explicit", &format!("{var}=http://localhost:9500\n"));

        let loaded = load_env_file(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.as_deref(), Some(path.as_path()));
        assert_eq!(std::env::var(&var).unwrap(), "http://localhost:9500");
    }

    #[test]
    fn test_env_file_does_not_override() {
        let var = format!("DEPLOY_ENV_FILE_{}_PRIVATE_KEY", std::process::id());
        std::env::set_var(&var, "from-process");
        let path = write_env_file("override", &format!("{var}=from-file\n"));

        load_env_file(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(std::env::var(&var).unwrap(), "from-process");
    }

    #[test]
    fn test_missing_explicit_env_file() {
        let path = std::env::temp_dir().join("deploy-does-not-exist.env");
        let err = load_env_file(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile(ref e) if e.not_found()));
    }

    #[test]
    fn test_missing_implicit_env_file() {
        let path = std::env::temp_dir().join("deploy-does-not-exist.env");
        let loaded = optional(dotenvy::from_path(&path).map(|()| path.clone())).unwrap();
        assert!(loaded.is_none());
    }
}
