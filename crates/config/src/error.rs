use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The requested environment is not one of local, testnet or mainnet
    #[error("Unknown environment: {0:?} (expected one of local, testnet, mainnet)")]
    UnknownEnvironment(String),

    /// Error reading a configuration file
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a configuration file
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Error loading a `.env` file
    #[error("Failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}
