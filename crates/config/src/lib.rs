//! Configuration types for the deployment network registry.
//!
//! This crate provides:
//! - Deployment environments (local, testnet, mainnet) and their fixed chain parameters
//! - Per-environment network configuration with redacted credentials
//! - Loading from environment variables, `.env` files and TOML files

pub mod env;
pub mod error;
pub mod network;
pub mod secret;

pub use env::{load_env_file, DeployConfig, GasSettings};
pub use error::ConfigError;
pub use network::{ChainParams, Environment, NetworkConfig, NetworkConfigBuilder};
pub use secret::SecretString;
