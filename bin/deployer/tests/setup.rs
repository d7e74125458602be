//! Common test setup utilities shared across integration tests.
#![allow(dead_code)]

use client::HttpConnector;
use config::DeployConfig;
use registry::NetworkRegistry;

/// Well-known development key (anvil/hardhat account #0). Never holds real funds.
pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address derived from [`DEV_KEY`].
pub const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Registry built from an explicit set of variables instead of the process environment.
pub fn registry_from_vars(vars: &[(&str, &str)]) -> NetworkRegistry<HttpConnector> {
    deployer::build_registry(DeployConfig::from_vars(vars.iter().copied()))
}

/// Write `contents` to a fresh file under the system temp directory.
pub fn write_temp_config(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("deployer-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, contents).expect("Failed to write temp config");
    path
}
