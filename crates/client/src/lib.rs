//! Signing provider construction for deployment networks.
//!
//! The concrete transport sits behind the [`Connector`] trait so that
//! callers can swap in a mock when no RPC endpoint is available.

mod provider;

use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use config::{Environment, SecretString};
pub use provider::{ConnectionTarget, Connector, DeployProvider, GasParams, HttpConnector};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// No private key configured for the environment
    #[error("Missing private key for {environment}: set {}_PRIVATE_KEY", .environment.env_prefix())]
    MissingCredential { environment: Environment },

    /// Private key present but not usable for account derivation
    #[error("Invalid private key for {environment}: {reason}")]
    MalformedCredential {
        environment: Environment,
        reason: String,
    },

    /// RPC url or network parameters rejected while building the provider
    #[error("Failed to construct provider for {environment}: {reason}")]
    ProviderConstruction {
        environment: Environment,
        reason: String,
    },

    /// Error talking to the RPC endpoint
    #[error("Connection error: {0}")]
    Connection(String),
}

impl ClientError {
    pub(crate) fn construction(environment: Environment, reason: impl Into<String>) -> Self {
        Self::ProviderConstruction {
            environment,
            reason: reason.into(),
        }
    }
}

/// Derive the signing account for `environment` from its private key.
///
/// The key must be hex encoded, with or without `0x` prefix. The returned
/// signer is bound to `chain_id` for EIP-155 replay protection.
pub fn signer_from_key(
    environment: Environment,
    private_key: Option<&SecretString>,
    chain_id: u64,
) -> Result<PrivateKeySigner, ClientError> {
    let key = private_key
        .filter(|key| !key.is_empty())
        .ok_or(ClientError::MissingCredential { environment })?;

    let signer: PrivateKeySigner =
        key.expose()
            .trim()
            .parse()
            .map_err(|e| ClientError::MalformedCredential {
                environment,
                reason: format!("{e}"),
            })?;

    Ok(signer.with_chain_id(Some(chain_id)))
}
