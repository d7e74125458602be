use client::ClientError;
use config::ConfigError;
use thiserror::Error;

/// Failure to select a network or to build its provider.
///
/// Every error surfaces synchronously to the caller and leaves no partial state.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown environment name or unreadable configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Missing or malformed credential, or provider construction rejected
    #[error(transparent)]
    Client(#[from] ClientError),
}
