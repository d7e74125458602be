use crate::ClientError;
use alloy_network::EthereumWallet;
use alloy_primitives::{Address, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use config::{ChainParams, Environment};
use std::fmt;
use tracing::debug;
use url::Url;

/// Parsed gas settings applied to outgoing transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasParams {
    /// Gas limit per transaction
    pub limit: Option<u64>,
    /// Gas price in wei
    pub price: Option<u128>,
}

impl GasParams {
    /// Parse decimal gas settings. Unset values stay unset.
    pub fn parse(
        environment: Environment,
        limit: Option<&str>,
        price: Option<&str>,
    ) -> Result<Self, ClientError> {
        let limit = limit
            .map(|v| {
                v.trim().parse::<u64>().map_err(|e| {
                    ClientError::construction(environment, format!("invalid gas limit {v:?}: {e}"))
                })
            })
            .transpose()?;
        let price = price
            .map(|v| {
                v.trim().parse::<u128>().map_err(|e| {
                    ClientError::construction(environment, format!("invalid gas price {v:?}: {e}"))
                })
            })
            .transpose()?;

        Ok(Self { limit, price })
    }
}

/// Everything a [`Connector`] needs besides the signer.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionTarget<'a> {
    pub environment: Environment,
    pub network_id: &'a str,
    pub rpc_url: &'a str,
    pub chain: ChainParams,
    pub gas: GasParams,
}

/// Builds a provider bound to one network with `signer` as its active signer.
///
/// Implementations must not perform network calls.
pub trait Connector: Send + Sync {
    type Provider;

    fn connect(
        &self,
        target: &ConnectionTarget<'_>,
        signer: PrivateKeySigner,
    ) -> Result<Self::Provider, ClientError>;
}

/// Connector producing alloy HTTP providers with a local wallet.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    type Provider = DeployProvider;

    fn connect(
        &self,
        target: &ConnectionTarget<'_>,
        signer: PrivateKeySigner,
    ) -> Result<DeployProvider, ClientError> {
        let environment = target.environment;
        if target.rpc_url.trim().is_empty() {
            return Err(ClientError::construction(
                environment,
                format!("no RPC url configured (set {}_URL)", environment.env_prefix()),
            ));
        }
        let url = Url::parse(target.rpc_url.trim())
            .map_err(|e| ClientError::construction(environment, format!("invalid RPC url: {e}")))?;

        let signer_address = signer.address();
        let wallet = EthereumWallet::from(signer);

        debug!(network = %environment, url = %url, "Building HTTP provider");
        let inner = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(url)
            .erased();

        Ok(DeployProvider {
            inner,
            environment,
            network_id: target.network_id.to_string(),
            chain: target.chain,
            gas: target.gas,
            signer: signer_address,
        })
    }
}

/// A signing-capable provider bound to one deployment network.
#[derive(Clone)]
pub struct DeployProvider {
    inner: DynProvider,
    environment: Environment,
    network_id: String,
    chain: ChainParams,
    gas: GasParams,
    signer: Address,
}

impl DeployProvider {
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    /// Shard and chain identifiers this provider is bound to.
    pub const fn chain_params(&self) -> ChainParams {
        self.chain
    }

    pub const fn gas(&self) -> GasParams {
        self.gas
    }

    /// Address of the active signer.
    pub const fn signer_address(&self) -> Address {
        self.signer
    }

    /// The underlying alloy provider, with the signer's wallet attached.
    ///
    /// Requests sent through it directly get alloy's gas estimates. Pass them
    /// through [`Self::prepare_request`] first to apply `GAS_LIMIT` and `GAS_PRICE`.
    pub const fn inner(&self) -> &DynProvider {
        &self.inner
    }

    /// Transaction request pre-filled with signer, chain ID and configured gas settings.
    pub fn transaction_request(&self) -> TransactionRequest {
        self.prepare_request(TransactionRequest::default())
    }

    /// Fill signer, chain ID and configured gas settings where `tx` leaves them unset.
    pub fn prepare_request(&self, mut tx: TransactionRequest) -> TransactionRequest {
        if tx.from.is_none() {
            tx.from = Some(self.signer);
        }
        if tx.chain_id.is_none() {
            tx.chain_id = Some(self.chain.chain_id);
        }
        if tx.gas.is_none() {
            tx.gas = self.gas.limit;
        }
        if tx.gas_price.is_none() {
            tx.gas_price = self.gas.price;
        }
        tx
    }

    /// Chain ID reported by the RPC endpoint.
    pub async fn remote_chain_id(&self) -> Result<u64, ClientError> {
        self.inner
            .get_chain_id()
            .await
            .map_err(|e| ClientError::Connection(format!("{e}")))
    }

    /// Latest block number.
    pub async fn block_number(&self) -> Result<u64, ClientError> {
        self.inner
            .get_block_number()
            .await
            .map_err(|e| ClientError::Connection(format!("{e}")))
    }

    /// Native balance of the active signer.
    pub async fn signer_balance(&self) -> Result<U256, ClientError> {
        self.inner
            .get_balance(self.signer)
            .await
            .map_err(|e| ClientError::Connection(format!("{e}")))
    }
}

impl fmt::Debug for DeployProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployProvider")
            .field("environment", &self.environment)
            .field("network_id", &self.network_id)
            .field("chain", &self.chain)
            .field("gas", &self.gas)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}
