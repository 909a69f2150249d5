//! Connection manager: one RPC endpoint and an optional signing identity.

use std::time::Duration;

use alloy::{
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
};
use tokio::sync::OnceCell;

use crate::{
    config::{Config, GasSettings, NetworkTable},
    error::{AppError, Result},
    ethereum::{
        constants::{DEFAULT_POLL_INTERVAL_MS, UNKNOWN_NETWORK_NAME},
        subscription::Subscription,
        WalletManager,
    },
    types::{format_ether, NetworkInfo},
};

/// Owns the RPC binding and the signing identity shared by every contract binding.
///
/// Construction makes no network calls. [`ConnectionManager::initialize`] contacts
/// the node; until it succeeds every RPC accessor fails with
/// [`AppError::NotInitialized`].
pub struct ConnectionManager {
    rpc_url: String,
    /// Read-only provider.
    provider: DynProvider,
    /// Provider that signs with `wallet`.
    signer_provider: Option<DynProvider>,
    wallet: Option<WalletManager>,
    expected_chain_id: Option<u64>,
    networks: NetworkTable,
    gas: GasSettings,
    poll_interval: Duration,
    /// Set once the node answered with its chain ID.
    chain_id: OnceCell<u64>,
}

impl ConnectionManager {
    /// Create a connection manager for `rpc_url`.
    ///
    /// A non-empty `private_key` derives the signing identity.
    pub fn new(rpc_url: &str, private_key: Option<&str>) -> Result<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

        let provider = ProviderBuilder::new().connect_http(url.clone()).erased();

        let wallet = private_key
            .filter(|k| !k.trim().is_empty())
            .map(WalletManager::from_private_key)
            .transpose()?;

        let signer_provider = wallet.as_ref().map(|w| {
            ProviderBuilder::new().wallet(w.ethereum_wallet()).connect_http(url.clone()).erased()
        });

        tracing::info!(
            rpc_url = %rpc_url,
            signer = wallet.is_some(),
            "Connection manager created (lazy initialization)"
        );

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            provider,
            signer_provider,
            wallet,
            expected_chain_id: None,
            networks: NetworkTable::default(),
            gas: GasSettings::default(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            chain_id: OnceCell::new(),
        })
    }

    /// Create a connection manager from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut manager = Self::new(&config.rpc_url, config.private_key.as_deref())?;
        manager.expected_chain_id = Some(config.chain_id);
        manager.networks = config.networks.clone();
        manager.gas = config.gas;
        manager.poll_interval = config.poll_interval;
        Ok(manager)
    }

    /// Contact the node and record its chain ID.
    ///
    /// Fails with [`AppError::Connection`] if the endpoint is unreachable or its
    /// network descriptor is malformed. Calling again after success is a no-op.
    pub async fn initialize(&self) -> Result<()> {
        let chain_id = self
            .chain_id
            .get_or_try_init(|| async {
                let chain_id = self.provider.get_chain_id().await.map_err(|e| {
                    tracing::error!(rpc_url = %self.rpc_url, error = %e, "Failed to initialize provider");
                    AppError::connection(&self.rpc_url, e)
                })?;
                Ok::<_, AppError>(chain_id)
            })
            .await
            .copied()?;

        tracing::info!(
            network = %self.network_name(chain_id),
            chain_id = chain_id,
            rpc_url = %self.rpc_url,
            "Connected to network"
        );

        if let Some(expected) = self.expected_chain_id.filter(|expected| *expected != chain_id) {
            tracing::warn!(
                expected = expected,
                actual = chain_id,
                "Connected chain ID differs from configuration"
            );
        }

        Ok(())
    }

    /// Whether [`ConnectionManager::initialize`] has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.chain_id.initialized()
    }

    /// The active read-only RPC binding.
    pub fn connection(&self) -> Result<&DynProvider> {
        if self.is_initialized() {
            Ok(&self.provider)
        } else {
            Err(AppError::NotInitialized { component: "connection" })
        }
    }

    /// The RPC binding that signs with the configured identity.
    pub fn signer_connection(&self) -> Result<&DynProvider> {
        self.connection()?;
        self.signer_provider.as_ref().ok_or(AppError::NoSigningIdentity)
    }

    /// Whether a signing identity was configured.
    pub fn has_signing_identity(&self) -> bool {
        self.wallet.is_some()
    }

    /// The configured signing identity.
    pub fn signing_identity(&self) -> Result<&WalletManager> {
        self.wallet.as_ref().ok_or(AppError::NoSigningIdentity)
    }

    /// Public address of the signing identity.
    pub fn address(&self) -> Result<Address> {
        self.signing_identity().map(WalletManager::address)
    }

    /// Balance in ether of `address`, or of the signing identity if omitted.
    pub async fn get_balance(&self, address: Option<Address>) -> Result<String> {
        let address = match address {
            Some(address) => address,
            None => self.address()?,
        };

        let balance = self.connection()?.get_balance(address).await.map_err(|e| {
            tracing::error!(address = %address, error = %e, "Failed to query balance");
            AppError::remote_call("provider", "getBalance", vec![address.to_string()], e)
        })?;

        tracing::debug!(address = %address, balance = %balance, "Queried balance");

        Ok(format_ether(balance))
    }

    /// Network name, chain ID and latest block height.
    pub async fn get_network_info(&self) -> Result<NetworkInfo> {
        let provider = self.connection()?;

        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| AppError::remote_call("provider", "getChainId", vec![], e))?;
        let block_number = provider
            .get_block_number()
            .await
            .map_err(|e| AppError::remote_call("provider", "getBlockNumber", vec![], e))?;

        Ok(NetworkInfo { name: self.network_name(chain_id), chain_id, block_number })
    }

    /// Invoke `callback` once per new block height, in order.
    ///
    /// Heights are polled every [`ConnectionManager::poll_interval`]; blocks mined
    /// between polls are reported individually.
    pub fn on_block<F>(&self, callback: F) -> Result<Subscription>
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        let provider = self.connection()?.clone();
        let poll_interval = self.poll_interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            let mut last_seen: Option<u64> = None;
            loop {
                ticker.tick().await;
                let current = match provider.get_block_number().await {
                    Ok(n) => n,
                    Err(e) => {
                        tracing::warn!(error = %e, "Block poll failed");
                        continue;
                    }
                };

                if let Some(last) = last_seen.filter(|last| current > *last) {
                    (last + 1..=current).for_each(&callback);
                }
                last_seen = Some(last_seen.map_or(current, |last| last.max(current)));
            }
        });

        tracing::info!("Listening for new blocks");

        Ok(Subscription::new("block", &task))
    }

    /// Endpoint URL.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Gas parameters for transactions.
    pub fn gas(&self) -> GasSettings {
        self.gas
    }

    /// Poll interval for watchers.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    fn network_name(&self, chain_id: u64) -> String {
        self.networks
            .by_chain_id(chain_id)
            .map(|n| n.display_name.clone())
            .unwrap_or_else(|| UNKNOWN_NETWORK_NAME.to_string())
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("rpc_url", &self.rpc_url)
            .field("wallet", &self.wallet)
            .field("chain_id", &self.chain_id.get())
            .finish()
    }
}
