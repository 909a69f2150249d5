//! Configuration management module.
//!
//! Handles loading configuration from environment variables. Every value is
//! optional; missing values fall back to the selected network preset and then
//! to fixed defaults.

use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

use alloy::primitives::Address;

use crate::{
    error::AppError,
    ethereum::constants::{
        DEFAULT_CHAIN_ID, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE_WEI, DEFAULT_POLL_INTERVAL_MS,
        DEFAULT_RPC_URL, LOCALHOST_CHAIN_ID, MAINNET_CHAIN_ID, SEPOLIA_CHAIN_ID,
    },
};

/// Logical name of the Counter contract in [`Config::contracts`].
pub const COUNTER_CONTRACT: &str = "counter";

/// Connection details of a named network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPreset {
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Chain identifier.
    pub chain_id: u64,
    /// Human-readable network name.
    pub display_name: String,
}

impl NetworkPreset {
    fn new(rpc_url: &str, chain_id: u64, display_name: &str) -> Self {
        Self { rpc_url: rpc_url.to_string(), chain_id, display_name: display_name.to_string() }
    }
}

/// Known networks keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTable {
    networks: BTreeMap<String, NetworkPreset>,
}

impl NetworkTable {
    /// Get a preset by network name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&NetworkPreset> {
        self.networks.get(&name.to_lowercase())
    }

    /// Find the preset whose chain id matches.
    pub fn by_chain_id(&self, chain_id: u64) -> Option<&NetworkPreset> {
        self.networks.values().find(|n| n.chain_id == chain_id)
    }

    /// Iterate over `(name, preset)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NetworkPreset)> {
        self.networks.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for NetworkTable {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(
            "mainnet".to_string(),
            NetworkPreset::new(
                "https://mainnet.infura.io/v3/YOUR_PROJECT_ID",
                MAINNET_CHAIN_ID,
                "Ethereum Mainnet",
            ),
        );
        networks.insert(
            "sepolia".to_string(),
            NetworkPreset::new(
                "https://sepolia.infura.io/v3/YOUR_PROJECT_ID",
                SEPOLIA_CHAIN_ID,
                "Sepolia Testnet",
            ),
        );
        networks.insert(
            "localhost".to_string(),
            NetworkPreset::new(DEFAULT_RPC_URL, LOCALHOST_CHAIN_ID, "Local Development"),
        );
        Self { networks }
    }
}

/// Gas parameters applied to every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSettings {
    /// Gas ceiling per transaction.
    pub limit: u64,
    /// Gas price in wei.
    pub price: u128,
}

impl Default for GasSettings {
    fn default() -> Self {
        Self { limit: DEFAULT_GAS_LIMIT, price: DEFAULT_GAS_PRICE_WEI }
    }
}

/// Application configuration. Immutable once loaded.
#[derive(Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Private key for the signing identity (hex, 0x prefix optional).
    pub private_key: Option<String>,
    /// Expected chain ID.
    pub chain_id: u64,
    /// Gas parameters for writes.
    pub gas: GasSettings,
    /// Deployed contract addresses by logical name.
    pub contracts: BTreeMap<String, Address>,
    /// Known networks.
    pub networks: NetworkTable,
    /// Poll interval for event and block watchers.
    pub poll_interval: Duration,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `NETWORK`: preset name (`mainnet`, `sepolia`, `localhost`)
    /// - `RPC_URL`: JSON-RPC endpoint (default: preset, else `http://localhost:8545`)
    /// - `PRIVATE_KEY`: private key; empty or unset means read-only
    /// - `CHAIN_ID`: expected chain ID (default: preset, else 1)
    /// - `GAS_LIMIT`: gas ceiling (default: 300000)
    /// - `GAS_PRICE`: gas price in wei (default: 20000000000)
    /// - `COUNTER_CONTRACT_ADDRESS`: deployed Counter address
    /// - `EVENT_POLL_INTERVAL_MS`: watcher poll interval (default: 1000)
    /// - `LOG_LEVEL`: logging level (default: info)
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let networks = NetworkTable::default();

        let preset = match var("NETWORK") {
            Some(name) => Some(
                networks
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| AppError::Config(format!("Unknown network: {}", name)))?,
            ),
            None => None,
        };

        let rpc_url = var("RPC_URL")
            .or_else(|| preset.as_ref().map(|p| p.rpc_url.clone()))
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());

        let private_key = var("PRIVATE_KEY");

        let chain_id = match var("CHAIN_ID") {
            Some(v) => parse_number("CHAIN_ID", &v)?,
            None => preset.as_ref().map(|p| p.chain_id).unwrap_or(DEFAULT_CHAIN_ID),
        };

        let gas = GasSettings {
            limit: var("GAS_LIMIT")
                .map(|v| parse_number("GAS_LIMIT", &v))
                .transpose()?
                .unwrap_or(DEFAULT_GAS_LIMIT),
            price: var("GAS_PRICE")
                .map(|v| parse_number("GAS_PRICE", &v))
                .transpose()?
                .unwrap_or(DEFAULT_GAS_PRICE_WEI),
        };

        let mut contracts = BTreeMap::new();
        if let Some(raw) = var("COUNTER_CONTRACT_ADDRESS") {
            contracts.insert(
                COUNTER_CONTRACT.to_string(),
                parse_address("COUNTER_CONTRACT_ADDRESS", &raw)?,
            );
        }

        let poll_interval = Duration::from_millis(
            var("EVENT_POLL_INTERVAL_MS")
                .map(|v| parse_number("EVENT_POLL_INTERVAL_MS", &v))
                .transpose()?
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        );

        let log_level = var("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            rpc_url,
            private_key,
            chain_id,
            gas,
            contracts,
            networks,
            poll_interval,
            log_level,
        })
    }

    /// Address of a contract by logical name.
    pub fn contract(&self, name: &str) -> Option<Address> {
        self.contracts.get(name).copied()
    }

    /// Address of the Counter contract, if configured.
    pub fn counter_address(&self) -> Option<Address> {
        self.contract(COUNTER_CONTRACT)
    }

    /// Whether a private key was supplied.
    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("chain_id", &self.chain_id)
            .field("gas", &self.gas)
            .field("contracts", &self.contracts)
            .field("poll_interval", &self.poll_interval)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, value, e)))
}

/// Parse and validate an Ethereum address (0x + 40 hex characters).
fn parse_address(key: &str, value: &str) -> Result<Address, AppError> {
    if !value.starts_with("0x") && !value.starts_with("0X") {
        return Err(AppError::Config(format!("{} must start with '0x': {}", key, value)));
    }

    if value.len() != 42 {
        return Err(AppError::Config(format!(
            "{} must be 42 characters (0x + 40 hex chars), got {}: {}",
            key,
            value.len(),
            value
        )));
    }

    value
        .parse::<Address>()
        .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.chain_id, 1);
        assert!(config.private_key.is_none());
        assert_eq!(config.gas.limit, 300_000);
        assert_eq!(config.gas.price, 20_000_000_000);
        assert!(config.counter_address().is_none());
        assert_eq!(config.poll_interval, Duration::from_millis(1000));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_network_preset_supplies_defaults() {
        let config = Config::from_lookup(lookup(&[("NETWORK", "Sepolia")])).unwrap();

        assert_eq!(config.chain_id, 11155111);
        assert!(config.rpc_url.contains("sepolia"));
    }

    #[test]
    fn test_explicit_values_override_preset() {
        let config = Config::from_lookup(lookup(&[
            ("NETWORK", "localhost"),
            ("RPC_URL", "http://127.0.0.1:9545"),
            ("CHAIN_ID", "31337"),
        ]))
        .unwrap();

        assert_eq!(config.rpc_url, "http://127.0.0.1:9545");
        assert_eq!(config.chain_id, 31337);
    }

    #[test]
    fn test_unknown_network_rejected() {
        let result = Config::from_lookup(lookup(&[("NETWORK", "ropsten")]));
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("ropsten")));
    }

    #[test]
    fn test_empty_private_key_means_read_only() {
        let config = Config::from_lookup(lookup(&[("PRIVATE_KEY", "  ")])).unwrap();
        assert!(!config.has_private_key());
    }

    #[test]
    fn test_gas_settings_parsed() {
        let config =
            Config::from_lookup(lookup(&[("GAS_LIMIT", "500000"), ("GAS_PRICE", "1000000000")]))
                .unwrap();

        assert_eq!(config.gas, GasSettings { limit: 500_000, price: 1_000_000_000 });
    }

    #[test]
    fn test_invalid_number_rejected() {
        let result = Config::from_lookup(lookup(&[("CHAIN_ID", "one")]));
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("CHAIN_ID")));

        let result = Config::from_lookup(lookup(&[("GAS_LIMIT", "-5")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_counter_address_parsed() {
        let config = Config::from_lookup(lookup(&[(
            "COUNTER_CONTRACT_ADDRESS",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        )]))
        .unwrap();

        let expected: Address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap();
        assert_eq!(config.counter_address(), Some(expected));
        assert_eq!(config.contract("counter"), Some(expected));
    }

    #[test]
    fn test_invalid_counter_address_rejected() {
        let result = Config::from_lookup(lookup(&[("COUNTER_CONTRACT_ADDRESS", "0x1234")]));
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("42 characters")));

        let result = Config::from_lookup(lookup(&[(
            "COUNTER_CONTRACT_ADDRESS",
            "5FbDB2315678afecb367f032d93F642f64180aa3",
        )]));
        assert!(result.is_err());
    }

    #[test]
    fn test_network_table_lookup() {
        let table = NetworkTable::default();

        assert_eq!(table.get("MAINNET").map(|n| n.chain_id), Some(1));
        assert_eq!(table.by_chain_id(1337).map(|n| n.display_name.as_str()), Some("Local Development"));
        assert!(table.by_chain_id(42).is_none());
        assert_eq!(table.iter().count(), 3);
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let config = Config::from_lookup(lookup(&[("PRIVATE_KEY", key)])).unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("<redacted>"));
        assert!(!debug_str.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"));
    }
}
