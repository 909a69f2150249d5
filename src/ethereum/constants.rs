//! Ethereum network constants and transaction defaults.

// ============================================================================
// Chain IDs
// ============================================================================

/// Ethereum Mainnet chain ID.
pub const MAINNET_CHAIN_ID: u64 = 1;

/// Sepolia testnet chain ID.
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

/// Local development chain ID.
pub const LOCALHOST_CHAIN_ID: u64 = 1337;

/// Default chain ID (Ethereum Mainnet).
pub const DEFAULT_CHAIN_ID: u64 = MAINNET_CHAIN_ID;

/// Display name used when a chain ID matches no known network.
pub const UNKNOWN_NETWORK_NAME: &str = "unknown";

// ============================================================================
// Connection and transaction defaults
// ============================================================================

/// Default JSON-RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Default gas ceiling per transaction.
pub const DEFAULT_GAS_LIMIT: u64 = 300_000;

/// Default gas price in wei (20 gwei).
pub const DEFAULT_GAS_PRICE_WEI: u128 = 20_000_000_000;

/// Default poll interval for event and block watchers.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Decimals of the native currency.
pub const ETHER_DECIMALS: u8 = 18;
