//! Common utilities for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use counter_web3::{Config, ConnectionManager, CounterContract};

static CHAIN_STATE: Mutex<()> = Mutex::new(());

/// Serialize tests that write to the shared Counter.
pub fn lock_chain_state() -> MutexGuard<'static, ()> {
    CHAIN_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Configuration from the environment, if `RPC_URL` is set.
pub fn test_config() -> Option<Config> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let rpc_url = std::env::var("RPC_URL").ok()?;
    if rpc_url.trim().is_empty() {
        return None;
    }

    Config::from_env().ok()
}

/// Connected manager with the configured signing identity, if any.
pub async fn connect(config: &Config) -> Option<Arc<ConnectionManager>> {
    let connection = ConnectionManager::from_config(config).ok()?;
    connection.initialize().await.ok()?;
    Some(Arc::new(connection))
}

/// Connected manager without a signing identity.
pub async fn connect_read_only(config: &Config) -> Option<Arc<ConnectionManager>> {
    let connection = ConnectionManager::new(&config.rpc_url, None).ok()?;
    connection.initialize().await.ok()?;
    Some(Arc::new(connection))
}

/// Initialized Counter binding on `connection`, if an address is configured.
pub fn counter(config: &Config, connection: &Arc<ConnectionManager>) -> Option<CounterContract> {
    let mut counter = CounterContract::new(config.counter_address()?, connection.clone()).ok()?;
    counter.initialize().ok()?;
    Some(counter)
}

/// Skip test if no node is reachable (missing env vars or connection failure).
#[macro_export]
macro_rules! skip_if_no_node {
    () => {{
        let Some(config) = common::test_config() else {
            eprintln!("Skipping test: RPC_URL not set");
            return;
        };
        let Some(connection) = common::connect(&config).await else {
            eprintln!("Skipping test: node at {} unreachable", config.rpc_url);
            return;
        };
        (config, connection)
    }};
}

/// Skip test unless a signing identity and a Counter address are configured.
#[macro_export]
macro_rules! skip_if_no_counter {
    () => {{
        let (config, connection) = skip_if_no_node!();
        if !connection.has_signing_identity() {
            eprintln!("Skipping test: PRIVATE_KEY not set");
            return;
        }
        let Some(counter) = common::counter(&config, &connection) else {
            eprintln!("Skipping test: COUNTER_CONTRACT_ADDRESS not set");
            return;
        };
        (config, counter)
    }};
}
