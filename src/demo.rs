//! Console walkthroughs shared by the binaries.
//!
//! Narration goes to stdout; structured logs go to stderr.

use std::sync::Arc;

use alloy::primitives::U256;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{
    config::Config,
    error::{AppError, Result},
    ethereum::{ConnectionManager, CounterContract},
};

/// Install the stderr tracing subscriber. `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Build the connection manager from `config` and contact the node.
pub async fn connect(config: &Config) -> Result<Arc<ConnectionManager>> {
    let connection = ConnectionManager::from_config(config)?;
    connection.initialize().await?;
    Ok(Arc::new(connection))
}

/// Bind and initialize the configured Counter, if any.
pub fn counter(config: &Config, connection: &Arc<ConnectionManager>) -> Result<Option<CounterContract>> {
    let Some(address) = config.counter_address() else {
        return Ok(None);
    };

    let mut counter = CounterContract::new(address, connection.clone())?;
    counter.initialize()?;
    Ok(Some(counter))
}

/// Print network name, chain ID and latest block.
pub async fn print_network_info(connection: &ConnectionManager) -> Result<()> {
    let info = connection.get_network_info().await?;
    println!("Network: {}", info.name);
    println!("Chain ID: {}", info.chain_id);
    println!("Latest block: {}", info.block_number);
    Ok(())
}

/// Print the signing identity's balance, or a read-only notice without one.
pub async fn print_balance(connection: &ConnectionManager) -> Result<()> {
    match connection.get_balance(None).await {
        Ok(balance) => println!("Wallet balance: {} ETH", balance),
        Err(AppError::NoSigningIdentity) => {
            println!("Wallet not configured - only read operations available")
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

/// Read, set to 42, read, increment, read.
pub async fn demonstrate_counter(counter: &CounterContract) -> Result<()> {
    println!("\n=== Counter Contract Demonstration ===");

    println!("\n1. Reading current number...");
    let current = counter.get_number().await?;
    println!("Current number: {}", current);

    println!("\n2. Setting number to 42...");
    counter.set_number(U256::from(42u64)).await?;
    let updated = counter.get_number().await?;
    println!("New number: {}", updated);

    println!("\n3. Incrementing number...");
    counter.increment().await?;
    let last = counter.get_number().await?;
    println!("Final number: {}", last);

    println!("\n=== Demonstration complete ===");
    Ok(())
}

/// Hint printed when no Counter address is configured.
pub fn print_missing_counter_hint() {
    println!("Counter contract address not configured");
    println!("Set COUNTER_CONTRACT_ADDRESS in the .env file");
}
