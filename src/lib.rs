//! Counter Web3
//!
//! Connection management and contract bindings for the Counter contract over
//! Ethereum JSON-RPC.
//!
//! # Features
//!
//! - **Connection**: one RPC endpoint plus an optional signing identity
//! - **Generic bindings**: read, write and event subscription against any ABI
//! - **Counter**: typed `number`, `setNumber`, `increment` and `NumberSet`
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use counter_web3::{Config, ConnectionManager, CounterContract};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let connection = ConnectionManager::from_config(&config)?;
//!     connection.initialize().await?;
//!
//!     let address = config.counter_address().expect("COUNTER_CONTRACT_ADDRESS");
//!     let mut counter = CounterContract::new(address, Arc::new(connection))?;
//!     counter.initialize()?;
//!     println!("{}", counter.get_number().await?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod demo;
pub mod error;
pub mod ethereum;
pub mod types;

pub use config::Config;
pub use error::{AppError, Result};
pub use ethereum::{ConnectionManager, ContractBinding, CounterContract, Subscription};
