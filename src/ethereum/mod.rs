//! Ethereum interaction module.
//!
//! Contains the connection manager, signing identity, and contract bindings.

pub mod abi;
pub mod connection;
pub mod constants;
pub mod contracts;
pub mod subscription;
pub mod wallet;

pub use connection::ConnectionManager;
pub use contracts::{ContractBinding, CounterContract};
pub use subscription::Subscription;
pub use wallet::WalletManager;
