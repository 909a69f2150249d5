//! Counter contract binding.

use std::sync::Arc;

use alloy::{
    dyn_abi::DynSolValue,
    json_abi::JsonAbi,
    primitives::{Address, U256},
};

use crate::{
    error::{AppError, Result},
    ethereum::{abi::counter_abi, subscription::Subscription, ConnectionManager},
    types::{ContractInfo, WriteOutcome},
};

use super::ContractBinding;

/// Read method returning the stored number.
pub const NUMBER: &str = "number";
/// Write method replacing the stored number.
pub const SET_NUMBER: &str = "setNumber";
/// Write method adding one to the stored number.
pub const INCREMENT: &str = "increment";
/// Event emitted when the number is set.
pub const NUMBER_SET: &str = "NumberSet";

/// Typed wrapper binding the Counter's methods and event.
#[derive(Debug)]
pub struct CounterContract {
    binding: ContractBinding,
}

impl CounterContract {
    /// Bind the Counter deployed at `address` using the bundled ABI.
    pub fn new(address: Address, connection: Arc<ConnectionManager>) -> Result<Self> {
        Self::with_abi(address, counter_abi()?, connection)
    }

    /// Bind with a caller-supplied ABI, which must declare every Counter member.
    pub fn with_abi(
        address: Address,
        abi: JsonAbi,
        connection: Arc<ConnectionManager>,
    ) -> Result<Self> {
        let binding = ContractBinding::new("Counter", address, abi, connection);
        binding.require_members(&[NUMBER, SET_NUMBER, INCREMENT], &[NUMBER_SET])?;
        Ok(Self { binding })
    }

    /// See [`ContractBinding::initialize`].
    pub fn initialize(&mut self) -> Result<()> {
        self.binding.initialize()
    }

    /// Current number.
    pub async fn get_number(&self) -> Result<U256> {
        let value = self.binding.read_value(NUMBER, &[]).await?;
        value
            .as_uint()
            .map(|(n, _)| n)
            .ok_or_else(|| AppError::Decode { method: NUMBER.to_string(), expected: "uint256" })
    }

    /// Replace the number.
    pub async fn set_number(&self, new_number: U256) -> Result<WriteOutcome> {
        self.binding.write(SET_NUMBER, &[DynSolValue::Uint(new_number, 256)]).await
    }

    /// Add one to the number.
    pub async fn increment(&self) -> Result<WriteOutcome> {
        self.binding.write(INCREMENT, &[]).await
    }

    /// Invoke `callback` with the new number on every `NumberSet` event.
    pub async fn on_number_set<F>(&self, callback: F) -> Result<Subscription>
    where
        F: Fn(U256) + Send + Sync + 'static,
    {
        self.binding
            .listen_to_event(NUMBER_SET, move |log| {
                match log.values.first().and_then(DynSolValue::as_uint) {
                    Some((number, _)) => callback(number),
                    None => tracing::warn!(values = ?log.values, "Malformed NumberSet event"),
                }
            })
            .await
    }

    /// Cancel every `NumberSet` registration.
    pub async fn stop_listening_number_set(&self) -> usize {
        self.binding.stop_listening(Some(NUMBER_SET)).await
    }

    /// See [`ContractBinding::contract_info`].
    pub fn contract_info(&self) -> ContractInfo {
        self.binding.contract_info()
    }

    /// The underlying generic binding.
    pub fn binding(&self) -> &ContractBinding {
        &self.binding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const COUNTER_ADDRESS: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

    fn connection() -> Arc<ConnectionManager> {
        Arc::new(ConnectionManager::new("http://localhost:8545", None).unwrap())
    }

    #[tokio::test]
    async fn test_counter_binds_bundled_abi() {
        let counter = CounterContract::new(COUNTER_ADDRESS, connection()).unwrap();
        let info = counter.contract_info();

        assert_eq!(info.name, "Counter");
        assert_eq!(info.address, COUNTER_ADDRESS);
        assert!(!info.has_signer);
    }

    #[tokio::test]
    async fn test_counter_rejects_incomplete_abi() {
        let abi = JsonAbi::parse([
            "function number() view returns (uint256)",
            "function setNumber(uint256 newNumber)",
            "event NumberSet(uint256 newNumber)",
        ])
        .unwrap();

        let err = CounterContract::with_abi(COUNTER_ADDRESS, abi, connection()).unwrap_err();
        assert!(matches!(err, AppError::UnknownMember { ref name, .. } if name == "increment"));
    }

    #[tokio::test]
    async fn test_counter_rejects_missing_event() {
        let abi = JsonAbi::parse([
            "function number() view returns (uint256)",
            "function setNumber(uint256 newNumber)",
            "function increment()",
        ])
        .unwrap();

        let err = CounterContract::with_abi(COUNTER_ADDRESS, abi, connection()).unwrap_err();
        assert!(matches!(err, AppError::UnknownMember { ref name, .. } if name == "NumberSet"));
    }

    #[tokio::test]
    async fn test_writes_fail_without_signing_identity() {
        let counter = CounterContract::new(COUNTER_ADDRESS, connection()).unwrap();

        assert!(matches!(counter.increment().await, Err(AppError::NoSigningIdentity)));
        assert!(matches!(
            counter.set_number(U256::from(42u64)).await,
            Err(AppError::NoSigningIdentity)
        ));
    }

    #[tokio::test]
    async fn test_read_before_initialize() {
        let counter = CounterContract::new(COUNTER_ADDRESS, connection()).unwrap();
        assert!(matches!(counter.get_number().await, Err(AppError::NotInitialized { .. })));
    }

    #[tokio::test]
    async fn test_stop_listening_number_set_without_listener() {
        let counter = CounterContract::new(COUNTER_ADDRESS, connection()).unwrap();
        assert_eq!(counter.stop_listening_number_set().await, 0);
    }
}
