//! Integration tests for the Counter binding against a live node.
//!
//! Needs `RPC_URL`, `PRIVATE_KEY` and `COUNTER_CONTRACT_ADDRESS`; a local
//! Anvil or Hardhat node with a deployed Counter works.
//!
//! Run with: `cargo test --test test_counter -- --ignored`

mod common;

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use alloy::primitives::U256;
use counter_web3::{AppError, CounterContract};

#[tokio::test]
#[ignore = "Requires network access and environment variables"]
async fn test_set_number_then_increment() {
    let _guard = common::lock_chain_state();
    let (_config, counter) = skip_if_no_counter!();

    let outcome = counter.set_number(U256::from(42u64)).await.unwrap();
    assert!(outcome.receipt.status);
    assert_eq!(outcome.transaction.method, "setNumber");
    assert_eq!(counter.get_number().await.unwrap(), U256::from(42u64));

    let outcome = counter.increment().await.unwrap();
    assert!(outcome.receipt.status);
    assert!(outcome.receipt.gas_used > 0);
    assert_eq!(counter.get_number().await.unwrap(), U256::from(43u64));
}

#[tokio::test]
#[ignore = "Requires network access and environment variables"]
async fn test_read_only_connection_cannot_write() {
    let (config, _connection) = skip_if_no_node!();
    let Some(address) = config.counter_address() else {
        eprintln!("Skipping test: COUNTER_CONTRACT_ADDRESS not set");
        return;
    };
    let Some(read_only) = common::connect_read_only(&config).await else {
        return;
    };

    let mut counter = CounterContract::new(address, read_only).unwrap();
    counter.initialize().unwrap();
    assert!(!counter.contract_info().has_signer);

    assert!(matches!(counter.increment().await, Err(AppError::NoSigningIdentity)));
    assert!(counter.get_number().await.is_ok());
}

#[tokio::test]
#[ignore = "Requires network access and environment variables"]
async fn test_number_set_events_in_order() {
    let _guard = common::lock_chain_state();
    let (config, counter) = skip_if_no_counter!();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let subscription = counter
        .on_number_set(move |number| sink.lock().unwrap().push(number))
        .await
        .unwrap();
    assert!(subscription.is_active());

    counter.set_number(U256::from(7u64)).await.unwrap();
    counter.set_number(U256::from(8u64)).await.unwrap();

    let deadline = config.poll_interval * 10;
    let _ = tokio::time::timeout(deadline, async {
        while seen.lock().unwrap().len() < 2 {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    })
    .await;

    assert_eq!(*seen.lock().unwrap(), vec![U256::from(7u64), U256::from(8u64)]);

    assert_eq!(counter.stop_listening_number_set().await, 1);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!subscription.is_active());

    counter.set_number(U256::from(9u64)).await.unwrap();
    tokio::time::sleep(config.poll_interval * 3).await;
    assert_eq!(seen.lock().unwrap().len(), 2);
}
