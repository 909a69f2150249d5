//! Event listening, a sequence of writes, and block monitoring.

use std::time::Duration;

use alloy::primitives::U256;
use counter_web3::{demo, types::WriteOutcome, Config, CounterContract};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    demo::init_logging(&config.log_level);

    if let Err(e) = advanced_example(&config).await {
        tracing::error!(error = %e, "Advanced example failed");
        println!("Error in advanced example: {}", e);
    }

    if let Err(e) = transaction_monitoring_example(&config).await {
        tracing::error!(error = %e, "Monitoring example failed");
        println!("Error in monitoring example: {}", e);
    }

    Ok(())
}

async fn advanced_example(config: &Config) -> counter_web3::Result<()> {
    println!("=== Advanced Usage Example ===\n");

    let connection = demo::connect(config).await?;
    let Some(counter) = demo::counter(config, &connection)? else {
        demo::print_missing_counter_hint();
        return Ok(());
    };

    println!("\n1. Registering NumberSet listener...");
    counter
        .on_number_set(|number| println!("NumberSet event received: {}", number))
        .await?;

    println!("\n2. Running several operations...");
    let operations: [(&str, Option<u64>); 5] = [
        ("setNumber(100)", Some(100)),
        ("increment()", None),
        ("increment()", None),
        ("setNumber(0)", Some(0)),
        ("increment()", None),
    ];

    for (i, (label, value)) in operations.iter().enumerate() {
        println!("\nOperation {}: {}", i + 1, label);
        if let Err(e) = run_operation(&counter, *value).await {
            println!("Error in operation {}: {}", i + 1, e);
            continue;
        }

        // Give the listener a chance to observe the event
        tokio::time::sleep(Duration::from_secs(2)).await;

        match counter.get_number().await {
            Ok(number) => println!("Current state: {}", number),
            Err(e) => println!("Error in operation {}: {}", i + 1, e),
        }
    }

    println!("\n3. Stopping event listeners...");
    counter.stop_listening_number_set().await;

    println!("\n=== Advanced example complete ===");
    Ok(())
}

async fn run_operation(counter: &CounterContract, value: Option<u64>) -> counter_web3::Result<WriteOutcome> {
    match value {
        Some(n) => counter.set_number(U256::from(n)).await,
        None => counter.increment().await,
    }
}

async fn transaction_monitoring_example(config: &Config) -> counter_web3::Result<()> {
    println!("\n=== Transaction Monitoring ===\n");

    let connection = demo::connect(config).await?;
    let Some(counter) = demo::counter(config, &connection)? else {
        demo::print_missing_counter_hint();
        return Ok(());
    };

    println!("Monitoring transactions...");
    let blocks = connection.on_block(|number| println!("New block: {}", number))?;

    println!("Sending transaction...");
    let result = counter.set_number(U256::from(999u64)).await;
    blocks.cancel();
    let outcome = result?;

    println!("Transaction sent: {}", outcome.transaction.hash);
    println!("Gas used: {}", outcome.receipt.gas_used);
    println!("Status: {}", if outcome.receipt.status { "Success" } else { "Failure" });

    Ok(())
}
