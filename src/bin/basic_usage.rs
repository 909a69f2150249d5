//! Step-by-step walkthrough: connection, network info, balance, Counter.

use counter_web3::{demo, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    demo::init_logging(&config.log_level);

    if let Err(e) = run(&config).await {
        tracing::error!(error = %e, "Basic example failed");
        println!("Error in basic example: {}", e);
    }

    Ok(())
}

async fn run(config: &Config) -> counter_web3::Result<()> {
    println!("=== Basic Usage Example ===\n");

    println!("1. Initializing provider...");
    let connection = demo::connect(config).await?;

    println!("\n2. Network information:");
    demo::print_network_info(&connection).await?;

    println!("\n3. Wallet:");
    demo::print_balance(&connection).await?;

    match demo::counter(config, &connection)? {
        Some(counter) => {
            println!("\n4. Interacting with the Counter contract...");
            demo::demonstrate_counter(&counter).await?;
        }
        None => {
            println!("\n4. Counter contract");
            demo::print_missing_counter_hint();
        }
    }

    Ok(())
}
