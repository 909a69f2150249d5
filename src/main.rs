//! Counter Web3
//!
//! Connects to the configured node, reports network and wallet state, and runs
//! the Counter demonstration when a contract address is configured.

use counter_web3::{demo, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    demo::init_logging(&config.log_level);

    println!("Counter Web3 - modular Ethereum contract client\n");

    if let Err(e) = run(&config).await {
        tracing::error!(error = %e, "Initialization failed");
        println!("\nError: {}", e);
        println!("\nCheck your configuration:");
        println!("   - Is RPC_URL correct?");
        println!("   - Is PRIVATE_KEY configured?");
        println!("   - Does the .env file exist?");
    }

    Ok(())
}

async fn run(config: &Config) -> counter_web3::Result<()> {
    println!("Connecting to the blockchain...");
    let connection = demo::connect(config).await?;

    demo::print_network_info(&connection).await?;
    demo::print_balance(&connection).await?;

    match demo::counter(config, &connection)? {
        Some(counter) => {
            println!("\nInteracting with the Counter contract...");
            demo::demonstrate_counter(&counter).await?;
        }
        None => {
            println!();
            demo::print_missing_counter_hint();
        }
    }

    println!("\nSystem initialized successfully!");
    println!("Run the binaries under src/bin for more walkthroughs");

    Ok(())
}
