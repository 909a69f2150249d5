//! Offline walkthrough: prints the loaded configuration and usage hints.

use counter_web3::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    println!("Counter Web3 - offline demonstration\n");

    println!("Current configuration:");
    println!("   RPC URL: {}", config.rpc_url);
    println!("   Chain ID: {}", config.chain_id);
    println!(
        "   Private key: {}",
        if config.has_private_key() { "configured" } else { "not configured" }
    );
    println!(
        "   Counter contract: {}",
        config.counter_address().map(|a| a.to_string()).unwrap_or_else(|| "not configured".into())
    );
    println!("   Gas limit: {}", config.gas.limit);
    println!("   Gas price: {} wei", config.gas.price);

    println!("\nKnown networks:");
    for (name, network) in config.networks.iter() {
        println!("   {} - {} (chain ID {})", name, network.display_name, network.chain_id);
    }

    println!("\nHow to use:");
    println!("   1. Configure your variables in the .env file");
    println!("   2. Run: cargo run");
    println!("   3. Try the walkthroughs: cargo run --bin basic_usage");

    println!("\nAvailable walkthroughs:");
    println!("   - basic_usage - connection, balance and Counter calls");
    println!("   - advanced_usage - events, multiple writes and block monitoring");
    println!("   - demo_offline - this demonstration");

    println!("\nTo connect to a real network:");
    println!("   1. Set RPC_URL (e.g. Infura, Alchemy) or NETWORK");
    println!("   2. Set PRIVATE_KEY (optional)");
    println!("   3. Set the contract addresses");

    println!("\nReady to go!");
    Ok(())
}
