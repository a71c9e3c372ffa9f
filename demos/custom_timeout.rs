//! Example demonstrating the use of custom timeouts and servers.
//!
//! This shows how to override the process-wide defaults with an explicit
//! [`network_time::Config`], which is useful when dealing with slow or
//! unreliable network connections.

use std::time::Duration;

use network_time::Config;

#[tokio::main]
async fn main() {
    // Example 1: Using a longer timeout for slow networks
    println!("Example 1: Fetch with 10 second timeout");
    let config = Config::default().timeout(Duration::from_secs(10));
    match network_time::fetch_time_with(&config).await {
        Ok(time) => println!("  Success! Unix millis: {}", time.unix_millis()),
        Err(e) => println!("  Error: {}", e),
    }

    // Example 2: Another server with a shorter timeout for fast fail
    println!("\nExample 2: time.google.com with 2 second timeout");
    let config = Config::default()
        .server("time.google.com")
        .timeout(Duration::from_secs(2));
    match network_time::fetch_time_with(&config).await {
        Ok(time) => println!("  Success! Unix millis: {}", time.unix_millis()),
        Err(e) => println!("  Error (expected on slow connections): {}", e),
    }

    // Example 3: The default timeout (10 seconds)
    println!("\nExample 3: Fetch with default configuration");
    match network_time::fetch_time().await {
        Ok(time) => println!("  Success! Unix seconds: {}", time.secs()),
        Err(e) => println!("  Error: {}", e),
    }

    // Example 4: Very short timeout to demonstrate timeout errors
    println!("\nExample 4: Fetch with very short timeout (1ms)");
    let config = Config::default().timeout(Duration::from_millis(1));
    match network_time::fetch_time_with(&config).await {
        Ok(_) => println!("  Unlikely success!"),
        Err(e) => println!("  Expected timeout error: {}", e),
    }
}
