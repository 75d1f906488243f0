//! Example demonstrating error classification and fallback data.
//!
//! This example shows how to:
//! - Branch on `ErrorKind` instead of raw status codes
//! - Read the server message, status and upstream code of an error
//! - Use rate limit hints to decide how long to back off
//! - Check reachability with `ping`
//!
//! Run with: `cargo run --example error_handling`

use bountyboard::{Client, ErrorKind};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("bountyboard=info")
        .init();

    println!("=== Example 1: Reachability ===");
    let client = Client::new()?;
    if client.ping().await {
        println!("{} is reachable", client.base_url());
    } else {
        println!("{} is not reachable right now", client.base_url());
    }
    println!();

    println!("=== Example 2: Classified errors ===");
    match client.get_bounties().await {
        Ok(bounties) => println!("Fetched {} bounties", bounties.len()),
        Err(e) => match e.kind() {
            ErrorKind::RateLimit => {
                let wait = e
                    .rate_limit_info()
                    .and_then(|info| info.delay(Duration::from_secs(60)));
                println!("Rate limited, suggested wait: {:?}", wait);
            }
            ErrorKind::Server => println!("Server trouble ({:?}): {}", e.status(), e.message()),
            ErrorKind::NotFound | ErrorKind::Validation | ErrorKind::Api => {
                println!("Request failed: {}", e);
                println!("  Status: {:?}", e.status());
                println!("  Code: {:?}", e.code());
                println!("  Timed out: {}", e.is_timeout());
            }
        },
    }
    println!();

    println!("=== Example 3: Unreachable host ===");
    let offline = Client::builder()
        .base_url("http://127.0.0.1:9")?
        .timeout(Duration::from_millis(500))
        .build()?;
    match offline.get_bounties().await {
        Ok(_) => println!("Unexpected success"),
        Err(e) => {
            assert_eq!(e.kind(), ErrorKind::Api);
            println!("Generic API error with no status: {}", e);
        }
    }
    println!("ping() on the unreachable host: {}", offline.ping().await);
    println!();

    println!("=== Example 4: Fallback data ===");
    // Statistics endpoints answering 404 yield fixed figures instead of an error.
    match client.get_treasury_stats().await {
        Ok(treasury) => println!(
            "Treasury {:.0} USD, market cap {:.0} USD ({:.1}x)",
            treasury.treasury_value, treasury.market_cap, treasury.mcap_to_treasury
        ),
        Err(e) => println!("Treasury unavailable: {}", e),
    }

    Ok(())
}
