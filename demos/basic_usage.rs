//! Basic tour of the bounty-board client.
//!
//! This example shows how to:
//! - Create a client with the default configuration
//! - List, look up and search bounties
//! - Combine criteria with `BountyFilter`
//! - Fetch the four statistics endpoints concurrently
//!
//! Run with: `cargo run --example basic_usage`

use bountyboard::filter::{sort_by_reward, total_reward_usdc, truncate_address};
use bountyboard::{BountyFilter, BountyStatus, Client};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("bountyboard=debug,basic_usage=info")
        .init();

    let client = Client::new()?;
    println!("Talking to {}", client.base_url());
    println!();

    println!("=== Bounty list ===");
    let bounties = client.get_bounties().await?;
    println!(
        "{} bounties, {:.2} USDC in total",
        bounties.len(),
        total_reward_usdc(&bounties)
    );

    let mut open = client.get_open_bounties().await?;
    sort_by_reward(&mut open, true);
    for bounty in open.iter().take(5) {
        let creator = bounty
            .creator_address
            .as_deref()
            .map(|a| truncate_address(a, 4))
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "  #{:<4} {:>8.2} USDC  {}  by {}",
            bounty.id, bounty.reward_usdc, bounty.title, creator
        );
    }
    println!();

    println!("=== Lookup and search ===");
    match client.get_bounty(143).await? {
        Some(bounty) => println!("#143 is {} ({})", bounty.title, bounty.status),
        None => println!("#143 does not exist"),
    }
    let agents = client.search_bounties("agent").await?;
    println!("{} bounties mention \"agent\"", agents.len());

    let filter = BountyFilter::new()
        .with_status(BountyStatus::Open)
        .with_status(BountyStatus::Claimed)
        .with_min_reward(25.0);
    let worthwhile = client.filter_bounties(&filter).await?;
    println!("{} open or claimed bounties pay at least 25 USDC", worthwhile.len());
    println!();

    println!("=== Statistics ===");
    let (treasury, token, ratio, swarm) = tokio::join!(
        client.get_treasury_stats(),
        client.get_token_info(),
        client.get_ratio_data(),
        client.get_swarm_stats(),
    );

    let treasury = treasury?;
    let token = token?;
    let ratio = ratio?;
    let swarm = swarm?;
    println!(
        "Treasury: {:.0} USD ({:.0} USDC, {} ETH)",
        treasury.treasury_value, treasury.usdc_balance, treasury.eth_balance
    );
    println!("Token: {} ({}) on {}", token.name, token.symbol, token.chain);
    println!("Market cap / treasury: {:.1}x", ratio.ratio);
    println!(
        "Swarm: {} agents, {} mechanisms, {} open bounties, {:.2} USDC paid",
        swarm.agent_count, swarm.mechanisms_count, swarm.open_bounties, swarm.total_paid_usdc
    );

    Ok(())
}
