//! # bountyboard - typed client for the owockibot bounty board
//!
//! `bountyboard` wraps the bounty-board HTTP API in an async, strongly typed
//! client built on `reqwest`. It lists, filters and searches bounties, and
//! reads the treasury, token, ratio and swarm statistics.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bountyboard::{Client, BountyStatus};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new()?;
//!
//!     let open = client.get_open_bounties().await?;
//!     println!("{} open bounties", open.len());
//!
//!     if let Some(bounty) = client.get_bounty(143).await? {
//!         println!("#{}: {} [{}]", bounty.id, bounty.title, bounty.status);
//!     }
//!
//!     let rust = client.search_bounties("rust").await?;
//!     let done = client.get_bounties_by_status(BountyStatus::Completed).await?;
//!     println!("{} rust bounties, {} completed", rust.len(), done.len());
//!
//!     let treasury = client.get_treasury_stats().await?;
//!     println!("Treasury: {} USDC", treasury.usdc_balance);
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Failed calls return an [`ApiError`] classified by [`ErrorKind`]: not
//! found (404), validation (400), rate limit (429), server (5xx), or a
//! generic API error for everything else, including timeouts and
//! connection failures. There are no retries.
//!
//! ## Fallback data
//!
//! The statistics endpoints are not live on every deployment. When one
//! answers 404, the client returns the fixed figures in [`fallback`] instead
//! of an error. Any other error still propagates.
//!
//! ## Logging
//!
//! Requests, responses and fallback substitutions are reported through
//! `tracing`. Install a subscriber to see them.

mod client;
mod error;
pub mod fallback;
pub mod filter;
pub mod models;
pub mod rate_limit;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, USER_AGENT};
pub use error::{ApiError, ConfigError, ErrorKind, Result};
pub use filter::BountyFilter;
pub use models::{
    Bounty, BountyComment, BountyStatus, ParseStatusError, RatioData, SwarmStats, TokenInfo,
    TreasuryStats,
};
pub use rate_limit::RateLimitInfo;
