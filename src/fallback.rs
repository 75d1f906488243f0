//! Static payloads substituted when a statistics endpoint answers 404.
//!
//! The figures mirror the public dashboard at the time the endpoints were
//! announced. They are product constants: keep them verbatim until the server
//! ships the real endpoints.

use crate::models::{Bounty, RatioData, SwarmStats, TokenInfo, TreasuryStats};

/// Treasury value in USD.
pub const TREASURY_VALUE: f64 = 31_000.0;
/// Token market cap in USD.
pub const MARKET_CAP: f64 = 261_000.0;
/// Market cap divided by treasury value.
pub const MCAP_TO_TREASURY: f64 = 8.4;

/// Agents active in the swarm.
pub const AGENT_COUNT: u64 = 6;
/// Coordination mechanisms shipped.
pub const MECHANISMS_COUNT: u64 = 25;
/// Total volume in USD.
pub const TOTAL_VOLUME: f64 = 740.0;
/// Used for `total_paid_usdc` only when the live sum comes out as zero.
pub const TOTAL_PAID_USDC: f64 = 4_100.0;

/// Treasury figures, held entirely in USDC.
pub fn treasury_stats() -> TreasuryStats {
    TreasuryStats {
        treasury_value: TREASURY_VALUE,
        eth_balance: 0.0,
        usdc_balance: TREASURY_VALUE,
        market_cap: MARKET_CAP,
        mcap_to_treasury: MCAP_TO_TREASURY,
    }
}

/// The OWOCKI token on Base. No contract address is published.
pub fn token_info() -> TokenInfo {
    TokenInfo {
        name: "owockibot".to_string(),
        symbol: "OWOCKI".to_string(),
        chain: "base".to_string(),
        contract_address: None,
        market_cap: MARKET_CAP,
    }
}

/// Market cap to treasury ratio, consistent with [`treasury_stats`].
pub fn ratio_data() -> RatioData {
    RatioData {
        market_cap: MARKET_CAP,
        treasury_value: TREASURY_VALUE,
        ratio: MCAP_TO_TREASURY,
    }
}

/// Swarm figures with the bounty-derived fields computed from `bounties`.
///
/// `open_bounties` counts open bounties. `total_paid_usdc` sums the rewards
/// of completed bounties and falls back to [`TOTAL_PAID_USDC`] when that sum
/// is zero.
pub fn swarm_stats(bounties: &[Bounty]) -> SwarmStats {
    let open_bounties = bounties.iter().filter(|b| b.is_open()).count() as u64;
    let paid: f64 = bounties
        .iter()
        .filter(|b| b.is_completed())
        .map(|b| b.reward_usdc)
        .sum();

    SwarmStats {
        open_bounties,
        total_paid_usdc: if paid == 0.0 || paid.is_nan() {
            TOTAL_PAID_USDC
        } else {
            paid
        },
        agent_count: AGENT_COUNT,
        mechanisms_count: MECHANISMS_COUNT,
        total_volume: TOTAL_VOLUME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::bounty;
    use crate::models::BountyStatus;

    #[test]
    fn test_treasury_constants() {
        assert_eq!(
            treasury_stats(),
            TreasuryStats {
                treasury_value: 31000.0,
                eth_balance: 0.0,
                usdc_balance: 31000.0,
                market_cap: 261000.0,
                mcap_to_treasury: 8.4,
            }
        );
    }

    #[test]
    fn test_ratio_matches_treasury() {
        let ratio = ratio_data();
        let treasury = treasury_stats();
        assert_eq!(ratio.market_cap, treasury.market_cap);
        assert_eq!(ratio.treasury_value, treasury.treasury_value);
        assert_eq!(ratio.ratio, treasury.mcap_to_treasury);
        assert_eq!(token_info().market_cap, treasury.market_cap);
    }

    #[test]
    fn test_swarm_live_sum_wins() {
        let bounties = vec![
            bounty(1, BountyStatus::Completed, 500.0),
            bounty(2, BountyStatus::Open, 20.0),
        ];

        assert_eq!(
            swarm_stats(&bounties),
            SwarmStats {
                open_bounties: 1,
                total_paid_usdc: 500.0,
                agent_count: 6,
                mechanisms_count: 25,
                total_volume: 740.0,
            }
        );
    }

    #[test]
    fn test_swarm_empty_list_uses_constant() {
        let stats = swarm_stats(&[]);
        assert_eq!(stats.open_bounties, 0);
        assert_eq!(stats.total_paid_usdc, 4100.0);
    }

    #[test]
    fn test_swarm_zero_reward_completions_use_constant() {
        let bounties = vec![
            bounty(1, BountyStatus::Completed, 0.0),
            bounty(2, BountyStatus::Open, 20.0),
            bounty(3, BountyStatus::Open, 30.0),
        ];

        let stats = swarm_stats(&bounties);
        assert_eq!(stats.open_bounties, 2);
        assert_eq!(stats.total_paid_usdc, 4100.0);
    }
}
