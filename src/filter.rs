//! Client-side filtering, sorting and aggregation over bounty lists.
//!
//! The bounty board returns its whole catalogue in one response, so all of
//! this runs locally on the fetched `Vec<Bounty>`.

use crate::models::{Bounty, BountyStatus};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&Bounty) -> bool + Send + Sync>;

/// Builder for combining bounty criteria.
///
/// A bounty passes when it satisfies every configured criterion. An empty
/// filter passes everything.
///
/// # Examples
///
/// ```no_run
/// use bountyboard::{BountyFilter, BountyStatus, Client};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new()?;
/// let filter = BountyFilter::new()
///     .with_status(BountyStatus::Open)
///     .with_min_reward(50.0)
///     .search("agent");
///
/// for bounty in client.filter_bounties(&filter).await? {
///     println!("#{} {} ({} USDC)", bounty.id, bounty.title, bounty.reward_usdc);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct BountyFilter {
    statuses: Vec<BountyStatus>,
    min_reward: Option<f64>,
    max_reward: Option<f64>,
    creator: Option<String>,
    claimer: Option<String>,
    keyword: Option<String>,
    predicates: Vec<Predicate>,
}

impl fmt::Debug for BountyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BountyFilter")
            .field("statuses", &self.statuses)
            .field("min_reward", &self.min_reward)
            .field("max_reward", &self.max_reward)
            .field("creator", &self.creator)
            .field("claimer", &self.claimer)
            .field("keyword", &self.keyword)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

impl BountyFilter {
    /// Creates a filter with no criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps bounties in this status. Repeated calls accept any of the given statuses.
    #[must_use]
    pub fn with_status(mut self, status: BountyStatus) -> Self {
        self.statuses.push(status);
        self
    }

    /// Keeps bounties paying at least `amount` USDC.
    #[must_use]
    pub fn with_min_reward(mut self, amount: f64) -> Self {
        self.min_reward = Some(amount);
        self
    }

    /// Keeps bounties paying at most `amount` USDC.
    #[must_use]
    pub fn with_max_reward(mut self, amount: f64) -> Self {
        self.max_reward = Some(amount);
        self
    }

    /// Keeps bounties paying between `min` and `max` USDC, both inclusive.
    #[must_use]
    pub fn with_reward_range(self, min: f64, max: f64) -> Self {
        self.with_min_reward(min).with_max_reward(max)
    }

    /// Keeps bounties created by `address` (case-insensitive).
    #[must_use]
    pub fn with_creator(mut self, address: impl Into<String>) -> Self {
        self.creator = Some(address.into());
        self
    }

    /// Keeps bounties claimed by `address` (case-insensitive). Unclaimed bounties never match.
    #[must_use]
    pub fn with_claimer(mut self, address: impl Into<String>) -> Self {
        self.claimer = Some(address.into());
        self
    }

    /// Keeps bounties whose title or description contains `keyword` (case-insensitive).
    #[must_use]
    pub fn search(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Keeps bounties for which `predicate` returns `true`.
    ///
    /// Predicates stack: every one must accept the bounty.
    #[must_use]
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Bounty) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(predicate));
        self
    }

    /// Returns `true` if `bounty` satisfies every configured criterion.
    pub fn matches(&self, bounty: &Bounty) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&bounty.status))
            && self.min_reward.is_none_or(|min| bounty.reward_usdc >= min)
            && self.max_reward.is_none_or(|max| bounty.reward_usdc <= max)
            && self.creator.as_deref().is_none_or(|a| bounty.is_created_by(a))
            && self.claimer.as_deref().is_none_or(|a| bounty.is_claimed_by(a))
            && self.keyword.as_deref().is_none_or(|k| bounty.matches_keyword(k))
            && self.predicates.iter().all(|predicate| predicate(bounty))
    }

    /// Keeps the matching bounties, in their original order.
    pub fn apply(&self, bounties: Vec<Bounty>) -> Vec<Bounty> {
        bounties.into_iter().filter(|b| self.matches(b)).collect()
    }
}

/// Sorts by `reward_usdc`. Ties keep their original order.
pub fn sort_by_reward(bounties: &mut [Bounty], descending: bool) {
    bounties.sort_by(|a, b| {
        let ordering = a.reward_usdc.total_cmp(&b.reward_usdc);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// Sorts by `created_at`.
///
/// Timestamps are ISO-8601 strings in a single format, so they order
/// lexicographically.
pub fn sort_by_created(bounties: &mut [Bounty], descending: bool) {
    bounties.sort_by(|a, b| {
        let ordering = a.created_at.cmp(&b.created_at);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

/// Sum of `reward_usdc` over `bounties`.
pub fn total_reward_usdc(bounties: &[Bounty]) -> f64 {
    bounties.iter().map(|b| b.reward_usdc).sum()
}

/// Mean reward, or `0.0` for an empty list.
pub fn average_reward_usdc(bounties: &[Bounty]) -> f64 {
    if bounties.is_empty() {
        return 0.0;
    }
    total_reward_usdc(bounties) / bounties.len() as f64
}

/// Groups bounties by status. Statuses with no bounties are absent.
pub fn group_by_status(bounties: &[Bounty]) -> BTreeMap<BountyStatus, Vec<&Bounty>> {
    let mut groups: BTreeMap<BountyStatus, Vec<&Bounty>> = BTreeMap::new();
    for bounty in bounties {
        groups.entry(bounty.status).or_default().push(bounty);
    }
    groups
}

/// Formats an amount with two decimals and the currency: `10.50 USDC`.
///
/// # Examples
///
/// ```
/// use bountyboard::filter::format_usdc;
///
/// assert_eq!(format_usdc(10.5), "10.50 USDC");
/// ```
pub fn format_usdc(amount: f64) -> String {
    format!("{amount:.2} USDC")
}

/// Shortens a wallet address for display: `0x1234...5678` for `chars = 4`.
///
/// Addresses too short to benefit are returned unchanged.
///
/// # Examples
///
/// ```
/// use bountyboard::filter::truncate_address;
///
/// assert_eq!(
///     truncate_address("0xccD7200024A8B5708d381168ec2dB0DC587af83F", 4),
///     "0xccD7...f83F"
/// );
/// assert_eq!(truncate_address("0xabc", 4), "0xabc");
/// ```
pub fn truncate_address(address: &str, chars: usize) -> String {
    let len = address.chars().count();
    if len <= chars * 2 + 2 {
        return address.to_string();
    }
    let head: String = address.chars().take(chars + 2).collect();
    let tail: String = address.chars().skip(len - chars).collect();
    format!("{head}...{tail}")
}
