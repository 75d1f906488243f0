//! Records returned by the bounty-board API.
//!
//! All records are plain data deserialized fresh from each response. Wire
//! field names match the Rust field names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a bounty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BountyStatus {
    Open,
    Claimed,
    Submitted,
    Completed,
    Cancelled,
}

impl BountyStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [BountyStatus; 5] = [
        BountyStatus::Open,
        BountyStatus::Claimed,
        BountyStatus::Submitted,
        BountyStatus::Completed,
        BountyStatus::Cancelled,
    ];

    /// The wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BountyStatus::Open => "open",
            BountyStatus::Claimed => "claimed",
            BountyStatus::Submitted => "submitted",
            BountyStatus::Completed => "completed",
            BountyStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BountyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a string that is not a known [`BountyStatus`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown bounty status: {0}")]
pub struct ParseStatusError(String);

/// Parses a status name, ignoring case and surrounding whitespace.
///
/// This is more lenient than deserialization: JSON payloads must carry the
/// exact lowercase wire name, so `"OPEN"` parses here but fails to decode.
impl FromStr for BountyStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BountyStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// A comment left on a bounty. Identified only by its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BountyComment {
    pub text: String,
    /// Wallet address of the commenter.
    pub author: String,
    pub created_at: String,
}

/// A task posted on the bounty board.
///
/// The server guarantees `claimer_address` is `None` only while the bounty is
/// open; the client does not check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounty {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub reward_usdc: f64,
    pub status: BountyStatus,
    #[serde(default)]
    pub creator_address: Option<String>,
    #[serde(default)]
    pub claimer_address: Option<String>,
    #[serde(default)]
    pub submission_url: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub comments: Vec<BountyComment>,
    /// ISO-8601 timestamp.
    pub created_at: String,
    /// ISO-8601 timestamp.
    pub updated_at: String,
}

impl Bounty {
    /// Returns `true` while the bounty is open.
    pub fn is_open(&self) -> bool {
        self.status == BountyStatus::Open
    }

    /// Returns `true` once an agent has claimed the bounty.
    pub fn is_claimed(&self) -> bool {
        self.status == BountyStatus::Claimed
    }

    /// Returns `true` once the bounty has been paid out.
    pub fn is_completed(&self) -> bool {
        self.status == BountyStatus::Completed
    }

    /// Case-insensitive substring match on the title or the description.
    ///
    /// An empty keyword matches every bounty.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.title.to_lowercase().contains(&keyword)
            || self.description.to_lowercase().contains(&keyword)
    }

    /// Case-insensitive comparison against `creator_address`.
    pub fn is_created_by(&self, address: &str) -> bool {
        same_address(self.creator_address.as_deref(), address)
    }

    /// Case-insensitive comparison against `claimer_address`.
    ///
    /// Always `false` for unclaimed bounties.
    pub fn is_claimed_by(&self, address: &str) -> bool {
        same_address(self.claimer_address.as_deref(), address)
    }
}

fn same_address(field: Option<&str>, address: &str) -> bool {
    field.is_some_and(|field| field.to_lowercase() == address.to_lowercase())
}

/// Treasury holdings as reported by `/treasury`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreasuryStats {
    pub treasury_value: f64,
    pub eth_balance: f64,
    pub usdc_balance: f64,
    pub market_cap: f64,
    pub mcap_to_treasury: f64,
}

/// Token metadata as reported by `/token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub chain: String,
    #[serde(default)]
    pub contract_address: Option<String>,
    pub market_cap: f64,
}

/// Market cap to treasury ratio as reported by `/ratio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioData {
    pub market_cap: f64,
    pub treasury_value: f64,
    pub ratio: f64,
}

/// Aggregate activity figures as reported by `/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwarmStats {
    pub open_bounties: u64,
    pub total_paid_usdc: f64,
    pub agent_count: u64,
    pub mechanisms_count: u64,
    pub total_volume: f64,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn bounty(id: u64, status: BountyStatus, reward_usdc: f64) -> Bounty {
        Bounty {
            id,
            title: format!("Bounty {id}"),
            description: String::new(),
            reward_usdc,
            status,
            creator_address: Some("0xCreator".to_string()),
            claimer_address: (status != BountyStatus::Open).then(|| "0xClaimer".to_string()),
            submission_url: None,
            feedback: None,
            comments: Vec::new(),
            created_at: format!("2026-02-{:02}T00:00:00Z", id % 28 + 1),
            updated_at: "2026-02-28T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_deserialize_full_bounty() {
        let value = json!({
            "id": 108,
            "title": "Build Farcaster Mini-App",
            "description": "Create a Farcaster Frame for bounties",
            "reward_usdc": 573.0,
            "status": "completed",
            "creator_address": "0xA85bf3202d9716F2dD263ED3dE090D350f0822E4",
            "claimer_address": "0xa85bf3202d9716f2dd263ed3de090d350f0822e4",
            "submission_url": "https://github.com/example/mini-app",
            "feedback": "Great work",
            "comments": [
                {"text": "On it", "author": "0xa85b", "created_at": "2026-02-07T05:00:00Z"}
            ],
            "created_at": "2026-02-07T04:00:00Z",
            "updated_at": "2026-02-07T05:13:27Z"
        });

        let bounty: Bounty = serde_json::from_value(value).unwrap();
        assert_eq!(bounty.id, 108);
        assert!(bounty.is_completed());
        assert_eq!(bounty.comments.len(), 1);
        assert_eq!(bounty.comments[0].text, "On it");
        assert_eq!(bounty.feedback.as_deref(), Some("Great work"));
    }

    #[test]
    fn test_deserialize_minimal_open_bounty() {
        let value = json!({
            "id": 143,
            "title": "Negotiation Simulation",
            "description": "Two agents negotiating",
            "reward_usdc": 20,
            "status": "open",
            "claimer_address": null,
            "created_at": "2026-02-07T00:00:00Z",
            "updated_at": "2026-02-07T00:00:00Z"
        });

        let bounty: Bounty = serde_json::from_value(value).unwrap();
        assert!(bounty.is_open());
        assert_eq!(bounty.reward_usdc, 20.0);
        assert!(bounty.claimer_address.is_none());
        assert!(bounty.creator_address.is_none());
        assert!(bounty.comments.is_empty());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let value = json!({
            "id": 1,
            "title": "t",
            "description": "d",
            "reward_usdc": 1,
            "status": "payment_failed",
            "created_at": "",
            "updated_at": ""
        });

        assert!(serde_json::from_value::<Bounty>(value).is_err());
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in BountyStatus::ALL {
            assert_eq!(status.as_str().parse::<BountyStatus>(), Ok(status));
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                json!(status.to_string())
            );
        }
        assert_eq!("OPEN".parse::<BountyStatus>(), Ok(BountyStatus::Open));
        assert!("payment_failed".parse::<BountyStatus>().is_err());
    }

    #[test]
    fn test_status_decoding_is_strict_about_case() {
        assert_eq!(" Open ".parse::<BountyStatus>(), Ok(BountyStatus::Open));
        assert_eq!(
            serde_json::from_value::<BountyStatus>(json!("open")).unwrap(),
            BountyStatus::Open
        );
        assert!(serde_json::from_value::<BountyStatus>(json!("OPEN")).is_err());
    }

    #[test]
    fn test_keyword_matching() {
        let mut b = bounty(1, BountyStatus::Open, 10.0);
        b.title = "Write a Rust SDK".to_string();
        b.description = "Wrap the HTTP API".to_string();

        assert!(b.matches_keyword("rust"));
        assert!(b.matches_keyword("http api"));
        assert!(b.matches_keyword(""));
        assert!(!b.matches_keyword("python"));
    }

    #[test]
    fn test_address_matching() {
        let open = bounty(1, BountyStatus::Open, 10.0);
        let claimed = bounty(2, BountyStatus::Claimed, 10.0);

        assert!(open.is_created_by("0xcreator"));
        assert!(!open.is_created_by("0xcreat"));
        assert!(!open.is_claimed_by("0xclaimer"));
        assert!(claimed.is_claimed_by("0XCLAIMER"));
    }
}
