use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Auction lifecycle state. Transitions are server-owned; the client only
/// observes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuctionStatus {
    Active,
    Closed,
}

// Auction model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    pub id: i64,
    pub status: AuctionStatus,
    pub starting_price: f64,
    /// Monotonically non-decreasing while the auction is active.
    pub current_price: f64,
    #[serde(default)]
    pub reserve_price: Option<f64>,
    pub end_date: DateTime<Utc>,
    pub total_bid_count: i64,
    pub product_id: i64,
}

// Bid model. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bid {
    pub id: i64,
    pub auction_id: i64,
    pub bidder_id: i64,
    pub bidder_label: String,
    pub amount: f64,
    pub placed_at: DateTime<Utc>,
}
