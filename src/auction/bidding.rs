/// Bid placement.
/// 1. Client-side checks are limited to "is this a usable number"
/// 2. The increment table is advisory only; the server's verdict is
///    authoritative and its rejection is surfaced verbatim
// region:    --- Imports
use crate::auction::model::Bid;
use crate::auction::AuctionGateway;
use crate::error::{Result, StoreError};
use serde::Serialize;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Increment Policy

/// Minimum increment above the current price, by price band.
pub fn minimum_increment(current_price: f64) -> f64 {
    if current_price < 1_000.0 {
        50.0
    } else if current_price < 5_000.0 {
        100.0
    } else if current_price < 10_000.0 {
        200.0
    } else {
        500.0
    }
}

/// Advisory next bid floor shown to the user. The backend computes the real
/// one; this exists so the form can hint before the first round trip.
pub fn suggested_minimum(current_price: f64) -> f64 {
    current_price + minimum_increment(current_price)
}

// endregion: --- Increment Policy

// region:    --- Placement

/// Bid creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct BidPlacement {
    pub auction_id: i64,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bidder_id: Option<i64>,
    /// Optional proxy-bidding ceiling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
}

/// Submit a bid.
///
/// Failures are propagated, never swallowed, so the presenting form can show
/// an inline message; the flow does not own the entered amount and therefore
/// cannot clear it. A rejection for being at or below the current price (or
/// under the increment) is the server's call to make.
pub async fn place_bid(gateway: &dyn AuctionGateway, placement: BidPlacement) -> Result<Bid> {
    if !placement.amount.is_finite() || placement.amount <= 0.0 {
        return Err(StoreError::Validation(
            "enter a valid bid amount".to_string(),
        ));
    }

    info!(
        "{:<12} --> placing bid of {} on auction {}",
        "Bid", placement.amount, placement.auction_id
    );
    match gateway.place_bid(&placement).await {
        Ok(bid) => Ok(bid),
        Err(err) => {
            warn!(
                "{:<12} --> bid on auction {} rejected: {}",
                "Bid",
                placement.auction_id,
                err.user_message()
            );
            Err(err)
        }
    }
}

// endregion: --- Placement

// region:    --- Tests


// endregion: --- Tests
