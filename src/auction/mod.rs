// region:    --- Modules
pub mod bidding;
pub mod countdown;
pub mod detail;
pub mod ledger;
pub mod model;

pub use bidding::{place_bid, suggested_minimum, BidPlacement};
pub use countdown::{countdown_at, CountdownState, CountdownTimer};
pub use detail::{AuctionDetailOrchestrator, AuctionView, ViewPhase};
pub use ledger::{ledger_rows, LedgerRow};
pub use model::{Auction, AuctionStatus, Bid};

// endregion: --- Modules

// region:    --- Imports
use crate::api::{routes, ApiClient};
use crate::error::Result;
use async_trait::async_trait;

// endregion: --- Imports

// region:    --- Gateway

/// Auction and bid resource calls.
#[async_trait]
pub trait AuctionGateway: Send + Sync {
    async fn get_auction(&self, auction_id: i64) -> Result<Auction>;
    async fn list_active(&self) -> Result<Vec<Auction>>;
    async fn list_closed(&self) -> Result<Vec<Auction>>;
    async fn list_all(&self) -> Result<Vec<Auction>>;
    async fn place_bid(&self, placement: &BidPlacement) -> Result<Bid>;
    async fn list_bids(&self, auction_id: i64) -> Result<Vec<Bid>>;
    async fn winning_bid(&self, auction_id: i64) -> Result<Option<Bid>>;
    async fn next_suggested_amount(&self, auction_id: i64) -> Result<f64>;
}

#[async_trait]
impl AuctionGateway for ApiClient {
    async fn get_auction(&self, auction_id: i64) -> Result<Auction> {
        self.get(&routes::auction(auction_id)).await
    }

    async fn list_active(&self) -> Result<Vec<Auction>> {
        self.get(routes::AUCTIONS_ACTIVE).await
    }

    async fn list_closed(&self) -> Result<Vec<Auction>> {
        self.get(routes::AUCTIONS_CLOSED).await
    }

    async fn list_all(&self) -> Result<Vec<Auction>> {
        self.get(routes::AUCTIONS_ALL).await
    }

    async fn place_bid(&self, placement: &BidPlacement) -> Result<Bid> {
        self.post(routes::BIDS, placement).await
    }

    async fn list_bids(&self, auction_id: i64) -> Result<Vec<Bid>> {
        self.get(&routes::auction_bids(auction_id)).await
    }

    async fn winning_bid(&self, auction_id: i64) -> Result<Option<Bid>> {
        self.get(&routes::auction_winning_bid(auction_id)).await
    }

    async fn next_suggested_amount(&self, auction_id: i64) -> Result<f64> {
        self.get(&routes::auction_next_amount(auction_id)).await
    }
}

// endregion: --- Gateway
