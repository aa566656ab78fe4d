/// Auction detail orchestration.
/// 1. Full load on entry (auction + bids + winning bid + next amount)
/// 2. A 10-second poll refreshing only the bid list and the winning bid
/// 3. Role-gated bidding, re-evaluated on every check
/// 4. A successful bid triggers a full reload, not an incremental patch
// region:    --- Imports
use crate::auction::bidding::{self, BidPlacement};
use crate::auction::model::{Auction, AuctionStatus, Bid};
use crate::auction::AuctionGateway;
use crate::config::POLL_INTERVAL;
use crate::error::Result;
use crate::session::SessionContext;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- View State

/// Where the screen is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Error(String),
    Ready,
}

/// Everything the auction detail screen renders from.
#[derive(Debug, Clone)]
pub struct AuctionView {
    pub phase: ViewPhase,
    pub auction: Option<Auction>,
    pub bids: Vec<Bid>,
    pub winning_bid: Option<Bid>,
    /// Server-computed suggested next amount.
    pub next_amount: Option<f64>,
}

impl Default for AuctionView {
    fn default() -> Self {
        Self {
            phase: ViewPhase::Loading,
            auction: None,
            bids: Vec::new(),
            winning_bid: None,
            next_amount: None,
        }
    }
}

// endregion: --- View State

// region:    --- Orchestrator

/// Composes the countdown, ledger and bid placement over one auction.
pub struct AuctionDetailOrchestrator {
    gateway: Arc<dyn AuctionGateway>,
    auction_id: i64,
    view: Arc<RwLock<AuctionView>>,
    poll: Option<JoinHandle<()>>,
}

impl AuctionDetailOrchestrator {
    pub fn new(gateway: Arc<dyn AuctionGateway>, auction_id: i64) -> Self {
        Self {
            gateway,
            auction_id,
            view: Arc::new(RwLock::new(AuctionView::default())),
            poll: None,
        }
    }

    pub fn auction_id(&self) -> i64 {
        self.auction_id
    }

    /// Snapshot of the current view state.
    pub async fn view(&self) -> AuctionView {
        self.view.read().await.clone()
    }

    /// Full load; on success the screen is ready and the poll is running.
    pub async fn load(&mut self) -> Result<()> {
        info!("{:<12} --> loading auction {}", "Auction", self.auction_id);
        match Self::fetch_all(self.gateway.as_ref(), self.auction_id).await {
            Ok(loaded) => {
                *self.view.write().await = loaded;
                self.start_poll();
                Ok(())
            }
            Err(err) => {
                self.view.write().await.phase = ViewPhase::Error(err.user_message());
                Err(err)
            }
        }
    }

    /// Switch to another auction. The running poll is cancelled and the view
    /// resets to loading; the caller drives the next `load`.
    pub fn set_auction(&mut self, auction_id: i64) {
        if auction_id == self.auction_id {
            return;
        }
        self.cancel_poll();
        self.auction_id = auction_id;
        self.view = Arc::new(RwLock::new(AuctionView::default()));
    }

    /// Bidding is allowed only for an authenticated professional while the
    /// auction is active. All three conditions are checked on every call.
    pub async fn can_bid(&self, session: &SessionContext) -> bool {
        let view = self.view.read().await;
        let active = matches!(
            view.auction.as_ref().map(|auction| auction.status),
            Some(AuctionStatus::Active)
        );
        session.is_authenticated() && session.is_professional() && active
    }

    /// Place a bid, then reload everything so the view matches the server's
    /// authoritative price. A rejection is propagated untouched.
    pub async fn place_bid(&self, amount: f64, session: &SessionContext) -> Result<Bid> {
        let placement = BidPlacement {
            auction_id: self.auction_id,
            amount,
            bidder_id: session.person_id(),
            max_amount: None,
        };
        let bid = bidding::place_bid(self.gateway.as_ref(), placement).await?;

        match Self::fetch_all(self.gateway.as_ref(), self.auction_id).await {
            Ok(loaded) => *self.view.write().await = loaded,
            Err(err) => {
                // The bid stands; only the refresh failed.
                warn!(
                    "{:<12} --> reload after bid failed: {}",
                    "Auction",
                    err.user_message()
                );
                self.view.write().await.phase = ViewPhase::Error(err.user_message());
            }
        }
        Ok(bid)
    }

    /// One poll iteration: bid list and winning bid only, merged in place.
    async fn refresh_bids(
        gateway: &dyn AuctionGateway,
        view: &RwLock<AuctionView>,
        auction_id: i64,
    ) -> Result<()> {
        let bids = gateway.list_bids(auction_id).await?;
        let winning_bid = gateway.winning_bid(auction_id).await?;
        let mut view = view.write().await;
        view.bids = bids;
        view.winning_bid = winning_bid;
        Ok(())
    }

    async fn fetch_all(gateway: &dyn AuctionGateway, auction_id: i64) -> Result<AuctionView> {
        let auction = gateway.get_auction(auction_id).await?;
        let bids = gateway.list_bids(auction_id).await?;
        let winning_bid = gateway.winning_bid(auction_id).await?;
        let next_amount = gateway.next_suggested_amount(auction_id).await?;
        Ok(AuctionView {
            phase: ViewPhase::Ready,
            auction: Some(auction),
            bids,
            winning_bid,
            next_amount: Some(next_amount),
        })
    }

    fn start_poll(&mut self) {
        if self.poll.is_some() {
            return;
        }
        let gateway = Arc::clone(&self.gateway);
        let view = Arc::clone(&self.view);
        let auction_id = self.auction_id;
        self.poll = Some(tokio::spawn(async move {
            let mut ticker = interval(POLL_INTERVAL);
            // The first interval tick fires immediately; the full load just
            // happened, so skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(err) = Self::refresh_bids(gateway.as_ref(), &view, auction_id).await {
                    // Keep the last good state; the next tick retries.
                    warn!(
                        "{:<12} --> poll for auction {} failed: {}",
                        "Auction",
                        auction_id,
                        err.user_message()
                    );
                }
            }
        }));
    }

    fn cancel_poll(&mut self) {
        if let Some(task) = self.poll.take() {
            task.abort();
        }
    }
}

impl Drop for AuctionDetailOrchestrator {
    fn drop(&mut self) {
        self.cancel_poll();
    }
}

// endregion: --- Orchestrator
