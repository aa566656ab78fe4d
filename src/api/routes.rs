/// Backend route table. Parametrized resources are path builders, static
/// collections are constants.

/// Active auction listing.
pub const AUCTIONS_ACTIVE: &str = "/auctions/active";

/// Closed auction listing.
pub const AUCTIONS_CLOSED: &str = "/auctions/closed";

/// Full auction listing.
pub const AUCTIONS_ALL: &str = "/auctions";

/// Bid creation.
pub const BIDS: &str = "/bids";

/// Order creation.
pub const ORDERS: &str = "/orders";

/// Category listing.
pub const CATEGORIES: &str = "/categories";

/// Product search with filters.
pub const PRODUCT_SEARCH: &str = "/products/search";

/// Shipment creation returning rate quotes.
pub const SHIPPING_RATES: &str = "/shipments/rates";

/// Payment intent creation.
pub const PAYMENT_INTENT: &str = "/payments/intent";

/// Auction detail.
pub fn auction(id: i64) -> String {
    format!("/auctions/{id}")
}

/// Bid history of an auction, most recent first.
pub fn auction_bids(id: i64) -> String {
    format!("/auctions/{id}/bids")
}

/// Current winning bid of an auction.
pub fn auction_winning_bid(id: i64) -> String {
    format!("/auctions/{id}/bids/winning")
}

/// Server-computed next suggested bid amount.
pub fn auction_next_amount(id: i64) -> String {
    format!("/auctions/{id}/bids/next-amount")
}

/// Addresses of a person (list and create).
pub fn person_addresses(person_id: i64) -> String {
    format!("/persons/{person_id}/addresses")
}

/// Order detail.
pub fn order(id: i64) -> String {
    format!("/orders/{id}")
}

/// Orders placed by a buyer.
pub fn orders_by_buyer(buyer_id: i64) -> String {
    format!("/orders/buyer/{buyer_id}")
}

/// Orders received by a seller.
pub fn orders_by_seller(seller_id: i64) -> String {
    format!("/orders/seller/{seller_id}")
}

/// Order status update.
pub fn order_status(id: i64) -> String {
    format!("/orders/{id}/status")
}

/// Order cancellation.
pub fn order_cancel(id: i64) -> String {
    format!("/orders/{id}/cancel")
}

/// Buyer delivery confirmation.
pub fn order_delivery(id: i64) -> String {
    format!("/orders/{id}/delivery")
}

/// Product detail.
pub fn product(id: i64) -> String {
    format!("/products/{id}")
}

/// Product favorite toggle (POST to set, DELETE to unset).
pub fn product_favorite(id: i64) -> String {
    format!("/products/{id}/favorite")
}

/// Payment confirmation against the backend.
pub fn payment_confirm(intent_id: &str) -> String {
    format!("/payments/{intent_id}/confirm")
}
