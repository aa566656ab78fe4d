use serde::{Deserialize, Serialize};

// Shipping address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub person_id: i64,
    pub label: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Address creation payload, validated client-side before submission.
#[derive(Debug, Clone, Serialize)]
pub struct NewAddress {
    pub label: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Order lifecycle; transitions are backend-owned and only read here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

// Order model. One order per cart item; orders are never batched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    /// The sold listing or quick-sale id.
    pub source_item_id: i64,
    pub product_price: f64,
    pub shipping_cost: f64,
    pub platform_fee: f64,
    pub shipping_address_id: i64,
    pub billing_address_id: i64,
    pub status: OrderStatus,
}

/// Order creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub source_item_id: i64,
    pub product_price: f64,
    pub shipping_cost: f64,
    pub platform_fee: f64,
    pub shipping_address_id: i64,
    pub billing_address_id: i64,
}

/// One rate quote. Ephemeral, fetched per checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingRate {
    pub rate_id: String,
    pub provider: String,
    pub service_level: String,
    pub amount: f64,
    pub duration_label: String,
    pub estimated_days: u32,
}

/// Approximate parcel derived from the cart contents.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PackageEstimate {
    pub weight_kg: f64,
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

/// Rate quote request: destination plus the estimated parcel. The origin is
/// optional; the backend falls back to the platform origin when absent.
#[derive(Debug, Clone, Serialize)]
pub struct RateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address_id: Option<i64>,
    pub to_address_id: i64,
    pub package: PackageEstimate,
}

/// Processor-side handle for a pending charge. Single-use.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub payment_intent_id: String,
    pub client_secret: String,
}

/// Payment intent creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIntentRequest {
    pub amount: f64,
    pub currency: String,
    pub order_id: i64,
    pub description: String,
}
