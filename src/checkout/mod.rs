// region:    --- Modules
pub mod model;
pub mod payment;
pub mod shipping;
pub mod wizard;

pub use model::{
    Address, CreateIntentRequest, NewAddress, NewOrder, Order, OrderStatus, PackageEstimate,
    PaymentIntent, RateRequest, ShippingRate,
};
pub use payment::{
    ConfirmStatus, PaymentOrchestrator, PaymentOutcome, PaymentPhase, PaymentProcessor,
};
pub use wizard::{CheckoutOrders, CheckoutStep, CheckoutWizard};

// endregion: --- Modules

// region:    --- Imports
use crate::api::{routes, ApiClient};
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

// endregion: --- Imports

// region:    --- Gateways

/// Address resource calls.
#[async_trait]
pub trait AddressGateway: Send + Sync {
    async fn list_addresses(&self, person_id: i64) -> Result<Vec<Address>>;
    async fn create_address(&self, person_id: i64, address: &NewAddress) -> Result<Address>;
}

/// Order resource calls.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, order: &NewOrder) -> Result<Order>;
    async fn get_order(&self, order_id: i64) -> Result<Order>;
    async fn list_by_buyer(&self, buyer_id: i64) -> Result<Vec<Order>>;
    async fn list_by_seller(&self, seller_id: i64) -> Result<Vec<Order>>;
    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<()>;
    async fn cancel_order(&self, order_id: i64) -> Result<()>;
    async fn confirm_delivery(&self, order_id: i64) -> Result<()>;
}

/// Rate provider boundary.
#[async_trait]
pub trait ShippingGateway: Send + Sync {
    async fn quote_rates(&self, request: &RateRequest) -> Result<Vec<ShippingRate>>;
}

/// Backend payment endpoints (intent creation and confirmation).
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(&self, request: &CreateIntentRequest) -> Result<PaymentIntent>;
    async fn confirm_payment(&self, payment_intent_id: &str) -> Result<String>;
}

#[async_trait]
impl AddressGateway for ApiClient {
    async fn list_addresses(&self, person_id: i64) -> Result<Vec<Address>> {
        self.get(&routes::person_addresses(person_id)).await
    }

    async fn create_address(&self, person_id: i64, address: &NewAddress) -> Result<Address> {
        self.post(&routes::person_addresses(person_id), address).await
    }
}

#[async_trait]
impl OrderGateway for ApiClient {
    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        self.post(routes::ORDERS, order).await
    }

    async fn get_order(&self, order_id: i64) -> Result<Order> {
        self.get(&routes::order(order_id)).await
    }

    async fn list_by_buyer(&self, buyer_id: i64) -> Result<Vec<Order>> {
        self.get(&routes::orders_by_buyer(buyer_id)).await
    }

    async fn list_by_seller(&self, seller_id: i64) -> Result<Vec<Order>> {
        self.get(&routes::orders_by_seller(seller_id)).await
    }

    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<()> {
        self.put(&routes::order_status(order_id), &status).await
    }

    async fn cancel_order(&self, order_id: i64) -> Result<()> {
        self.post_action(&routes::order_cancel(order_id)).await
    }

    async fn confirm_delivery(&self, order_id: i64) -> Result<()> {
        self.post_action(&routes::order_delivery(order_id)).await
    }
}

#[async_trait]
impl ShippingGateway for ApiClient {
    async fn quote_rates(&self, request: &RateRequest) -> Result<Vec<ShippingRate>> {
        self.post(routes::SHIPPING_RATES, request).await
    }
}

#[derive(Deserialize)]
struct ConfirmResponse {
    status: String,
}

#[async_trait]
impl PaymentGateway for ApiClient {
    async fn create_intent(&self, request: &CreateIntentRequest) -> Result<PaymentIntent> {
        self.post(routes::PAYMENT_INTENT, request).await
    }

    async fn confirm_payment(&self, payment_intent_id: &str) -> Result<String> {
        let response: ConfirmResponse = self
            .post(&routes::payment_confirm(payment_intent_id), &serde_json::json!({}))
            .await?;
        Ok(response.status)
    }
}

// endregion: --- Gateways
