/// Checkout wizard: a linear three-step state machine.
/// 1. ADDRESS — a shipping address must be selected or created
/// 2. SHIPPING — a rate must be selected; quotes degrade to defaults
/// 3. REVIEW — placing orders, one per cart item, then payment hand-off
// region:    --- Imports
use crate::cart::CartItem;
use crate::checkout::model::{Address, NewAddress, NewOrder, Order, RateRequest, ShippingRate};
use crate::checkout::shipping::{default_rates, estimate_package, split_evenly};
use crate::checkout::{AddressGateway, OrderGateway, ShippingGateway};
use crate::config::PLATFORM_FEE_RATE;
use crate::error::{Result, StoreError};
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Steps

/// Wizard position. Forward transitions are guarded; `back` moves one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckoutStep {
    Address,
    Shipping,
    Review,
}

impl CheckoutStep {
    /// 1-based step number as shown in the progress header.
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Address => 1,
            CheckoutStep::Shipping => 2,
            CheckoutStep::Review => 3,
        }
    }
}

// endregion: --- Steps

// region:    --- Validation

const MIN_POSTAL_CODE_LEN: usize = 5;

/// Client-side address checks, run before any network call.
pub fn validate_new_address(address: &NewAddress) -> Result<()> {
    if address.label.trim().is_empty() {
        return Err(StoreError::Validation("address label is required".to_string()));
    }
    if address.street.trim().is_empty() {
        return Err(StoreError::Validation("street is required".to_string()));
    }
    if address.city.trim().is_empty() {
        return Err(StoreError::Validation("city is required".to_string()));
    }
    if address.postal_code.trim().len() < MIN_POSTAL_CODE_LEN {
        return Err(StoreError::Validation(format!(
            "postal code must be at least {MIN_POSTAL_CODE_LEN} characters"
        )));
    }
    Ok(())
}

// endregion: --- Validation

// region:    --- Wizard

/// Result of order creation, handed to the payment orchestrator.
#[derive(Debug, Clone)]
pub struct CheckoutOrders {
    pub orders: Vec<Order>,
    /// What the buyer is charged: items plus shipping. The platform fee is
    /// recorded on each order but settled on the seller side.
    pub grand_total: f64,
}

pub struct CheckoutWizard {
    addresses: Arc<dyn AddressGateway>,
    shipping: Arc<dyn ShippingGateway>,
    orders: Arc<dyn OrderGateway>,
    buyer_id: i64,
    items: Vec<CartItem>,
    step: CheckoutStep,
    known_addresses: Vec<Address>,
    selected_address: Option<Address>,
    rates: Vec<ShippingRate>,
    selected_rate: Option<ShippingRate>,
    used_fallback_rates: bool,
}

impl CheckoutWizard {
    /// Start a checkout over a snapshot of the cart.
    pub fn new(
        addresses: Arc<dyn AddressGateway>,
        shipping: Arc<dyn ShippingGateway>,
        orders: Arc<dyn OrderGateway>,
        buyer_id: i64,
        items: Vec<CartItem>,
    ) -> Self {
        Self {
            addresses,
            shipping,
            orders,
            buyer_id,
            items,
            step: CheckoutStep::Address,
            known_addresses: Vec::new(),
            selected_address: None,
            rates: Vec::new(),
            selected_rate: None,
            used_fallback_rates: false,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Load the buyer's saved addresses for step 1.
    pub async fn load_addresses(&mut self) -> Result<&[Address]> {
        self.known_addresses = self.addresses.list_addresses(self.buyer_id).await?;
        Ok(&self.known_addresses)
    }

    pub fn select_address(&mut self, address: Address) {
        self.selected_address = Some(address);
    }

    pub fn selected_address(&self) -> Option<&Address> {
        self.selected_address.as_ref()
    }

    /// Validate and create a new address, then select it.
    pub async fn submit_new_address(&mut self, address: NewAddress) -> Result<Address> {
        validate_new_address(&address)?;
        let created = self.addresses.create_address(self.buyer_id, &address).await?;
        info!("{:<12} --> created address {}", "Checkout", created.id);
        self.known_addresses.push(created.clone());
        self.selected_address = Some(created.clone());
        Ok(created)
    }

    /// Rates offered for step 2.
    pub fn rates(&self) -> &[ShippingRate] {
        &self.rates
    }

    /// True when the quote came from the fixed default table.
    pub fn used_fallback_rates(&self) -> bool {
        self.used_fallback_rates
    }

    /// Select one of the offered rates by its id.
    pub fn select_rate(&mut self, rate_id: &str) -> Result<()> {
        match self.rates.iter().find(|rate| rate.rate_id == rate_id) {
            Some(rate) => {
                self.selected_rate = Some(rate.clone());
                Ok(())
            }
            None => Err(StoreError::Validation(
                "select one of the offered shipping methods".to_string(),
            )),
        }
    }

    pub fn selected_rate(&self) -> Option<&ShippingRate> {
        self.selected_rate.as_ref()
    }

    /// Move forward one step. Guards are enforced here, not in the UI.
    pub async fn advance(&mut self) -> Result<CheckoutStep> {
        match self.step {
            CheckoutStep::Address => {
                let address = self.selected_address.clone().ok_or_else(|| {
                    StoreError::Validation("select a shipping address first".to_string())
                })?;
                self.fetch_rates(&address).await;
                self.step = CheckoutStep::Shipping;
            }
            CheckoutStep::Shipping => {
                if self.selected_rate.is_none() {
                    return Err(StoreError::Validation(
                        "select a shipping method first".to_string(),
                    ));
                }
                self.step = CheckoutStep::Review;
            }
            CheckoutStep::Review => {
                return Err(StoreError::Validation(
                    "review is the final step".to_string(),
                ));
            }
        }
        info!("{:<12} --> step {}", "Checkout", self.step.number());
        Ok(self.step)
    }

    /// Move back one step. Backing out of step 1 is a no-op.
    pub fn back(&mut self) {
        self.step = match self.step {
            CheckoutStep::Address | CheckoutStep::Shipping => CheckoutStep::Address,
            CheckoutStep::Review => CheckoutStep::Shipping,
        };
    }

    /// Quote rates for the selected address. A provider failure is not an
    /// error state: the fixed default table keeps checkout progressable.
    async fn fetch_rates(&mut self, address: &Address) {
        let request = RateRequest {
            from_address_id: None,
            to_address_id: address.id,
            package: estimate_package(self.items.len()),
        };
        let (rates, fallback) = match self.shipping.quote_rates(&request).await {
            Ok(rates) if !rates.is_empty() => (rates, false),
            Ok(_) => {
                warn!("{:<12} --> provider returned no rates, using defaults", "Checkout");
                (default_rates(), true)
            }
            Err(err) => {
                warn!(
                    "{:<12} --> rate quote failed ({}), using defaults",
                    "Checkout",
                    err.user_message()
                );
                (default_rates(), true)
            }
        };
        self.rates = rates;
        self.used_fallback_rates = fallback;
        self.selected_rate = None;
    }

    /// Create one order per cart item, sequentially, then validate the batch
    /// before payment. A mid-batch failure reports how many orders were
    /// already created.
    pub async fn place_orders(&self) -> Result<CheckoutOrders> {
        if self.step != CheckoutStep::Review {
            return Err(StoreError::Precondition(
                "orders can only be placed from the review step".to_string(),
            ));
        }
        if self.items.is_empty() {
            return Err(StoreError::Precondition("your cart is empty".to_string()));
        }
        let address = self.selected_address.as_ref().ok_or_else(|| {
            StoreError::Precondition("no shipping address selected".to_string())
        })?;
        let rate = self.selected_rate.as_ref().ok_or_else(|| {
            StoreError::Precondition("no shipping method selected".to_string())
        })?;

        let shipping_each = split_evenly(rate.amount, self.items.len());
        let mut created: Vec<Order> = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let new_order = NewOrder {
                buyer_id: self.buyer_id,
                seller_id: item.seller_id,
                source_item_id: item.product_id,
                product_price: item.unit_price,
                shipping_cost: shipping_each,
                platform_fee: item.unit_price * PLATFORM_FEE_RATE,
                shipping_address_id: address.id,
                billing_address_id: address.id,
            };
            match self.orders.create_order(&new_order).await {
                Ok(order) => created.push(order),
                Err(err) => {
                    return Err(partial_failure(err, created.len(), self.items.len()));
                }
            }
        }

        // Fatal-for-this-attempt conditions; payment must not start on these.
        if created.is_empty() {
            return Err(StoreError::Precondition(
                "no orders were created".to_string(),
            ));
        }
        if created[0].id <= 0 {
            return Err(StoreError::Precondition(
                "created order is missing its id".to_string(),
            ));
        }
        let item_total: f64 = created.iter().map(|order| order.product_price).sum();
        let grand_total = item_total + rate.amount;
        if !grand_total.is_finite() || grand_total <= 0.0 {
            return Err(StoreError::Precondition(
                "order total is not a valid amount".to_string(),
            ));
        }

        info!(
            "{:<12} --> {} orders created, total {:.2}",
            "Checkout",
            created.len(),
            grand_total
        );
        Ok(CheckoutOrders {
            orders: created,
            grand_total,
        })
    }
}

/// Keep the failure kind, add how far the batch got.
fn partial_failure(err: StoreError, created: usize, total: usize) -> StoreError {
    let context = format!("({created} of {total} orders were created)");
    match err {
        StoreError::ServerRejection { message, code } => StoreError::ServerRejection {
            message: format!("{message} {context}"),
            code,
        },
        StoreError::Network(message) => StoreError::Network(format!("{message} {context}")),
        other => other,
    }
}

// endregion: --- Wizard
