use async_trait::async_trait;
use purple_dog_storefront::cart::CartItem;
use purple_dog_storefront::checkout::{
    Address, AddressGateway, CheckoutStep, CheckoutWizard, ConfirmStatus, CreateIntentRequest,
    NewAddress, NewOrder, Order, OrderGateway, OrderStatus, PaymentGateway, PaymentIntent,
    PaymentOrchestrator, PaymentOutcome, PaymentProcessor, RateRequest, ShippingGateway,
    ShippingRate,
};
use purple_dog_storefront::error::{Result, StoreError};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn init_tracing() {
    purple_dog_storefront::init_tracing();
}

// region:    --- Backend Doubles

struct MockAddresses;

#[async_trait]
impl AddressGateway for MockAddresses {
    async fn list_addresses(&self, person_id: i64) -> Result<Vec<Address>> {
        Ok(vec![saved_address(person_id)])
    }

    async fn create_address(&self, person_id: i64, address: &NewAddress) -> Result<Address> {
        Ok(Address {
            id: 77,
            person_id,
            label: address.label.clone(),
            street: address.street.clone(),
            city: address.city.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
        })
    }
}

struct MockShipping {
    fail: bool,
    rate_amount: f64,
}

#[async_trait]
impl ShippingGateway for MockShipping {
    async fn quote_rates(&self, request: &RateRequest) -> Result<Vec<ShippingRate>> {
        if self.fail {
            return Err(StoreError::Network("rate provider unreachable".to_string()));
        }
        // Sanity on the parcel estimate: one weight unit per item.
        assert!(request.package.weight_kg > 0.0);
        Ok(vec![ShippingRate {
            rate_id: "quoted-1".to_string(),
            provider: "Sendcloud".to_string(),
            service_level: "Standard".to_string(),
            amount: self.rate_amount,
            duration_label: "3-5 business days".to_string(),
            estimated_days: 4,
        }])
    }
}

#[derive(Default)]
struct MockOrders {
    created: Mutex<Vec<Order>>,
    next_id: AtomicI64,
    fail_after: Option<usize>,
}

impl MockOrders {
    fn new() -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(500),
            fail_after: None,
        }
    }
}

#[async_trait]
impl OrderGateway for MockOrders {
    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        if let Some(limit) = self.fail_after {
            if self.created.lock().unwrap().len() >= limit {
                return Err(StoreError::rejection("seller account suspended"));
            }
        }
        let created = Order {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            buyer_id: order.buyer_id,
            seller_id: order.seller_id,
            source_item_id: order.source_item_id,
            product_price: order.product_price,
            shipping_cost: order.shipping_cost,
            platform_fee: order.platform_fee,
            shipping_address_id: order.shipping_address_id,
            billing_address_id: order.billing_address_id,
            status: OrderStatus::Pending,
        };
        self.created.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn get_order(&self, _order_id: i64) -> Result<Order> {
        unimplemented!("not used by these scenarios")
    }

    async fn list_by_buyer(&self, _buyer_id: i64) -> Result<Vec<Order>> {
        Ok(self.created.lock().unwrap().clone())
    }

    async fn list_by_seller(&self, _seller_id: i64) -> Result<Vec<Order>> {
        Ok(Vec::new())
    }

    async fn update_status(&self, _order_id: i64, _status: OrderStatus) -> Result<()> {
        Ok(())
    }

    async fn cancel_order(&self, _order_id: i64) -> Result<()> {
        Ok(())
    }

    async fn confirm_delivery(&self, _order_id: i64) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct MockPayments {
    intents_created: AtomicUsize,
    confirmed: Mutex<Vec<String>>,
}

#[async_trait]
impl PaymentGateway for MockPayments {
    async fn create_intent(&self, request: &CreateIntentRequest) -> Result<PaymentIntent> {
        self.intents_created.fetch_add(1, Ordering::SeqCst);
        Ok(PaymentIntent {
            payment_intent_id: format!("pi_{}", request.order_id),
            client_secret: format!("pi_{}_secret", request.order_id),
        })
    }

    async fn confirm_payment(&self, payment_intent_id: &str) -> Result<String> {
        self.confirmed
            .lock()
            .unwrap()
            .push(payment_intent_id.to_string());
        Ok("succeeded".to_string())
    }
}

/// Hosted widget double returning a scripted sequence of statuses.
struct ScriptedProcessor {
    script: Mutex<Vec<Result<ConfirmStatus>>>,
}

impl ScriptedProcessor {
    fn new(script: Vec<Result<ConfirmStatus>>) -> Self {
        Self {
            script: Mutex::new(script),
        }
    }
}

#[async_trait]
impl PaymentProcessor for ScriptedProcessor {
    async fn confirm_card_payment(
        &self,
        _client_secret: &str,
        _cardholder_name: &str,
    ) -> Result<ConfirmStatus> {
        self.script.lock().unwrap().remove(0)
    }
}

// endregion: --- Backend Doubles

// region:    --- Fixtures

fn saved_address(person_id: i64) -> Address {
    Address {
        id: 11,
        person_id,
        label: "Home".to_string(),
        street: "12 Rue des Lilas".to_string(),
        city: "Lyon".to_string(),
        postal_code: "69003".to_string(),
        country: "FR".to_string(),
    }
}

fn cart_item(product_id: i64, price: f64) -> CartItem {
    CartItem {
        id: format!("173000000{product_id}-{product_id}"),
        product_id,
        title: format!("Listing {product_id}"),
        unit_price: price,
        image_url: None,
        seller_id: 300 + product_id,
        condition: "Very good".to_string(),
        category_label: "Jewelry".to_string(),
    }
}

fn wizard(shipping: MockShipping, orders: Arc<MockOrders>, items: Vec<CartItem>) -> CheckoutWizard {
    CheckoutWizard::new(Arc::new(MockAddresses), Arc::new(shipping), orders, 9, items)
}

fn order(id: i64, price: f64) -> Order {
    Order {
        id,
        buyer_id: 9,
        seller_id: 301,
        source_item_id: 1,
        product_price: price,
        shipping_cost: 5.0,
        platform_fee: price * 0.05,
        shipping_address_id: 11,
        billing_address_id: 11,
        status: OrderStatus::Pending,
    }
}

// endregion: --- Fixtures

// region:    --- Wizard Tests

/// Guards hold: no step 2 without an address, no step 3 without a rate.
#[tokio::test]
async fn wizard_guards_are_enforced() {
    let orders = Arc::new(MockOrders::new());
    let mut wizard = wizard(
        MockShipping {
            fail: false,
            rate_amount: 10.0,
        },
        Arc::clone(&orders),
        vec![cart_item(1, 100.0)],
    );

    assert_eq!(wizard.step(), CheckoutStep::Address);
    let err = wizard.advance().await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(wizard.step(), CheckoutStep::Address);

    wizard.select_address(saved_address(9));
    assert_eq!(wizard.advance().await.unwrap(), CheckoutStep::Shipping);

    let err = wizard.advance().await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(wizard.step(), CheckoutStep::Shipping);

    wizard.select_rate("quoted-1").unwrap();
    assert_eq!(wizard.advance().await.unwrap(), CheckoutStep::Review);

    // Placing orders is gated on being at review.
    wizard.back();
    assert_eq!(wizard.step(), CheckoutStep::Shipping);
    let err = wizard.place_orders().await.unwrap_err();
    assert!(matches!(err, StoreError::Precondition(_)));
}

/// New-address validation runs before any backend call.
#[tokio::test]
async fn short_postal_code_is_rejected_locally() {
    let orders = Arc::new(MockOrders::new());
    let mut wizard = wizard(
        MockShipping {
            fail: false,
            rate_amount: 10.0,
        },
        orders,
        vec![cart_item(1, 100.0)],
    );

    let err = wizard
        .submit_new_address(NewAddress {
            label: "Home".to_string(),
            street: "12 Rue des Lilas".to_string(),
            city: "Lyon".to_string(),
            postal_code: "690".to_string(),
            country: "FR".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(wizard.selected_address().is_none());
}

/// A failing rate provider degrades to the default table; checkout proceeds.
#[tokio::test]
async fn rate_provider_failure_falls_back_to_defaults() {
    init_tracing();
    let orders = Arc::new(MockOrders::new());
    let mut wizard = wizard(
        MockShipping {
            fail: true,
            rate_amount: 0.0,
        },
        Arc::clone(&orders),
        vec![cart_item(1, 100.0), cart_item(2, 50.0)],
    );

    wizard.select_address(saved_address(9));
    wizard.advance().await.unwrap();

    assert!(wizard.used_fallback_rates());
    assert_eq!(wizard.rates().len(), 2);
    assert!(wizard.rates()[0].amount >= 8.50 && wizard.rates()[0].amount <= 15.00);
    assert!(wizard.rates()[1].amount >= 15.00 && wizard.rates()[1].amount <= 25.00);

    let standard_id = wizard.rates()[0].rate_id.clone();
    wizard.select_rate(&standard_id).unwrap();
    wizard.advance().await.unwrap();
    assert!(wizard.place_orders().await.is_ok());
}

/// Scenario A: 100.00 + 50.00 items, 10.00 rate. Shipping splits evenly,
/// fees are 5% per item, and the buyer total is 160.00.
#[tokio::test]
async fn two_item_checkout_totals_match_policy() {
    init_tracing();
    let orders = Arc::new(MockOrders::new());
    let mut wizard = wizard(
        MockShipping {
            fail: false,
            rate_amount: 10.0,
        },
        Arc::clone(&orders),
        vec![cart_item(1, 100.0), cart_item(2, 50.0)],
    );

    wizard.select_address(saved_address(9));
    wizard.advance().await.unwrap();
    wizard.select_rate("quoted-1").unwrap();
    wizard.advance().await.unwrap();

    let checkout = wizard.place_orders().await.unwrap();
    assert_eq!(checkout.orders.len(), 2);
    assert_eq!(checkout.orders[0].shipping_cost, 5.0);
    assert_eq!(checkout.orders[1].shipping_cost, 5.0);
    assert_eq!(checkout.orders[0].platform_fee, 5.0);
    assert_eq!(checkout.orders[1].platform_fee, 2.5);
    assert_eq!(checkout.grand_total, 160.0);

    // One order per cart item, created against the selected address.
    let created = orders.created.lock().unwrap();
    assert!(created.iter().all(|o| o.shipping_address_id == 11));
}

/// A mid-batch failure is fail-fast and reports how far it got.
#[tokio::test]
async fn partial_order_failure_reports_progress() {
    let orders = Arc::new(MockOrders {
        fail_after: Some(1),
        ..MockOrders::new()
    });
    let mut wizard = wizard(
        MockShipping {
            fail: false,
            rate_amount: 10.0,
        },
        Arc::clone(&orders),
        vec![cart_item(1, 100.0), cart_item(2, 50.0)],
    );

    wizard.select_address(saved_address(9));
    wizard.advance().await.unwrap();
    wizard.select_rate("quoted-1").unwrap();
    wizard.advance().await.unwrap();

    let err = wizard.place_orders().await.unwrap_err();
    let message = err.user_message();
    assert!(message.contains("seller account suspended"), "{message}");
    assert!(message.contains("1 of 2"), "{message}");
    assert_eq!(orders.created.lock().unwrap().len(), 1);
}

// endregion: --- Wizard Tests

// region:    --- Payment Tests

/// Scenario B: an empty order list aborts before any backend call.
#[tokio::test]
async fn empty_orders_abort_before_intent_creation() {
    let payments = Arc::new(MockPayments::default());
    let processor = Arc::new(ScriptedProcessor::new(vec![]));
    let mut orchestrator = PaymentOrchestrator::new(
        Arc::clone(&payments) as Arc<dyn PaymentGateway>,
        processor,
        Vec::new(),
        160.0,
    );

    let err = orchestrator.start().await.unwrap_err();
    assert_eq!(err.user_message(), "no orders to pay");
    assert_eq!(payments.intents_created.load(Ordering::SeqCst), 0);
}

/// A non-positive or non-finite total is rejected locally.
#[tokio::test]
async fn invalid_total_aborts_before_intent_creation() {
    for bad_total in [0.0, -10.0, f64::NAN] {
        let payments = Arc::new(MockPayments::default());
        let processor = Arc::new(ScriptedProcessor::new(vec![]));
        let mut orchestrator = PaymentOrchestrator::new(
            Arc::clone(&payments) as Arc<dyn PaymentGateway>,
            processor,
            vec![order(500, 100.0)],
            bad_total,
        );
        let err = orchestrator.start().await.unwrap_err();
        assert!(matches!(err, StoreError::Precondition(_)));
        assert_eq!(payments.intents_created.load(Ordering::SeqCst), 0);
    }
}

/// Happy path: confirm succeeds, the backend is told, success is reported.
#[tokio::test]
async fn settled_charge_is_confirmed_with_backend() {
    init_tracing();
    let payments = Arc::new(MockPayments::default());
    let processor = Arc::new(ScriptedProcessor::new(vec![Ok(ConfirmStatus::Succeeded)]));
    let mut orchestrator = PaymentOrchestrator::new(
        Arc::clone(&payments) as Arc<dyn PaymentGateway>,
        processor,
        vec![order(500, 100.0), order(501, 50.0)],
        160.0,
    );

    let intent = orchestrator.start().await.unwrap();
    assert_eq!(intent.payment_intent_id, "pi_500");

    let outcome = orchestrator.submit("Jeanne Martin").await.unwrap();
    assert_eq!(outcome, PaymentOutcome::Succeeded);
    assert_eq!(
        payments.confirmed.lock().unwrap().as_slice(),
        ["pi_500".to_string()]
    );
}

/// The cardholder name is required before the processor is asked anything.
#[tokio::test]
async fn blank_cardholder_name_is_rejected() {
    let payments = Arc::new(MockPayments::default());
    let processor = Arc::new(ScriptedProcessor::new(vec![Ok(ConfirmStatus::Succeeded)]));
    let mut orchestrator =
        PaymentOrchestrator::new(payments, processor, vec![order(500, 100.0)], 105.0);

    orchestrator.start().await.unwrap();
    let err = orchestrator.submit("   ").await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

/// Scenario C: requires_action is neither success nor failure; the
/// orchestrator waits for the follow-up status.
#[tokio::test]
async fn step_up_authentication_waits_for_follow_up() {
    let payments = Arc::new(MockPayments::default());
    let processor = Arc::new(ScriptedProcessor::new(vec![Ok(
        ConfirmStatus::RequiresAction,
    )]));
    let mut orchestrator = PaymentOrchestrator::new(
        Arc::clone(&payments) as Arc<dyn PaymentGateway>,
        processor,
        vec![order(500, 100.0)],
        105.0,
    );

    orchestrator.start().await.unwrap();
    let outcome = orchestrator.submit("Jeanne Martin").await.unwrap();
    assert_eq!(outcome, PaymentOutcome::AwaitingAction);
    assert!(payments.confirmed.lock().unwrap().is_empty());

    // The widget finishes its challenge and a final status arrives.
    let outcome = orchestrator
        .resolve_pending(ConfirmStatus::Succeeded)
        .await
        .unwrap();
    assert_eq!(outcome, PaymentOutcome::Succeeded);
    assert_eq!(payments.confirmed.lock().unwrap().len(), 1);
}

/// An unrecognized status is a descriptive failure, and the orchestrator
/// stays open for a retry with the same intent.
#[tokio::test]
async fn unknown_status_fails_but_remains_retriable() {
    let payments = Arc::new(MockPayments::default());
    let processor = Arc::new(ScriptedProcessor::new(vec![
        Ok(ConfirmStatus::Other("canceled".to_string())),
        Ok(ConfirmStatus::Succeeded),
    ]));
    let mut orchestrator = PaymentOrchestrator::new(
        Arc::clone(&payments) as Arc<dyn PaymentGateway>,
        processor,
        vec![order(500, 100.0)],
        105.0,
    );

    orchestrator.start().await.unwrap();
    let err = orchestrator.submit("Jeanne Martin").await.unwrap_err();
    assert!(err.user_message().contains("canceled"));

    // Same intent, second attempt.
    assert_eq!(payments.intents_created.load(Ordering::SeqCst), 1);
    let outcome = orchestrator.submit("Jeanne Martin").await.unwrap();
    assert_eq!(outcome, PaymentOutcome::Succeeded);
}

/// `processing` reports a provisional success so the caller can proceed.
#[tokio::test]
async fn processing_status_is_provisional_success() {
    let payments = Arc::new(MockPayments::default());
    let processor = Arc::new(ScriptedProcessor::new(vec![Ok(ConfirmStatus::Processing)]));
    let mut orchestrator = PaymentOrchestrator::new(
        Arc::clone(&payments) as Arc<dyn PaymentGateway>,
        processor,
        vec![order(500, 100.0)],
        105.0,
    );

    orchestrator.start().await.unwrap();
    let outcome = orchestrator.submit("Jeanne Martin").await.unwrap();
    assert_eq!(outcome, PaymentOutcome::Processing);
    // No backend confirm until the processor settles the charge.
    assert!(payments.confirmed.lock().unwrap().is_empty());
}

// endregion: --- Payment Tests
