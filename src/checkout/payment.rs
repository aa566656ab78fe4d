/// Payment orchestration over the hosted card widget.
/// 1. Preconditions are checked before the intent call, not after
/// 2. Step-up authentication is owned by the processor's widget; this
///    orchestrator only waits for the resulting status
/// 3. Failures leave the orchestrator open so the user can retry
// region:    --- Imports
use crate::checkout::model::{CreateIntentRequest, Order, PaymentIntent};
use crate::checkout::PaymentGateway;
use crate::error::{Result, StoreError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Processor Boundary

/// Outcome of a processor confirmation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmStatus {
    Succeeded,
    /// Step-up authentication pending inside the hosted widget.
    RequiresAction,
    /// The charge is in flight on the processor side.
    Processing,
    /// Any status this client does not recognize.
    Other(String),
}

impl ConfirmStatus {
    /// Map a processor status string onto the outcomes this client handles.
    pub fn from_status(status: &str) -> Self {
        match status {
            "succeeded" => ConfirmStatus::Succeeded,
            "requires_action" | "requires_source_action" => ConfirmStatus::RequiresAction,
            "processing" => ConfirmStatus::Processing,
            other => ConfirmStatus::Other(other.to_string()),
        }
    }
}

/// The payment processor's client library and hosted card-input widget,
/// treated as an opaque external dependency.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Confirm the charge using the widget's captured card data and the
    /// intent's client secret.
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        cardholder_name: &str,
    ) -> Result<ConfirmStatus>;
}

// endregion: --- Processor Boundary

// region:    --- Orchestrator

/// Where the payment stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentPhase {
    /// Card details being collected; submission (or re-submission) allowed.
    Collecting,
    /// Waiting on the widget's step-up authentication outcome.
    AwaitingAction,
    /// The charge went through (or is settling processor-side).
    Settled,
}

/// What a submission attempt reports upward. The caller clears the cart and
/// closes the wizard on `Succeeded`; `Processing` may be treated the same,
/// optimistically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Succeeded,
    Processing,
    /// Neither success nor failure yet; a follow-up status will arrive.
    AwaitingAction,
}

pub struct PaymentOrchestrator {
    payments: Arc<dyn PaymentGateway>,
    processor: Arc<dyn PaymentProcessor>,
    orders: Vec<Order>,
    grand_total: f64,
    intent: Option<PaymentIntent>,
    phase: PaymentPhase,
}

impl PaymentOrchestrator {
    pub fn new(
        payments: Arc<dyn PaymentGateway>,
        processor: Arc<dyn PaymentProcessor>,
        orders: Vec<Order>,
        grand_total: f64,
    ) -> Self {
        Self {
            payments,
            processor,
            orders,
            grand_total,
            intent: None,
            phase: PaymentPhase::Collecting,
        }
    }

    pub fn phase(&self) -> PaymentPhase {
        self.phase
    }

    pub fn intent(&self) -> Option<&PaymentIntent> {
        self.intent.as_ref()
    }

    /// Create the payment intent the card widget will bind to. Precondition
    /// failures abort before any network call; one intent per checkout total.
    pub async fn start(&mut self) -> Result<PaymentIntent> {
        if self.orders.is_empty() {
            return Err(StoreError::Precondition("no orders to pay".to_string()));
        }
        let first_order = &self.orders[0];
        if first_order.id <= 0 {
            return Err(StoreError::Precondition(
                "created order is missing its id".to_string(),
            ));
        }
        if !self.grand_total.is_finite() || self.grand_total <= 0.0 {
            return Err(StoreError::Precondition(
                "payment total must be a positive amount".to_string(),
            ));
        }

        if let Some(intent) = &self.intent {
            return Ok(intent.clone());
        }
        let request = CreateIntentRequest {
            amount: self.grand_total,
            currency: "eur".to_string(),
            order_id: first_order.id,
            description: format!("Purple Dog order #{}", first_order.id),
        };
        let intent = self.payments.create_intent(&request).await?;
        info!(
            "{:<12} --> intent {} created for {:.2}",
            "Payment", intent.payment_intent_id, self.grand_total
        );
        self.intent = Some(intent.clone());
        Ok(intent)
    }

    /// Submit the card form: require a cardholder name, confirm through the
    /// processor, and reconcile a settled charge with the backend.
    pub async fn submit(&mut self, cardholder_name: &str) -> Result<PaymentOutcome> {
        if cardholder_name.trim().is_empty() {
            return Err(StoreError::Validation(
                "cardholder name is required".to_string(),
            ));
        }
        let client_secret = match &self.intent {
            Some(intent) => intent.client_secret.clone(),
            None => {
                return Err(StoreError::Precondition(
                    "payment has not been initialized".to_string(),
                ))
            }
        };

        let status = match self
            .processor
            .confirm_card_payment(&client_secret, cardholder_name.trim())
            .await
        {
            Ok(status) => status,
            Err(err) => {
                // Stay open for a retry.
                warn!(
                    "{:<12} --> confirmation failed: {}",
                    "Payment",
                    err.user_message()
                );
                self.phase = PaymentPhase::Collecting;
                return Err(err);
            }
        };
        self.apply_status(status).await
    }

    /// Apply the follow-up status once the widget's step-up flow resolves.
    pub async fn resolve_pending(&mut self, status: ConfirmStatus) -> Result<PaymentOutcome> {
        if self.phase != PaymentPhase::AwaitingAction {
            return Err(StoreError::Precondition(
                "no authentication is pending".to_string(),
            ));
        }
        self.apply_status(status).await
    }

    async fn apply_status(&mut self, status: ConfirmStatus) -> Result<PaymentOutcome> {
        match status {
            ConfirmStatus::Succeeded => {
                let intent_id = match &self.intent {
                    Some(intent) => intent.payment_intent_id.clone(),
                    None => {
                        return Err(StoreError::Precondition(
                            "payment has not been initialized".to_string(),
                        ))
                    }
                };
                self.payments.confirm_payment(&intent_id).await?;
                self.phase = PaymentPhase::Settled;
                info!("{:<12} --> intent {} settled", "Payment", intent_id);
                Ok(PaymentOutcome::Succeeded)
            }
            ConfirmStatus::RequiresAction => {
                info!("{:<12} --> waiting on step-up authentication", "Payment");
                self.phase = PaymentPhase::AwaitingAction;
                Ok(PaymentOutcome::AwaitingAction)
            }
            ConfirmStatus::Processing => {
                self.phase = PaymentPhase::Settled;
                Ok(PaymentOutcome::Processing)
            }
            ConfirmStatus::Other(status) => {
                self.phase = PaymentPhase::Collecting;
                Err(StoreError::rejection(format!(
                    "payment was not completed (status: {status})"
                )))
            }
        }
    }
}

// endregion: --- Orchestrator

// region:    --- Tests


// endregion: --- Tests
