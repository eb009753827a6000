//! Payment Session Provider
//!
//! Creates hosted checkout sessions with the external payment gateway.
//! The gateway later confirms or fails the payment through the callback
//! endpoint; this module never mutates orders.

use crate::db::models::Order;
use crate::utils::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A hosted checkout session the client is redirected to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub session_id: String,
    pub checkout_url: String,
}

/// Seam for the payment gateway
#[async_trait]
pub trait PaymentSessionProvider: Send + Sync {
    async fn create_session(&self, order: &Order) -> AppResult<CheckoutSession>;
}

#[derive(Debug, Serialize)]
struct SessionRequest {
    order_id: String,
    amount: f64,
    currency: &'static str,
    success_url: String,
    cancel_url: String,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    id: String,
    url: String,
}

/// HTTP implementation talking to the gateway's session endpoint
pub struct HttpPaymentProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    success_url: String,
    cancel_url: String,
}

impl HttpPaymentProvider {
    pub fn new(
        base_url: String,
        api_key: String,
        success_url: String,
        cancel_url: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            success_url,
            cancel_url,
        }
    }
}

#[async_trait]
impl PaymentSessionProvider for HttpPaymentProvider {
    async fn create_session(&self, order: &Order) -> AppResult<CheckoutSession> {
        let request = SessionRequest {
            order_id: order.id_string(),
            amount: order.amount,
            currency: "EUR",
            success_url: self.success_url.clone(),
            cancel_url: self.cancel_url.clone(),
        };

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::with_message(
                    ErrorCode::PaymentSessionFailed,
                    format!("Payment gateway unreachable: {e}"),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %body, "Payment session creation rejected");
            return Err(AppError::with_message(
                ErrorCode::PaymentSessionFailed,
                format!("Payment gateway returned {status}"),
            ));
        }

        let session: SessionResponse = response.json().await.map_err(|e| {
            AppError::with_message(
                ErrorCode::PaymentSessionFailed,
                format!("Invalid payment gateway response: {e}"),
            )
        })?;

        tracing::info!(
            order_id = %order.id_string(),
            session_id = %session.id,
            "Checkout session created"
        );
        Ok(CheckoutSession {
            session_id: session.id,
            checkout_url: session.url,
        })
    }
}
