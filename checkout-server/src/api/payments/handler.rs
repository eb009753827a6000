//! Payment Callback Handler
//!
//! The gateway retries callbacks until it sees a 2xx, so this endpoint
//! always answers 200 with a structured report; the settlement CAS makes
//! the retries harmless.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::settlement::SettlementReport;
use crate::utils::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct PaymentCallback {
    pub order_id: String,
    pub success: bool,
}

/// POST /api/payments/callback - apply a payment result
pub async fn callback(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentCallback>,
) -> Json<ApiResponse<SettlementReport>> {
    tracing::info!(
        order_id = %payload.order_id,
        success = payload.success,
        "Payment callback received"
    );

    let report = state
        .settlement
        .handle_payment_result(&payload.order_id, payload.success)
        .await;

    Json(ApiResponse::success(report))
}
