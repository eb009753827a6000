//! Checkout API Handlers
//!
//! Resolves prices from the catalog, applies the promo policy, creates the
//! order, and opens a hosted payment session.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use shared::util::now_millis;
use validator::Validate;

use crate::api::resolve_principal;
use crate::core::ServerState;
use crate::db::models::{Order, OrderItem, OrderType};
use crate::db::repository::{CourseRepository, FoodItemRepository, PromoRepository};
use crate::orders::{NewOrder, totals};
use crate::promo::{self, PromoRejection};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    pub user_id: String,
    pub order_type: OrderType,
    #[validate(length(min = 1))]
    pub items: Vec<CheckoutItem>,
    pub promo_code: Option<String>,
    pub delivery_fee: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub item_id: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order: Order,
    pub session_id: String,
    pub checkout_url: String,
}

/// POST /api/checkout - create an order and open a payment session
pub async fn checkout(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    // Prices always come from the catalog, never from the client
    let items = resolve_items(&state, &payload).await?;
    let subtotal = totals::compute_subtotal(&items);

    let (discount, promo_code, promo_id) = match payload.promo_code.as_deref() {
        Some(code) => {
            let repo = PromoRepository::new(state.db.clone());
            let promo = repo
                .find_by_code(code)
                .await?
                .ok_or(PromoRejection::NotFound)?;
            let principal = resolve_principal(&state, &payload.user_id).await?;
            let approval = promo::evaluate(&promo, &principal, subtotal, now_millis())?;
            (approval.discount, Some(promo.code), Some(approval.promo_id))
        }
        None => (0.0, None, None),
    };

    let order = state
        .orders
        .create(NewOrder {
            user_id: payload.user_id,
            items,
            delivery_fee: payload.delivery_fee.unwrap_or(0.0),
            discount,
            promo_code,
            promo_id,
            order_type: payload.order_type,
        })
        .await?;

    let session = state.payment.create_session(&order).await?;
    Ok(Json(CheckoutResponse {
        order,
        session_id: session.session_id,
        checkout_url: session.checkout_url,
    }))
}

/// GET /api/orders/:id - order status, polled by the client after the
/// payment redirect
pub async fn get_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders
        .find(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(Json(order))
}

/// DELETE /api/orders/:id - cancel an unpaid order
pub async fn cancel_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<shared::ApiResponse<()>>> {
    state.orders.cancel(&id).await?;
    Ok(Json(shared::ApiResponse::ok()))
}

/// Look up every line in the relevant catalog and price it
async fn resolve_items(
    state: &ServerState,
    payload: &CheckoutRequest,
) -> AppResult<Vec<OrderItem>> {
    let mut items = Vec::with_capacity(payload.items.len());

    match payload.order_type {
        OrderType::Food => {
            let repo = FoodItemRepository::new(state.db.clone());
            for line in &payload.items {
                let item = repo
                    .find_by_id(&line.item_id)
                    .await?
                    .filter(|i| i.is_active)
                    .ok_or_else(|| {
                        AppError::with_message(
                            ErrorCode::ItemNotFound,
                            format!("Item {} not found", line.item_id),
                        )
                    })?;
                items.push(OrderItem {
                    item_id: line.item_id.clone(),
                    name: item.name,
                    quantity: line.quantity,
                    unit_price: item.price,
                    course_id: None,
                });
            }
        }
        OrderType::Course => {
            let repo = CourseRepository::new(state.db.clone());
            for line in &payload.items {
                let course = repo
                    .find_by_id(&line.item_id)
                    .await?
                    .filter(|c| c.is_active)
                    .ok_or_else(|| {
                        AppError::with_message(
                            ErrorCode::CourseNotFound,
                            format!("Course {} not found", line.item_id),
                        )
                    })?;
                items.push(OrderItem {
                    item_id: line.item_id.clone(),
                    name: course.title,
                    quantity: 1,
                    unit_price: course.price,
                    course_id: Some(line.item_id.clone()),
                });
            }
        }
    }

    Ok(items)
}
