//! Order Aggregate
//!
//! Creation, totals, and cancellation. Payment transitions live in the
//! settlement module.

pub mod totals;

use crate::db::models::{Order, OrderItem, OrderStatus, OrderType};
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::util::now_millis;
use std::sync::Arc;

/// Input for creating an order, after prices have been resolved from the
/// catalog and any promo discount has been computed
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub delivery_fee: f64,
    pub discount: f64,
    pub promo_code: Option<String>,
    pub promo_id: Option<String>,
    pub order_type: OrderType,
}

/// Order creation and cancellation
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<OrderRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<OrderRepository>) -> Self {
        Self { orders }
    }

    /// Validate and persist a new order in PENDING_PAYMENT.
    ///
    /// Food orders clear the user's saved cart in the same transaction.
    pub async fn create(&self, input: NewOrder) -> AppResult<Order> {
        if input.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        for item in &input.items {
            totals::validate_item(item)?;
        }
        totals::validate_fee(input.delivery_fee, "delivery_fee")?;

        let subtotal = totals::compute_subtotal(&input.items);
        if !input.discount.is_finite() || input.discount < 0.0 {
            return Err(AppError::new(ErrorCode::InvalidDiscount));
        }
        if input.discount > subtotal {
            return Err(AppError::with_message(
                ErrorCode::InvalidDiscount,
                format!(
                    "discount {} exceeds subtotal {subtotal}",
                    input.discount
                ),
            ));
        }

        let amount = totals::compute_amount(subtotal, input.delivery_fee, input.discount);
        if amount <= 0.0 {
            return Err(AppError::new(ErrorCode::InvalidAmount));
        }

        let order = Order {
            id: None,
            user_id: input.user_id,
            items: input.items,
            subtotal,
            delivery_fee: input.delivery_fee,
            discount: input.discount,
            amount,
            promo_code: input.promo_code,
            promo_id: input.promo_id,
            status: OrderStatus::PendingPayment,
            payment: false,
            order_type: input.order_type,
            created_at: now_millis(),
        };

        let created = match order.order_type {
            OrderType::Food => self.orders.create_and_clear_cart(order).await?,
            OrderType::Course => self.orders.create(order).await?,
        };

        tracing::info!(
            order_id = %created.id_string(),
            amount = created.amount,
            "Order created"
        );
        Ok(created)
    }

    /// Cancel an unpaid order. Paid orders cannot be cancelled.
    ///
    /// The delete is conditional on `payment = false` in storage, so a
    /// payment confirmed mid-request cannot be cancelled away.
    pub async fn cancel(&self, order_id: &str) -> AppResult<()> {
        if self.orders.delete_if_unpaid(order_id).await?.is_some() {
            tracing::info!(order_id, "Order cancelled");
            return Ok(());
        }
        match self.orders.find_by_id(order_id).await? {
            Some(_) => Err(AppError::new(ErrorCode::OrderAlreadyPaid)),
            None => Err(AppError::new(ErrorCode::OrderNotFound)),
        }
    }

    pub async fn find(&self, order_id: &str) -> AppResult<Option<Order>> {
        Ok(self.orders.find_by_id(order_id).await?)
    }
}
