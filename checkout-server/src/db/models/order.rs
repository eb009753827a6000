//! Order Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// Order type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Food,
    Course,
}

/// Order lifecycle status
///
/// ```text
/// PENDING_PAYMENT --payment success--> PAID --settle--> SETTLED
/// PENDING_PAYMENT --payment failure--> (deleted)
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    PendingPayment,
    Paid,
    Settled,
}

/// A line item inside an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Catalog item id for food lines, course id for course lines
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    /// Set when this line enrolls the purchaser into a course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
}

/// Order entity
///
/// Invariants: `amount == max(0, subtotal + delivery_fee - discount)`,
/// `discount <= subtotal`, and `payment` flips to true exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<Thing>,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub delivery_fee: f64,
    #[serde(default)]
    pub discount: f64,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_id: Option<String>,
    pub status: OrderStatus,
    /// Settled flag; set exactly once on confirmed payment
    #[serde(default)]
    pub payment: bool,
    pub order_type: OrderType,
    #[serde(default)]
    pub created_at: i64,
}

impl Order {
    /// Record id as a `"order:id"` string
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|t| t.to_string()).unwrap_or_default()
    }
}
