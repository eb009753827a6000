//! Promo Model

use super::serde_thing;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use surrealdb::sql::Thing;
use validator::Validate;

/// Sentinel for an unlimited global usage cap
pub const UNLIMITED_USAGE: i64 = -1;

/// Discount type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Per-user usage record inside a promo document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromoUsage {
    pub usage_count: i64,
    /// Last use timestamp (milliseconds since epoch)
    pub used_at: i64,
}

/// Promo code entity
///
/// Promos are never hard-deleted while historical orders reference them;
/// administrators disable them via `is_active` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promo {
    #[serde(default, with = "serde_thing::option")]
    pub id: Option<Thing>,
    /// Unique code, stored lowercased (matching is case-insensitive)
    pub code: String,
    pub discount_type: DiscountType,
    /// Percentage (10 = 10%) or fixed amount depending on `discount_type`
    pub discount_value: f64,
    /// Cap on the computed discount (percentage promos only)
    pub max_discount: Option<f64>,
    #[serde(default)]
    pub minimum_order_amount: f64,
    /// Global usage cap; -1 means unlimited
    #[serde(default = "default_unlimited")]
    pub max_usage: i64,
    #[serde(default)]
    pub current_usage: i64,
    #[serde(default = "default_one")]
    pub max_usage_per_user: i64,
    /// Per-user usage ledger: user id -> usage record
    #[serde(default)]
    pub used_by: HashMap<String, PromoUsage>,
    /// Valid from timestamp (milliseconds since epoch)
    pub start_date: i64,
    /// Expiry timestamp (milliseconds since epoch); None = no expiry
    pub end_date: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

impl Promo {
    /// Recorded usage count for a given user
    pub fn usage_count_for(&self, user_id: &str) -> i64 {
        self.used_by.get(user_id).map(|u| u.usage_count).unwrap_or(0)
    }

    /// Whether the global usage cap has been exhausted
    pub fn usage_exhausted(&self) -> bool {
        self.max_usage > 0 && self.current_usage >= self.max_usage
    }
}

/// Create promo payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PromoCreate {
    #[validate(length(min = 2, max = 32))]
    pub code: String,
    pub discount_type: DiscountType,
    #[validate(range(min = 0.0))]
    pub discount_value: f64,
    #[validate(range(min = 0.0))]
    pub max_discount: Option<f64>,
    #[validate(range(min = 0.0))]
    pub minimum_order_amount: Option<f64>,
    /// Global usage cap; omit or -1 for unlimited
    pub max_usage: Option<i64>,
    #[validate(range(min = 1))]
    pub max_usage_per_user: Option<i64>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

/// Update promo payload (admin edits; usage fields are not editable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_order_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_usage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_usage_per_user: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}

fn default_one() -> i64 {
    1
}

fn default_unlimited() -> i64 {
    UNLIMITED_USAGE
}
