//! Promo eligibility rules and discount computation
//!
//! `evaluate` is a pure function over a promo document, the caller's
//! identity, the cart total, and the current time. Rules are checked in
//! a fixed order and the first failing rule wins.

use crate::db::models::{DiscountType, Promo};
use crate::orders::totals::{to_decimal, to_f64};
use crate::utils::{AppError, ErrorCode};
use rust_decimal::Decimal;
use shared::Principal;
use thiserror::Error;

/// A promo that passed every rule, with its computed discount
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PromoApproval {
    /// Record id of the approved promo (`"promo:..."`)
    pub promo_id: String,
    pub code: String,
    /// Discount amount, rounded to 2 decimal places
    pub discount: f64,
}

/// Why a promo cannot be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromoRejection {
    /// Unknown code, or the promo has been disabled
    #[error("Promo code not found")]
    NotFound,

    #[error("Promo code has expired")]
    Expired,

    #[error("Promo code usage limit reached")]
    UsageLimitReached,

    #[error("You have already used this promo code the maximum number of times")]
    UserLimitReached,

    #[error("Order total is below the minimum for this promo code")]
    BelowMinimum,
}

impl PromoRejection {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotFound => ErrorCode::PromoNotFound,
            Self::Expired => ErrorCode::PromoExpired,
            Self::UsageLimitReached => ErrorCode::PromoUsageLimitReached,
            Self::UserLimitReached => ErrorCode::PromoUserLimitReached,
            Self::BelowMinimum => ErrorCode::PromoBelowMinimum,
        }
    }
}

impl From<PromoRejection> for AppError {
    fn from(rejection: PromoRejection) -> Self {
        AppError::with_message(rejection.error_code(), rejection.to_string())
    }
}

/// Check every eligibility rule and compute the discount.
///
/// Rule order matters: disabled, expired, globally exhausted, per-user
/// cap (administrators are exempt), then minimum order amount.
pub fn evaluate(
    promo: &Promo,
    principal: &Principal,
    cart_total: f64,
    now: i64,
) -> Result<PromoApproval, PromoRejection> {
    if !promo.is_active {
        return Err(PromoRejection::NotFound);
    }

    if let Some(end_date) = promo.end_date
        && now > end_date
    {
        return Err(PromoRejection::Expired);
    }

    if promo.usage_exhausted() {
        return Err(PromoRejection::UsageLimitReached);
    }

    if let Principal::Customer(user_id) = principal
        && promo.usage_count_for(user_id) >= promo.max_usage_per_user
    {
        return Err(PromoRejection::UserLimitReached);
    }

    if cart_total < promo.minimum_order_amount {
        return Err(PromoRejection::BelowMinimum);
    }

    Ok(PromoApproval {
        promo_id: promo
            .id
            .as_ref()
            .map(|t| t.to_string())
            .unwrap_or_default(),
        code: promo.code.clone(),
        discount: compute_discount(promo, cart_total),
    })
}

/// Discount amount for an eligible promo, clamped to the cart total
fn compute_discount(promo: &Promo, cart_total: f64) -> f64 {
    let total = to_decimal(cart_total);
    let raw = match promo.discount_type {
        DiscountType::Fixed => to_decimal(promo.discount_value),
        DiscountType::Percentage => {
            let pct = total * to_decimal(promo.discount_value) / Decimal::ONE_HUNDRED;
            match promo.max_discount {
                Some(cap) => pct.min(to_decimal(cap)),
                None => pct,
            }
        }
    };
    to_f64(raw.min(total).max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{PromoUsage, UNLIMITED_USAGE};
    use std::collections::HashMap;
    use surrealdb::sql::Thing;

    const NOW: i64 = 1_700_000_000_000;

    fn promo(discount_type: DiscountType, value: f64) -> Promo {
        Promo {
            id: Some(Thing::from(("promo", "save10"))),
            code: "save10".to_string(),
            discount_type,
            discount_value: value,
            max_discount: None,
            minimum_order_amount: 0.0,
            max_usage: UNLIMITED_USAGE,
            current_usage: 0,
            max_usage_per_user: 1,
            used_by: HashMap::new(),
            start_date: NOW - 1_000,
            end_date: None,
            is_active: true,
            created_at: NOW - 1_000,
        }
    }

    fn customer() -> Principal {
        Principal::Customer("user:alice".to_string())
    }

    #[test]
    fn percentage_discount_capped_by_max_discount() {
        let mut p = promo(DiscountType::Percentage, 10.0);
        p.max_discount = Some(5.0);
        let approval = evaluate(&p, &customer(), 1000.0, NOW).unwrap();
        assert_eq!(approval.discount, 5.0);
    }

    #[test]
    fn percentage_discount_uncapped() {
        let p = promo(DiscountType::Percentage, 10.0);
        let approval = evaluate(&p, &customer(), 250.0, NOW).unwrap();
        assert_eq!(approval.discount, 25.0);
    }

    #[test]
    fn fixed_discount_clamped_to_cart_total() {
        let p = promo(DiscountType::Fixed, 20.0);
        let approval = evaluate(&p, &customer(), 10.0, NOW).unwrap();
        assert_eq!(approval.discount, 10.0);
    }

    #[test]
    fn inactive_promo_reads_as_not_found() {
        let mut p = promo(DiscountType::Fixed, 5.0);
        p.is_active = false;
        assert_eq!(
            evaluate(&p, &customer(), 100.0, NOW),
            Err(PromoRejection::NotFound)
        );
    }

    #[test]
    fn expired_promo_rejected() {
        let mut p = promo(DiscountType::Fixed, 5.0);
        p.end_date = Some(NOW - 1);
        assert_eq!(
            evaluate(&p, &customer(), 100.0, NOW),
            Err(PromoRejection::Expired)
        );
    }

    #[test]
    fn end_date_is_inclusive() {
        let mut p = promo(DiscountType::Fixed, 5.0);
        p.end_date = Some(NOW);
        assert!(evaluate(&p, &customer(), 100.0, NOW).is_ok());
    }

    #[test]
    fn global_usage_cap_enforced() {
        let mut p = promo(DiscountType::Fixed, 5.0);
        p.max_usage = 3;
        p.current_usage = 3;
        assert_eq!(
            evaluate(&p, &customer(), 100.0, NOW),
            Err(PromoRejection::UsageLimitReached)
        );
    }

    #[test]
    fn unlimited_usage_never_exhausts() {
        let mut p = promo(DiscountType::Fixed, 5.0);
        p.current_usage = 1_000_000;
        assert!(evaluate(&p, &customer(), 100.0, NOW).is_ok());
    }

    #[test]
    fn per_user_cap_enforced_for_customers() {
        let mut p = promo(DiscountType::Fixed, 5.0);
        p.used_by.insert(
            "user:alice".to_string(),
            PromoUsage {
                usage_count: 1,
                used_at: NOW - 500,
            },
        );
        assert_eq!(
            evaluate(&p, &customer(), 100.0, NOW),
            Err(PromoRejection::UserLimitReached)
        );
        // A different customer is unaffected
        let bob = Principal::Customer("user:bob".to_string());
        assert!(evaluate(&p, &bob, 100.0, NOW).is_ok());
    }

    #[test]
    fn administrators_exempt_from_per_user_cap() {
        let mut p = promo(DiscountType::Fixed, 5.0);
        p.used_by.insert(
            "user:alice".to_string(),
            PromoUsage {
                usage_count: 99,
                used_at: NOW - 500,
            },
        );
        assert!(evaluate(&p, &Principal::Administrator, 100.0, NOW).is_ok());
    }

    #[test]
    fn minimum_order_amount_enforced() {
        let mut p = promo(DiscountType::Fixed, 5.0);
        p.minimum_order_amount = 50.0;
        assert_eq!(
            evaluate(&p, &customer(), 49.99, NOW),
            Err(PromoRejection::BelowMinimum)
        );
        assert!(evaluate(&p, &customer(), 50.0, NOW).is_ok());
    }

    #[test]
    fn rule_order_expiry_before_minimum() {
        // An expired promo on a too-small cart reports Expired, not BelowMinimum
        let mut p = promo(DiscountType::Fixed, 5.0);
        p.end_date = Some(NOW - 1);
        p.minimum_order_amount = 50.0;
        assert_eq!(
            evaluate(&p, &customer(), 10.0, NOW),
            Err(PromoRejection::Expired)
        );
    }

    #[test]
    fn discount_never_negative() {
        let p = promo(DiscountType::Fixed, -5.0);
        let approval = evaluate(&p, &customer(), 100.0, NOW).unwrap();
        assert_eq!(approval.discount, 0.0);
    }

    #[test]
    fn rejection_maps_to_stable_error_codes() {
        assert_eq!(
            PromoRejection::NotFound.error_code(),
            ErrorCode::PromoNotFound
        );
        assert_eq!(
            PromoRejection::BelowMinimum.error_code(),
            ErrorCode::PromoBelowMinimum
        );
    }
}
