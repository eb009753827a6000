//! Settlement Coordinator
//!
//! Drives the order state machine PENDING_PAYMENT -> PAID -> SETTLED from
//! payment gateway callbacks. The PAID transition is a compare-and-set in
//! storage, so duplicate callbacks settle at most once; side effects run
//! after the gate and their failures are collected, never rolled back.

pub mod stores;

#[cfg(test)]
mod tests;

pub use stores::{
    CatalogStore, CourseStore, EnrollmentStore, OrderStore, PromoUsageLedger, UserDirectory,
};

use crate::db::models::{
    Enrollment, EnrollmentStatus, Order, OrderType, PaymentSnapshot, Progress,
};
use crate::services::NotificationSender;
use serde::Serialize;
use shared::util::now_millis;
use std::sync::Arc;

/// What happened to the order as a result of this callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettlementOutcome {
    /// Payment confirmed and side effects applied
    Settled,
    /// The order was already paid; nothing was done
    AlreadySettled,
    /// Payment failed and the unpaid order was deleted
    Cancelled,
    /// No such order
    NotFound,
    /// Storage failed before the payment gate; nothing was changed
    Failed,
}

/// Structured result returned to the callback boundary
#[derive(Debug, Clone, Serialize)]
pub struct SettlementReport {
    pub order_id: String,
    pub outcome: SettlementOutcome,
    /// Side-effect failures, logged and reported but never rolled back
    pub failures: Vec<String>,
}

impl SettlementReport {
    fn new(order_id: &str, outcome: SettlementOutcome) -> Self {
        Self {
            order_id: order_id.to_string(),
            outcome,
            failures: Vec::new(),
        }
    }
}

/// Applies payment results to orders and their downstream effects
pub struct SettlementCoordinator {
    orders: Arc<dyn OrderStore>,
    catalog: Arc<dyn CatalogStore>,
    courses: Arc<dyn CourseStore>,
    enrollments: Arc<dyn EnrollmentStore>,
    promos: Arc<dyn PromoUsageLedger>,
    users: Arc<dyn UserDirectory>,
    notifier: Arc<dyn NotificationSender>,
}

impl SettlementCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        orders: Arc<dyn OrderStore>,
        catalog: Arc<dyn CatalogStore>,
        courses: Arc<dyn CourseStore>,
        enrollments: Arc<dyn EnrollmentStore>,
        promos: Arc<dyn PromoUsageLedger>,
        users: Arc<dyn UserDirectory>,
        notifier: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            orders,
            catalog,
            courses,
            enrollments,
            promos,
            users,
            notifier,
        }
    }

    /// Apply a payment result. Never returns an error: the callback
    /// boundary always gets a structured report.
    pub async fn handle_payment_result(&self, order_id: &str, success: bool) -> SettlementReport {
        if success {
            self.settle(order_id).await
        } else {
            self.cancel_unpaid(order_id).await
        }
    }

    /// Payment failed: delete the order unless it was already paid.
    ///
    /// The delete is guarded in storage, so a success callback racing
    /// this one can never have its paid order removed.
    async fn cancel_unpaid(&self, order_id: &str) -> SettlementReport {
        match self.orders.delete_if_unpaid(order_id).await {
            Ok(Some(_)) => {
                tracing::info!(order_id, "Unpaid order deleted after failed payment");
                SettlementReport::new(order_id, SettlementOutcome::Cancelled)
            }
            Ok(None) => match self.orders.find_by_id(order_id).await {
                Ok(Some(_)) => {
                    // A failure callback for a paid order is stale; ignore it
                    tracing::warn!(order_id, "Ignoring failure callback for paid order");
                    SettlementReport::new(order_id, SettlementOutcome::AlreadySettled)
                }
                Ok(None) => SettlementReport::new(order_id, SettlementOutcome::NotFound),
                Err(e) => {
                    tracing::error!(order_id, error = %e, "Failed to load order for cancellation");
                    SettlementReport::new(order_id, SettlementOutcome::Failed)
                }
            },
            Err(e) => {
                tracing::error!(order_id, error = %e, "Failed to delete unpaid order");
                SettlementReport::new(order_id, SettlementOutcome::Failed)
            }
        }
    }

    /// Payment succeeded: pass the CAS gate, then apply side effects.
    async fn settle(&self, order_id: &str) -> SettlementReport {
        let order = match self.orders.mark_paid_if_pending(order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                // Already paid (duplicate callback) or missing
                return match self.orders.find_by_id(order_id).await {
                    Ok(Some(_)) => {
                        tracing::info!(order_id, "Duplicate payment callback ignored");
                        SettlementReport::new(order_id, SettlementOutcome::AlreadySettled)
                    }
                    Ok(None) => SettlementReport::new(order_id, SettlementOutcome::NotFound),
                    Err(e) => {
                        tracing::error!(order_id, error = %e, "Failed to load order");
                        SettlementReport::new(order_id, SettlementOutcome::Failed)
                    }
                };
            }
            Err(e) => {
                tracing::error!(order_id, error = %e, "Payment transition failed");
                return SettlementReport::new(order_id, SettlementOutcome::Failed);
            }
        };

        let mut report = SettlementReport::new(order_id, SettlementOutcome::Settled);

        match order.order_type {
            OrderType::Course => self.apply_course_effects(&order, &mut report).await,
            OrderType::Food => self.apply_inventory_effects(&order, &mut report).await,
        }
        self.apply_promo_usage(&order, &mut report).await;

        if let Err(e) = self.orders.mark_settled(order_id).await {
            tracing::error!(order_id, error = %e, "Failed to mark order settled");
            report.failures.push(format!("mark_settled: {e}"));
        }

        let notifier = Arc::clone(&self.notifier);
        let notify_order = order.clone();
        tokio::spawn(async move {
            notifier.order_confirmed(&notify_order).await;
        });

        tracing::info!(
            order_id,
            failures = report.failures.len(),
            "Order settled"
        );
        report
    }

    /// Create enrollments for course lines. An existing enrollment means
    /// both the create and the counter bump are skipped.
    async fn apply_course_effects(&self, order: &Order, report: &mut SettlementReport) {
        for item in &order.items {
            let Some(course_id) = item.course_id.as_deref() else {
                continue;
            };

            let existing = match self
                .enrollments
                .find_by_student_course(&order.user_id, course_id)
                .await
            {
                Ok(existing) => existing,
                Err(e) => {
                    tracing::error!(course_id, error = %e, "Enrollment lookup failed");
                    report.failures.push(format!("enrollment lookup {course_id}: {e}"));
                    continue;
                }
            };
            if existing.is_some() {
                tracing::info!(course_id, user_id = %order.user_id, "Already enrolled, skipping");
                continue;
            }

            let enrollment = Enrollment {
                id: None,
                student_id: order.user_id.clone(),
                course_id: course_id.to_string(),
                status: EnrollmentStatus::Active,
                progress: Progress::default(),
                certificate: None,
                payment: Some(PaymentSnapshot {
                    order_id: order.id_string(),
                    amount_paid: order.amount,
                    paid_at: now_millis(),
                }),
                enrolled_at: now_millis(),
            };

            match self.enrollments.create(enrollment).await {
                Ok(_) => {
                    if let Err(e) = self.courses.increment_enrollment(course_id).await {
                        tracing::error!(course_id, error = %e, "Enrollment counter bump failed");
                        report.failures.push(format!("enrolled_students {course_id}: {e}"));
                    }
                    let notifier = Arc::clone(&self.notifier);
                    let student = order.user_id.clone();
                    let course = course_id.to_string();
                    tokio::spawn(async move {
                        notifier.enrollment_created(&student, &course).await;
                    });
                }
                Err(e) => {
                    tracing::error!(course_id, error = %e, "Enrollment creation failed");
                    report.failures.push(format!("enrollment {course_id}: {e}"));
                }
            }
        }
    }

    /// Decrement stock for each food line; the store floors at zero.
    async fn apply_inventory_effects(&self, order: &Order, report: &mut SettlementReport) {
        for item in &order.items {
            if let Err(e) = self
                .catalog
                .decrement_quantity(&item.item_id, item.quantity)
                .await
            {
                tracing::error!(item_id = %item.item_id, error = %e, "Inventory decrement failed");
                report
                    .failures
                    .push(format!("inventory {}: {e}", item.item_id));
            }
        }
    }

    /// Record promo usage unless the purchaser is an administrator.
    async fn apply_promo_usage(&self, order: &Order, report: &mut SettlementReport) {
        let Some(promo_id) = order.promo_id.as_deref() else {
            return;
        };

        match self.users.find_by_id(&order.user_id).await {
            Ok(Some(user)) if user.is_admin() => {
                tracing::info!(promo_id, "Administrator purchase, promo usage not recorded");
                return;
            }
            Ok(_) => {}
            Err(e) => {
                // Unknown role: record anyway, admins are the rare case
                tracing::warn!(error = %e, "User lookup failed during promo accounting");
            }
        }

        if let Err(e) = self.promos.record_usage(promo_id, &order.user_id).await {
            tracing::error!(promo_id, error = %e, "Promo usage recording failed");
            report.failures.push(format!("promo usage {promo_id}: {e}"));
        }
    }
}
