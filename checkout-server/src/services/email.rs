//! Notifications
//!
//! Fire-and-forget notifications sent after settlement. Failures are the
//! sender's problem to log; settlement never waits on delivery.

use crate::db::models::Order;
use async_trait::async_trait;

/// Seam for outbound notifications
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn order_confirmed(&self, order: &Order);

    async fn enrollment_created(&self, student_id: &str, course_id: &str);
}

/// Logs notifications instead of delivering them.
///
/// Stands in until a real mail/push integration is wired up; keeps the
/// settlement path identical in every environment.
pub struct LogNotifier;

#[async_trait]
impl NotificationSender for LogNotifier {
    async fn order_confirmed(&self, order: &Order) {
        tracing::info!(
            order_id = %order.id_string(),
            user_id = %order.user_id,
            amount = order.amount,
            "Notification: order confirmed"
        );
    }

    async fn enrollment_created(&self, student_id: &str, course_id: &str) {
        tracing::info!(student_id, course_id, "Notification: enrollment created");
    }
}
