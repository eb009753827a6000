//! Settlement collaborator seams
//!
//! The coordinator talks to storage through these traits so payment
//! side effects can be tested without a database.

use crate::db::models::{Course, Enrollment, Order, User};
use crate::utils::AppResult;
use async_trait::async_trait;

/// Order persistence as the coordinator sees it
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Order>>;

    /// Atomically flip an unpaid order to PAID.
    ///
    /// Returns the updated order, or None when the order was already
    /// paid (or does not exist). This is the settlement idempotency gate.
    async fn mark_paid_if_pending(&self, id: &str) -> AppResult<Option<Order>>;

    async fn mark_settled(&self, id: &str) -> AppResult<()>;

    /// Delete the order only while it is still unpaid, as one guarded
    /// statement. Returns None when it was already paid or missing.
    async fn delete_if_unpaid(&self, id: &str) -> AppResult<Option<Order>>;
}

/// Food catalog inventory
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Decrement remaining stock, floored at zero. Items without an
    /// inventory count are left untouched.
    async fn decrement_quantity(&self, item_id: &str, quantity: i64) -> AppResult<()>;
}

/// Course catalog
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>>;

    async fn increment_enrollment(&self, course_id: &str) -> AppResult<()>;
}

/// Enrollment persistence
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    async fn find_by_student_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<Enrollment>>;

    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment>;
}

/// Promo usage bookkeeping
#[async_trait]
pub trait PromoUsageLedger: Send + Sync {
    /// Atomically bump the global counter and the purchaser's per-user
    /// usage record on the promo document.
    async fn record_usage(&self, promo_id: &str, user_id: &str) -> AppResult<()>;
}

/// User lookup, used to resolve the purchaser's role
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
}
