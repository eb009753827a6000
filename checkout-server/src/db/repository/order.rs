//! Order Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::Order;
use crate::settlement::OrderStore;
use crate::utils::AppResult;
use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Persist a new food order and clear the user's cart in one transaction
    pub async fn create_and_clear_cart(&self, order: Order) -> RepoResult<Order> {
        let user_owned = order.user_id.clone();
        let mut result = self
            .base
            .db()
            .query(
                r#"
                BEGIN TRANSACTION;
                CREATE order CONTENT $data;
                DELETE cart_item WHERE user_id = $user;
                COMMIT TRANSACTION;
                "#,
            )
            .bind(("data", order))
            .bind(("user", user_owned))
            .await?;
        let created: Vec<Order> = result.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find an order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let order: Option<Order> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(order)
    }

    /// Atomically flip an unpaid order to PAID (compare-and-set on `payment`).
    ///
    /// Returns None when the order was already paid or does not exist:
    /// UPDATE never creates records, and the WHERE clause filters paid ones.
    pub async fn mark_paid_if_pending(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = make_thing(TABLE, id);
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET payment = true, status = 'PAID' \
                 WHERE payment = false RETURN AFTER",
            )
            .bind(("thing", thing))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Mark a paid order as settled
    pub async fn mark_settled(&self, id: &str) -> RepoResult<()> {
        let thing = make_thing(TABLE, id);
        self.base
            .db()
            .query("UPDATE $thing SET status = 'SETTLED' WHERE payment = true")
            .bind(("thing", thing))
            .await?;
        Ok(())
    }

    /// Delete an order only while it is still unpaid.
    ///
    /// The guard lives in the statement itself, so a payment landing
    /// concurrently can never be deleted between a read and the delete.
    /// Returns the deleted order, or None when it was already paid or
    /// does not exist.
    pub async fn delete_if_unpaid(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = make_thing(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("DELETE $thing WHERE payment = false RETURN BEFORE")
            .bind(("thing", thing))
            .await?;
        let deleted: Vec<Order> = result.take(0)?;
        Ok(deleted.into_iter().next())
    }

    /// Delete unpaid orders created before the cutoff; returns how many
    pub async fn delete_stale_pending(&self, cutoff: i64) -> RepoResult<usize> {
        let mut result = self
            .base
            .db()
            .query(
                "DELETE order WHERE status = 'PENDING_PAYMENT' \
                 AND payment = false AND created_at < $cutoff RETURN BEFORE",
            )
            .bind(("cutoff", cutoff))
            .await?;
        let deleted: Vec<Order> = result.take(0)?;
        Ok(deleted.len())
    }
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Order>> {
        Ok(OrderRepository::find_by_id(self, id).await?)
    }

    async fn mark_paid_if_pending(&self, id: &str) -> AppResult<Option<Order>> {
        Ok(OrderRepository::mark_paid_if_pending(self, id).await?)
    }

    async fn mark_settled(&self, id: &str) -> AppResult<()> {
        Ok(OrderRepository::mark_settled(self, id).await?)
    }

    async fn delete_if_unpaid(&self, id: &str) -> AppResult<Option<Order>> {
        Ok(OrderRepository::delete_if_unpaid(self, id).await?)
    }
}
