//! Food Item Repository

use super::{BaseRepository, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::FoodItem;
use crate::settlement::CatalogStore;
use crate::utils::AppResult;
use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "food_item";

#[derive(Clone)]
pub struct FoodItemRepository {
    base: BaseRepository,
}

impl FoodItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a food item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<FoodItem>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let item: Option<FoodItem> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(item)
    }

    /// Atomically decrement remaining stock, floored at zero.
    ///
    /// Items without an inventory count (NONE) are left untouched.
    pub async fn decrement_quantity_atomic(&self, id: &str, quantity: i64) -> RepoResult<()> {
        let thing = make_thing(TABLE, id);
        self.base
            .db()
            .query(
                "UPDATE $thing SET available_quantity = math::max(available_quantity - $qty, 0) \
                 WHERE available_quantity != NONE",
            )
            .bind(("thing", thing))
            .bind(("qty", quantity))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for FoodItemRepository {
    async fn decrement_quantity(&self, item_id: &str, quantity: i64) -> AppResult<()> {
        Ok(self.decrement_quantity_atomic(item_id, quantity).await?)
    }
}
