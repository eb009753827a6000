//! Promo Repository

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Promo, PromoCreate, PromoUpdate, UNLIMITED_USAGE};
use crate::settlement::PromoUsageLedger;
use crate::utils::AppResult;
use async_trait::async_trait;
use shared::util::now_millis;
use std::collections::HashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "promo";

#[derive(Clone)]
pub struct PromoRepository {
    base: BaseRepository,
}

impl PromoRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all promos, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Promo>> {
        let promos: Vec<Promo> = self
            .base
            .db()
            .query("SELECT * FROM promo ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(promos)
    }

    /// Find a promo by code (case-insensitive; codes are stored lowercased)
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Promo>> {
        let code_owned = code.trim().to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM promo WHERE code = $code LIMIT 1")
            .bind(("code", code_owned))
            .await?;
        let promos: Vec<Promo> = result.take(0)?;
        Ok(promos.into_iter().next())
    }

    /// Find a promo by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Promo>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let promo: Option<Promo> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(promo)
    }

    /// Create a new promo
    pub async fn create(&self, data: PromoCreate) -> RepoResult<Promo> {
        let code = data.code.trim().to_lowercase();

        // Check duplicate code
        if self.find_by_code(&code).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Promo code '{code}' already exists"
            )));
        }

        let now = now_millis();
        let promo = Promo {
            id: None,
            code,
            discount_type: data.discount_type,
            discount_value: data.discount_value,
            max_discount: data.max_discount,
            minimum_order_amount: data.minimum_order_amount.unwrap_or(0.0),
            max_usage: data.max_usage.unwrap_or(UNLIMITED_USAGE),
            current_usage: 0,
            max_usage_per_user: data.max_usage_per_user.unwrap_or(1),
            used_by: HashMap::new(),
            start_date: data.start_date.unwrap_or(now),
            end_date: data.end_date,
            is_active: true,
            created_at: now,
        };

        let created: Option<Promo> = self.base.db().create(TABLE).content(promo).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create promo".to_string()))
    }

    /// Update a promo (usage counters are not editable through this path)
    pub async fn update(&self, id: &str, data: PromoUpdate) -> RepoResult<Promo> {
        let pure_id = strip_table_prefix(TABLE, id);
        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Promo {id} not found")))?;

        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", data))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Promo {id} not found")))
    }

    /// Atomically record one use of a promo by a user.
    ///
    /// Bumps the global counter and the per-user record in one statement
    /// so concurrent settlements never lose an increment.
    pub async fn record_usage_atomic(&self, id: &str, user_id: &str) -> RepoResult<()> {
        let thing = make_thing(TABLE, id);
        let user_owned = user_id.to_string();
        self.base
            .db()
            .query(
                r#"
                UPDATE $thing SET
                    current_usage += 1,
                    used_by[$user] = {
                        usage_count: (used_by[$user].usage_count ?? 0) + 1,
                        used_at: $time
                    }
                "#,
            )
            .bind(("thing", thing))
            .bind(("user", user_owned))
            .bind(("time", now_millis()))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PromoUsageLedger for PromoRepository {
    async fn record_usage(&self, promo_id: &str, user_id: &str) -> AppResult<()> {
        self.record_usage_atomic(promo_id, user_id).await?;
        Ok(())
    }
}
