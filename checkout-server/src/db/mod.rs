//! Database Module
//!
//! Owns the embedded SurrealDB instance and schema definitions

pub mod models;
pub mod repository;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "checkout";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at the given path
    pub async fn new(data_dir: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(data_dir)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %data_dir.display(), "Database connection established");

        let service = Self { db };
        service.define_schema().await?;
        Ok(service)
    }

    /// Apply idempotent schema definitions
    async fn define_schema(&self) -> Result<(), AppError> {
        self.db
            .query(
                r#"
                DEFINE TABLE IF NOT EXISTS promo SCHEMALESS;
                DEFINE INDEX IF NOT EXISTS promo_code_idx ON TABLE promo COLUMNS code UNIQUE;

                DEFINE TABLE IF NOT EXISTS order SCHEMALESS;
                DEFINE INDEX IF NOT EXISTS order_user_idx ON TABLE order COLUMNS user_id;

                DEFINE TABLE IF NOT EXISTS food_item SCHEMALESS;
                DEFINE TABLE IF NOT EXISTS course SCHEMALESS;

                DEFINE TABLE IF NOT EXISTS enrollment SCHEMALESS;
                DEFINE INDEX IF NOT EXISTS enrollment_student_course_idx
                    ON TABLE enrollment COLUMNS student_id, course_id UNIQUE;

                DEFINE TABLE IF NOT EXISTS cart_item SCHEMALESS;
                DEFINE INDEX IF NOT EXISTS cart_user_idx ON TABLE cart_item COLUMNS user_id;

                DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
                "#,
            )
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

        tracing::info!("Database schema definitions applied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_schema_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let service = DbService::new(dir.path()).await.unwrap();
        // Definitions must be safe to re-apply on every startup
        service.define_schema().await.unwrap();
    }
}
