//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

// Promotions
pub mod promo;

// Orders
pub mod order;

// Catalog
pub mod catalog;
pub mod course;

// Enrollments
pub mod enrollment;

// Users
pub mod user;

// Re-exports
pub use catalog::FoodItemRepository;
pub use course::CourseRepository;
pub use enrollment::EnrollmentRepository;
pub use order::OrderRepository;
pub use promo::PromoRepository;
pub use user::UserRepository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::already_exists(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Strip a `"table:"` prefix from an id if present
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Build a Thing from a table name and a raw id
pub fn make_thing(table: &str, id: &str) -> Thing {
    Thing::from((table.to_string(), strip_table_prefix(table, id).to_string()))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_prefix_handles_both_forms() {
        assert_eq!(strip_table_prefix("promo", "promo:abc"), "abc");
        assert_eq!(strip_table_prefix("promo", "abc"), "abc");
        // Only a full "table:" prefix is stripped
        assert_eq!(strip_table_prefix("promo", "promotion:abc"), "promotion:abc");
    }

    #[test]
    fn make_thing_normalizes_prefixed_ids() {
        assert_eq!(make_thing("order", "order:42").to_string(), "order:42");
        assert_eq!(make_thing("order", "42").to_string(), "order:42");
    }
}
