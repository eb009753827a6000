//! Checkout Server - promotion and order settlement backend
//!
//! Backend for a combined food-ordering / course-enrollment storefront.
//! The core of the crate is the promo evaluation policy and the order
//! settlement state machine; everything else is the plumbing around them.
//!
//! # Module structure
//!
//! ```text
//! checkout-server/src/
//! ├── core/        # Configuration, shared state, background tasks
//! ├── db/          # Embedded SurrealDB layer (models + repositories)
//! ├── promo/       # Promo code eligibility and discount policy
//! ├── orders/      # Order aggregate: totals, creation, cancellation
//! ├── settlement/  # Settlement coordinator and collaborator seams
//! ├── enrollment/  # Course progress and certificate issuance
//! ├── services/    # Payment sessions, notifications
//! ├── api/         # HTTP routes and handlers
//! └── utils/       # Logging and helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod enrollment;
pub mod orders;
pub mod promo;
pub mod services;
pub mod settlement;
pub mod utils;

// Re-export common types
pub use core::{Config, ServerState};
pub use db::DbService;
pub use orders::OrderService;
pub use promo::{PromoApproval, PromoRejection};
pub use settlement::{SettlementCoordinator, SettlementOutcome, SettlementReport};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
