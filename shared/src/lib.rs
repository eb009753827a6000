//! Shared types for the checkout platform
//!
//! Common types used across crates: unified error codes, the application
//! error type, the API response envelope, the request principal, and time
//! utilities.

pub mod error;
pub mod principal;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use principal::Principal;
pub use serde::{Deserialize, Serialize};
