//! Utilities - logging and error re-exports

pub mod logger;

// Unified error types live in `shared`; re-export for handler ergonomics
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
