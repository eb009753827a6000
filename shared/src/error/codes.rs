//! Unified error codes for the checkout platform
//!
//! This module defines all error codes used across the server and clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication / permission errors
//! - 2xxx: Promo errors
//! - 3xxx: Order errors
//! - 4xxx: Payment errors
//! - 5xxx: Catalog errors
//! - 6xxx: Course errors
//! - 7xxx: Enrollment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,
    /// Value out of range
    ValueOutOfRange = 7,

    // ==================== 1xxx: Auth / Permission ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Permission denied
    PermissionDenied = 1002,
    /// Administrator role required
    AdminRequired = 1003,
    /// User not found
    UserNotFound = 1004,

    // ==================== 2xxx: Promo ====================
    /// Promo code not found or not active
    PromoNotFound = 2001,
    /// Promo code has expired
    PromoExpired = 2002,
    /// Promo global usage limit reached
    PromoUsageLimitReached = 2003,
    /// Per-user usage limit reached
    PromoUserLimitReached = 2004,
    /// Cart total below the promo minimum
    PromoBelowMinimum = 2005,
    /// Promo code already exists
    PromoCodeExists = 2006,

    // ==================== 3xxx: Order ====================
    /// Order not found
    OrderNotFound = 3001,
    /// Order has already been paid
    OrderAlreadyPaid = 3002,
    /// Discount exceeds the order subtotal
    InvalidDiscount = 3003,
    /// Order has no items
    OrderEmpty = 3004,
    /// Order amount is invalid
    InvalidAmount = 3005,

    // ==================== 4xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 4001,
    /// Failed to create a payment session
    PaymentSessionFailed = 4002,
    /// Payment was declined or cancelled
    PaymentDeclined = 4003,

    // ==================== 5xxx: Catalog ====================
    /// Food item not found
    ItemNotFound = 5001,
    /// Item is out of stock
    ItemOutOfStock = 5002,

    // ==================== 6xxx: Course ====================
    /// Course not found
    CourseNotFound = 6001,

    // ==================== 7xxx: Enrollment ====================
    /// Enrollment not found
    EnrollmentNotFound = 7001,
    /// Student is already enrolled in the course
    AlreadyEnrolled = 7002,
    /// Certificate has already been issued
    CertificateAlreadyIssued = 7003,
    /// Completion requirements are not met
    RequirementsNotMet = 7004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Upstream collaborator failure (payment provider, storage, mail)
    UpstreamError = 9003,
    /// Configuration error
    ConfigError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth / Permission
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::UserNotFound => "User not found",

            // Promo
            ErrorCode::PromoNotFound => "Promo code not found",
            ErrorCode::PromoExpired => "Promo code has expired",
            ErrorCode::PromoUsageLimitReached => "Promo code usage limit reached",
            ErrorCode::PromoUserLimitReached => "You have already used this promo code",
            ErrorCode::PromoBelowMinimum => "Order total is below the promo minimum",
            ErrorCode::PromoCodeExists => "Promo code already exists",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyPaid => "Order has already been paid",
            ErrorCode::InvalidDiscount => "Discount cannot exceed the order subtotal",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::InvalidAmount => "Order amount is invalid",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::PaymentSessionFailed => "Failed to create payment session",
            ErrorCode::PaymentDeclined => "Payment was declined or cancelled",

            // Catalog
            ErrorCode::ItemNotFound => "Food item not found",
            ErrorCode::ItemOutOfStock => "Item is out of stock",

            // Course
            ErrorCode::CourseNotFound => "Course not found",

            // Enrollment
            ErrorCode::EnrollmentNotFound => "Enrollment not found",
            ErrorCode::AlreadyEnrolled => "Student is already enrolled in this course",
            ErrorCode::CertificateAlreadyIssued => "Certificate has already been issued",
            ErrorCode::RequirementsNotMet => "Course completion requirements are not met",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::UpstreamError => "Upstream service failure",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::RequiredField,
            7 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,
            1002 => Self::PermissionDenied,
            1003 => Self::AdminRequired,
            1004 => Self::UserNotFound,

            2001 => Self::PromoNotFound,
            2002 => Self::PromoExpired,
            2003 => Self::PromoUsageLimitReached,
            2004 => Self::PromoUserLimitReached,
            2005 => Self::PromoBelowMinimum,
            2006 => Self::PromoCodeExists,

            3001 => Self::OrderNotFound,
            3002 => Self::OrderAlreadyPaid,
            3003 => Self::InvalidDiscount,
            3004 => Self::OrderEmpty,
            3005 => Self::InvalidAmount,

            4001 => Self::PaymentFailed,
            4002 => Self::PaymentSessionFailed,
            4003 => Self::PaymentDeclined,

            5001 => Self::ItemNotFound,
            5002 => Self::ItemOutOfStock,

            6001 => Self::CourseNotFound,

            7001 => Self::EnrollmentNotFound,
            7002 => Self::AlreadyEnrolled,
            7003 => Self::CertificateAlreadyIssued,
            7004 => Self::RequirementsNotMet,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::UpstreamError,
            9004 => Self::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::PromoNotFound.code(), 2001);
        assert_eq!(ErrorCode::OrderAlreadyPaid.code(), 3002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_round_trip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::PromoUserLimitReached,
            ErrorCode::InvalidDiscount,
            ErrorCode::CertificateAlreadyIssued,
            ErrorCode::UpstreamError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()).unwrap(), code);
        }
    }

    #[test]
    fn test_invalid_code() {
        assert!(ErrorCode::try_from(1234).is_err());
    }

    #[test]
    fn test_serialize_as_u16() {
        let json = serde_json::to_string(&ErrorCode::PromoExpired).unwrap();
        assert_eq!(json, "2002");
        let code: ErrorCode = serde_json::from_str("2002").unwrap();
        assert_eq!(code, ErrorCode::PromoExpired);
    }
}
