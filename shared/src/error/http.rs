//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::PromoNotFound
            | Self::OrderNotFound
            | Self::ItemNotFound
            | Self::CourseNotFound
            | Self::EnrollmentNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::PromoCodeExists
            | Self::OrderAlreadyPaid
            | Self::AlreadyEnrolled
            | Self::CertificateAlreadyIssued => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied | Self::AdminRequired => StatusCode::FORBIDDEN,

            // 422 Unprocessable Entity - policy rejections and payment outcomes
            Self::PromoExpired
            | Self::PromoUsageLimitReached
            | Self::PromoUserLimitReached
            | Self::PromoBelowMinimum
            | Self::ItemOutOfStock
            | Self::RequirementsNotMet
            | Self::PaymentDeclined => StatusCode::UNPROCESSABLE_ENTITY,

            // 400 Bad Request
            Self::Unknown
            | Self::ValidationFailed
            | Self::InvalidRequest
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::InvalidDiscount
            | Self::OrderEmpty
            | Self::InvalidAmount => StatusCode::BAD_REQUEST,

            // 502 Bad Gateway - upstream collaborator failures
            Self::PaymentFailed | Self::PaymentSessionFailed | Self::UpstreamError => {
                StatusCode::BAD_GATEWAY
            }

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
