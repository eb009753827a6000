//! API Routes
//!
//! # Structure
//!
//! - [`promos`] - Promo code management and validation
//! - [`checkout`] - Order creation and payment session opening
//! - [`payments`] - Payment gateway callback
//! - [`enrollments`] - Course progress and certificates

pub mod checkout;
pub mod enrollments;
pub mod payments;
pub mod promos;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::AppResult;
use shared::Principal;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(promos::router())
        .merge(checkout::router())
        .merge(payments::router())
        .merge(enrollments::router())
}

/// Build a fully configured application with all middleware
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}

/// Resolve a caller's principal from their user record.
///
/// Unknown users are treated as customers; administrator status must be
/// positively established.
pub(crate) async fn resolve_principal(
    state: &ServerState,
    user_id: &str,
) -> AppResult<Principal> {
    let repo = UserRepository::new(state.db.clone());
    let principal = match repo.find_by_id(user_id).await? {
        Some(user) if user.is_admin() => Principal::Administrator,
        _ => Principal::Customer(user_id.to_string()),
    };
    Ok(principal)
}
