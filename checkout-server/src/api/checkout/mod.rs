//! Checkout API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/checkout", post(handler::checkout))
        .route("/api/orders/{id}", get(handler::get_order).delete(handler::cancel_order))
}
