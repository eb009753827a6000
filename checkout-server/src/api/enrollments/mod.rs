//! Enrollment API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/enrollments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_for_student))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/progress", post(handler::record_progress))
        .route("/{id}/certificate", post(handler::issue_certificate))
}
