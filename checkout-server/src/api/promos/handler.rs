//! Promo API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::util::now_millis;
use validator::Validate;

use crate::api::resolve_principal;
use crate::core::ServerState;
use crate::db::models::{Promo, PromoCreate, PromoUpdate};
use crate::db::repository::PromoRepository;
use crate::promo::{self, PromoApproval, PromoRejection};
use crate::utils::{AppError, AppResult};

/// GET /api/promos - list all promos
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Promo>>> {
    let repo = PromoRepository::new(state.db.clone());
    let promos = repo.find_all().await?;
    Ok(Json(promos))
}

/// POST /api/promos - create a promo (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PromoCreate>,
) -> AppResult<Json<Promo>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = PromoRepository::new(state.db.clone());
    let promo = repo.create(payload).await?;
    tracing::info!(code = %promo.code, "Promo created");
    Ok(Json(promo))
}

/// PUT /api/promos/:id - edit a promo (admin)
///
/// Usage counters are not editable; disabling a promo is done here via
/// `is_active` instead of deleting it.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PromoUpdate>,
) -> AppResult<Json<Promo>> {
    let repo = PromoRepository::new(state.db.clone());
    let promo = repo.update(&id, payload).await?;
    tracing::info!(code = %promo.code, "Promo updated");
    Ok(Json(promo))
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub code: String,
    pub user_id: String,
    pub cart_total: f64,
}

/// POST /api/promos/validate - check a code against a cart
///
/// Pure dry run: usage is only recorded when an order settles.
pub async fn validate(
    State(state): State<ServerState>,
    Json(payload): Json<ValidateRequest>,
) -> AppResult<Json<PromoApproval>> {
    let repo = PromoRepository::new(state.db.clone());
    let promo = repo
        .find_by_code(&payload.code)
        .await?
        .ok_or(PromoRejection::NotFound)?;

    let principal = resolve_principal(&state, &payload.user_id).await?;
    let approval = promo::evaluate(&promo, &principal, payload.cart_total, now_millis())?;
    Ok(Json(approval))
}
