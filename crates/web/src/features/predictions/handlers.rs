use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use engine::dto::prediction::{
    LockPredictionRequest, LockResponse, LockedPredictionResponse, UnlockPredictionRequest,
    UnlockResponse,
};
use engine::models::{RaceId, Season};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[derive(Debug, Deserialize, IntoParams)]
pub struct OwnerQuery {
    /// Authenticated user id or anonymous fingerprint
    pub owner: String,
    /// Season year; must match the hosted season when supplied
    pub season: Option<Season>,
}

#[utoipa::path(
    post,
    path = "/api/predictions/{race_id}/lock",
    params(
        ("race_id" = String, Path, description = "Race slug")
    ),
    request_body = LockPredictionRequest,
    responses(
        (status = 200, description = "Prediction locked", body = LockResponse),
        (status = 400, description = "Empty prediction or invalid positions"),
        (status = 404, description = "Race not found"),
        (status = 409, description = "Lock window closed or already locked")
    ),
    tag = "predictions"
)]
pub async fn lock_prediction(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
    Json(req): Json<LockPredictionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    state.verify_season(req.season)?;

    let race_id = RaceId::new(race_id);
    let ack = services::lock(
        &state,
        &race_id,
        req.owner.as_str().into(),
        req.positions,
        Utc::now(),
    )?;

    Ok(Json(LockResponse {
        success: true,
        race_id: ack.race_id,
        locked_at: ack.locked_at,
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/predictions/{race_id}/unlock",
    params(
        ("race_id" = String, Path, description = "Race slug")
    ),
    request_body = UnlockPredictionRequest,
    responses(
        (status = 200, description = "Prediction unlocked", body = UnlockResponse),
        (status = 404, description = "Race or lock not found"),
        (status = 409, description = "Lock window closed")
    ),
    tag = "predictions"
)]
pub async fn unlock_prediction(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
    Json(req): Json<UnlockPredictionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;
    state.verify_season(req.season)?;

    let race_id = RaceId::new(race_id);
    services::unlock(&state, &race_id, req.owner.as_str().into(), Utc::now())?;

    Ok(Json(UnlockResponse { success: true }).into_response())
}

#[utoipa::path(
    get,
    path = "/api/predictions",
    params(OwnerQuery),
    responses(
        (status = 200, description = "Locked predictions for the owner", body = Vec<LockedPredictionResponse>)
    ),
    tag = "predictions"
)]
pub async fn list_locked_predictions(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Response, WebError> {
    state.verify_season(query.season)?;

    let predictions = services::locked_predictions(&state, &query.owner.as_str().into());

    Ok(Json(predictions).into_response())
}
