use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use engine::dto::grid::{OfficialResultRequest, OfficialResultResponse, SetGridSlotRequest};
use engine::models::{GridPosition, Race, RaceId};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GridQuery {
    /// Authenticated user id or anonymous fingerprint
    pub owner: String,
}

#[utoipa::path(
    get,
    path = "/api/races",
    responses(
        (status = 200, description = "All races in calendar order", body = Vec<Race>)
    ),
    tag = "races"
)]
pub async fn list_races(State(state): State<AppState>) -> Result<Response, WebError> {
    Ok(Json(services::list_races(&state)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/races/{race_id}/result",
    params(
        ("race_id" = String, Path, description = "Race slug")
    ),
    request_body = OfficialResultRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Result stored and predictions scored", body = OfficialResultResponse),
        (status = 400, description = "Invalid result rows"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Race not found")
    ),
    tag = "races"
)]
pub async fn submit_official_result(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
    Json(req): Json<OfficialResultRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let race_id = RaceId::new(race_id);
    let response = services::submit_official_result(&state, &race_id, req)?;

    Ok(Json(response).into_response())
}

#[utoipa::path(
    put,
    path = "/api/races/{race_id}/grid",
    params(
        ("race_id" = String, Path, description = "Race slug")
    ),
    request_body = SetGridSlotRequest,
    responses(
        (status = 200, description = "Draft slot stored", body = GridPosition),
        (status = 400, description = "Invalid position or ineligible driver"),
        (status = 404, description = "Race not found"),
        (status = 409, description = "Race already completed")
    ),
    tag = "races"
)]
pub async fn set_grid_slot(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
    Json(req): Json<SetGridSlotRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let race_id = RaceId::new(race_id);
    let row = services::set_grid_slot(
        &state,
        &race_id,
        &req.owner.as_str().into(),
        req.position,
        req.driver_id,
        req.has_fastest_lap,
    )?;

    Ok(Json(row).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/races/{race_id}/grid/{position}",
    params(
        ("race_id" = String, Path, description = "Race slug"),
        ("position" = u8, Path, description = "Grid position to clear"),
        GridQuery
    ),
    responses(
        (status = 204, description = "Slot cleared"),
        (status = 404, description = "Race or slot not found")
    ),
    tag = "races"
)]
pub async fn clear_grid_slot(
    State(state): State<AppState>,
    Path((race_id, position)): Path<(String, u8)>,
    Query(query): Query<GridQuery>,
) -> Result<Response, WebError> {
    let race_id = RaceId::new(race_id);
    services::clear_grid_slot(&state, &race_id, &query.owner.as_str().into(), position)?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/races/{race_id}/grid",
    params(
        ("race_id" = String, Path, description = "Race slug"),
        GridQuery
    ),
    responses(
        (status = 200, description = "Grid rows visible to the owner", body = Vec<GridPosition>),
        (status = 404, description = "Race not found")
    ),
    tag = "races"
)]
pub async fn get_grid(
    State(state): State<AppState>,
    Path(race_id): Path<String>,
    Query(query): Query<GridQuery>,
) -> Result<Response, WebError> {
    let race_id = RaceId::new(race_id);
    let rows = services::grid_rows(&state, &race_id, &query.owner.as_str().into())?;

    Ok(Json(rows).into_response())
}
