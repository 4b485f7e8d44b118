use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use engine::dto::leaderboard::{LeaderboardQuery, LeaderboardResponse};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Season leaderboard page", body = LeaderboardResponse),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;
    state.verify_season(query.season)?;

    let response = services::leaderboard(&state, query.page, query.page_size);

    Ok(Json(response).into_response())
}
