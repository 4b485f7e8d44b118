use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use engine::dto::standings::StandingsQuery;
use engine::models::{PointsSystemId, Standings};

use crate::error::WebError;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    get,
    path = "/api/standings",
    params(StandingsQuery),
    responses(
        (status = 200, description = "Driver and team standings with histories", body = Standings),
        (status = 404, description = "Unknown points system")
    ),
    tag = "standings"
)]
pub async fn get_standings(
    State(state): State<AppState>,
    Query(query): Query<StandingsQuery>,
) -> Result<Response, WebError> {
    let owner = query.owner.map(|owner| owner.as_str().into());
    let system_id = query.points_system.map(PointsSystemId::new);

    let standings = services::standings(&state, owner, system_id)?;

    Ok(Json(standings).into_response())
}
