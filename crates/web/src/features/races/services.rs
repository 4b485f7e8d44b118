use engine::dto::grid::{OfficialResultRequest, OfficialResultResponse};
use engine::error::Result;
use engine::models::{DriverId, GridPosition, Owner, Race, RaceId};
use engine::services::scoring;

use crate::state::AppState;

/// All races in calendar order
pub fn list_races(state: &AppState) -> Vec<Race> {
    let mut races = state.season.races();
    races.sort_by_key(|race| race.order);
    races
}

/// Store a race's official rows, flip it to completed, and grade every
/// locked prediction for it in one batch
pub fn submit_official_result(
    state: &AppState,
    race_id: &RaceId,
    request: OfficialResultRequest,
) -> Result<OfficialResultResponse> {
    let rows = request.into_rows(race_id);
    let stored = state.season.set_official_result(race_id, rows)?;

    let scored = scoring::score_race(
        &state.predictions,
        state.season.season(),
        race_id,
        &stored,
    );
    tracing::info!(%race_id, rows = stored.len(), scored, "official result stored");

    Ok(OfficialResultResponse {
        race_id: race_id.clone(),
        rows_stored: stored.len() as u32,
        predictions_scored: scored,
    })
}

/// Upsert one draft grid slot for the owner
pub fn set_grid_slot(
    state: &AppState,
    race_id: &RaceId,
    owner: &Owner,
    position: u8,
    driver_id: Option<DriverId>,
    has_fastest_lap: bool,
) -> Result<GridPosition> {
    let race = state.season.race(race_id)?;
    let snapshot = state.season.snapshot();
    state.drafts.set_slot(
        owner,
        &race,
        &snapshot.identity_swaps,
        position,
        driver_id,
        has_fastest_lap,
    )
}

pub fn clear_grid_slot(
    state: &AppState,
    race_id: &RaceId,
    owner: &Owner,
    position: u8,
) -> Result<()> {
    state.season.race(race_id)?;
    state.drafts.clear_slot(owner, race_id, position)
}

/// The rows the owner currently sees for a race: the official result once
/// the race completed, their draft otherwise
pub fn grid_rows(state: &AppState, race_id: &RaceId, owner: &Owner) -> Result<Vec<GridPosition>> {
    let race = state.season.race(race_id)?;
    if race.completed {
        Ok(state.season.official_rows(race_id))
    } else {
        Ok(state.drafts.rows(owner, race_id))
    }
}
