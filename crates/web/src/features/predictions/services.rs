use chrono::{DateTime, Utc};
use engine::dto::prediction::LockedPredictionResponse;
use engine::error::Result;
use engine::models::{Owner, PredictedPosition, PredictionKey, RaceId};
use engine::repository::predictions::LockAck;

use crate::state::AppState;

/// Lock an immutable snapshot of the owner's prediction for one race. The
/// race is read inside the store's write guard, so a result posted while the
/// request was in flight still closes the window.
pub fn lock(
    state: &AppState,
    race_id: &RaceId,
    owner: Owner,
    positions: Vec<PredictedPosition>,
    now: DateTime<Utc>,
) -> Result<LockAck> {
    let key = PredictionKey {
        owner,
        season: state.season.season(),
        race_id: race_id.clone(),
    };
    state
        .predictions
        .lock(key, positions, || state.season.race(race_id), now)
}

/// Delete the owner's lock for one race, before race start only
pub fn unlock(state: &AppState, race_id: &RaceId, owner: Owner, now: DateTime<Utc>) -> Result<()> {
    let key = PredictionKey {
        owner,
        season: state.season.season(),
        race_id: race_id.clone(),
    };
    state
        .predictions
        .unlock(&key, || state.season.race(race_id), now)
}

/// Every prediction the owner holds this season, with grades where scored
pub fn locked_predictions(state: &AppState, owner: &Owner) -> Vec<LockedPredictionResponse> {
    state
        .predictions
        .for_owner(owner, state.season.season())
        .into_iter()
        .map(|(race_id, prediction)| LockedPredictionResponse::from_prediction(race_id, prediction))
        .collect()
}
