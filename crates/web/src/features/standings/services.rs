use engine::error::Result;
use engine::models::{Owner, PointsSystemId, Standings};
use engine::services::standings::{GridView, calculate};

use crate::state::AppState;

/// Recompute standings on demand from the current grid and points-system
/// selection. Nothing is persisted; this is a read projection.
pub fn standings(
    state: &AppState,
    owner: Option<Owner>,
    system_id: Option<PointsSystemId>,
) -> Result<Standings> {
    let system = state.season.points_system(system_id.as_ref())?.clone();
    let data = state.season.snapshot();

    let view = GridView {
        official: state.season.official_map(),
        drafts: owner
            .map(|owner| state.drafts.rows_by_race(&owner))
            .unwrap_or_default(),
    };

    Ok(calculate(&data, &view, &system))
}
