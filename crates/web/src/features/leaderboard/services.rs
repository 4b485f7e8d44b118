use engine::dto::leaderboard::LeaderboardResponse;
use engine::services::leaderboard::build;

use crate::state::AppState;

/// Roll up every owner's scored predictions into the ranked, paginated
/// leaderboard. Recomputed per request from the prediction store.
pub fn leaderboard(state: &AppState, page: u32, page_size: u32) -> LeaderboardResponse {
    let predictions = state.predictions.by_owner(state.season.season());
    build(&predictions, page, page_size).into()
}
