use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::Owner;

/// One owner's season rollup across every scored prediction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub owner: Owner,
    pub races_scored: u32,
    pub exact_matches: u32,
    pub total_positions: u32,
    /// `round(exact_matches / total_positions * 100)`.
    pub accuracy: u32,
    /// Global rank, assigned before pagination.
    pub rank: u32,
}
