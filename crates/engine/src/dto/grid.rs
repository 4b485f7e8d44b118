use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{DriverId, GridPosition, RaceId, TeamId};

/// Request payload for a draft grid edit (the autosave write path)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetGridSlotRequest {
    #[validate(length(min = 1, max = 128, message = "Owner must be between 1 and 128 characters"))]
    pub owner: String,

    pub position: u8,

    /// None clears the slot's driver
    pub driver_id: Option<DriverId>,

    #[serde(default)]
    pub has_fastest_lap: bool,
}

/// One row of a race's official classification
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfficialResultRow {
    pub position: u8,
    pub driver_id: Option<DriverId>,
    /// Team the driver actually raced for, when it differs from their
    /// configured team
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub has_fastest_lap: bool,
}

/// Request payload for posting a race's official result
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OfficialResultRequest {
    #[validate(length(min = 1, message = "Result must contain at least one row"))]
    pub rows: Vec<OfficialResultRow>,
}

impl OfficialResultRequest {
    pub fn into_rows(self, race_id: &RaceId) -> Vec<GridPosition> {
        self.rows
            .into_iter()
            .map(|row| GridPosition {
                race_id: race_id.clone(),
                position: row.position,
                driver_id: row.driver_id,
                team_id_override: row.team_id,
                is_official_result: true,
                has_fastest_lap: row.has_fastest_lap,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OfficialResultResponse {
    pub race_id: RaceId,
    pub rows_stored: u32,
    /// Locked predictions graded by the scoring batch this write triggered
    pub predictions_scored: u32,
}
