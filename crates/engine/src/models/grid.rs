use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{DriverId, RaceId, TeamId};

/// One (race, finishing-position) slot. At most one row exists per slot, and
/// a driver occupies at most one slot per race.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GridPosition {
    pub race_id: RaceId,
    /// 1-based, within `[1, race.grid_size]`.
    pub position: u8,
    /// Empty slots are kept as rows so the slot's flags survive edits.
    pub driver_id: Option<DriverId>,
    /// Set when the driver raced for a different team in this specific race
    /// than their currently configured one.
    pub team_id_override: Option<TeamId>,
    pub is_official_result: bool,
    #[serde(default)]
    pub has_fastest_lap: bool,
}

impl GridPosition {
    pub fn official(race_id: RaceId, position: u8, driver_id: DriverId) -> Self {
        Self {
            race_id,
            position,
            driver_id: Some(driver_id),
            team_id_override: None,
            is_official_result: true,
            has_fastest_lap: false,
        }
    }

    pub fn predicted(race_id: RaceId, position: u8, driver_id: DriverId) -> Self {
        Self {
            race_id,
            position,
            driver_id: Some(driver_id),
            team_id_override: None,
            is_official_result: false,
            has_fastest_lap: false,
        }
    }

    pub fn with_fastest_lap(mut self) -> Self {
        self.has_fastest_lap = true;
        self
    }
}
