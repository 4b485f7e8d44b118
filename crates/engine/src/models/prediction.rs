use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{DriverId, Owner, RaceId, Season};

/// Key of one owner's prediction for one race.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredictionKey {
    pub owner: Owner,
    pub season: Season,
    pub race_id: RaceId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PredictedPosition {
    pub position: u8,
    pub driver_id: DriverId,
}

/// Exact-match grade of a locked prediction against the official result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PredictionScore {
    pub exact: u32,
    /// Number of positions the owner locked, not the full grid size.
    pub total: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BreakdownEntry {
    pub position: u8,
    pub predicted_driver_id: DriverId,
    /// None when the official row at this position had no driver.
    pub actual_driver_id: Option<DriverId>,
    pub is_exact: bool,
}

/// An immutable snapshot of the owner's grid at lock time. `positions` never
/// changes after creation; scoring only ever adds `score` and `breakdown`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LockedPrediction {
    pub positions: Vec<PredictedPosition>,
    pub locked_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<PredictionScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<BreakdownEntry>>,
}

impl LockedPrediction {
    pub fn new(positions: Vec<PredictedPosition>, locked_at: DateTime<Utc>) -> Self {
        Self {
            positions,
            locked_at,
            score: None,
            breakdown: None,
        }
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}
