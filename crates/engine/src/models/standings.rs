use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{DriverId, RaceId, TeamId};

/// One entity's championship line. The full (prediction-inclusive) view is
/// annotated with its delta against the official-only baseline.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DriverStanding {
    pub driver_id: DriverId,
    pub team_id: TeamId,
    pub points: u32,
    /// 1-based rank in the full view, no gaps.
    pub position: u32,
    /// Full points minus official-only points.
    pub prediction_points_gained: i64,
    /// Official-only rank minus full rank; positive means the predictions
    /// improve this driver's position.
    pub position_change: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub points: u32,
    pub position: u32,
    pub prediction_points_gained: i64,
    pub position_change: i32,
}

/// Cumulative points after each race, in calendar order. Feeds time-series
/// charting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryPoint {
    pub race_id: RaceId,
    pub points: u32,
    pub cumulative_points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DriverHistory {
    pub driver_id: DriverId,
    pub entries: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamHistory {
    pub team_id: TeamId,
    pub entries: Vec<HistoryPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Standings {
    pub driver_standings: Vec<DriverStanding>,
    pub team_standings: Vec<TeamStanding>,
    pub driver_history: Vec<DriverHistory>,
    pub team_history: Vec<TeamHistory>,
}
