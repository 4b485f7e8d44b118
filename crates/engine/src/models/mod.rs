pub mod driver;
pub mod grid;
pub mod ids;
pub mod leaderboard;
pub mod points_system;
pub mod prediction;
pub mod race;
pub mod season;
pub mod standings;

pub use driver::{Driver, IdentitySwap, Team, selectable_for_race};
pub use grid::GridPosition;
pub use ids::{DriverId, Owner, PointsSystemId, RaceId, Season, TeamId};
pub use leaderboard::LeaderboardEntry;
pub use points_system::{PointsSystem, RaceKind};
pub use prediction::{
    BreakdownEntry, LockedPrediction, PredictedPosition, PredictionKey, PredictionScore,
};
pub use race::Race;
pub use season::SeasonData;
pub use standings::{
    DriverHistory, DriverStanding, HistoryPoint, Standings, TeamHistory, TeamStanding,
};
