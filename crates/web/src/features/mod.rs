pub mod leaderboard;
pub mod predictions;
pub mod races;
pub mod standings;
