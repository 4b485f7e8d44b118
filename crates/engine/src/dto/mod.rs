pub mod grid;
pub mod leaderboard;
pub mod prediction;
pub mod standings;
