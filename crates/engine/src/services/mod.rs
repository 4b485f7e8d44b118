pub mod leaderboard;
pub mod points;
pub mod scoring;
pub mod standings;
