//! Points and prediction scoring engine: turns grids of driver placements
//! into championship standings, governs prediction locking against race
//! start, grades locked predictions once official results land, and rolls
//! scored predictions into a season leaderboard.

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use error::{EngineError, Result};
pub use repository::{DraftStore, PredictionStore, SeasonStore};
