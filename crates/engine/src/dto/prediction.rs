use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{
    BreakdownEntry, LockedPrediction, PredictedPosition, PredictionScore, RaceId, Season,
};

/// Request payload for locking a prediction for one race
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LockPredictionRequest {
    /// Authenticated user id or anonymous fingerprint
    #[validate(length(min = 1, max = 128, message = "Owner must be between 1 and 128 characters"))]
    pub owner: String,

    /// Season year; must match the hosted season when supplied
    pub season: Option<Season>,

    pub positions: Vec<PredictedPosition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LockResponse {
    pub success: bool,
    pub race_id: RaceId,
    pub locked_at: DateTime<Utc>,
}

/// Request payload for unlocking a prediction before race start
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UnlockPredictionRequest {
    #[validate(length(min = 1, max = 128, message = "Owner must be between 1 and 128 characters"))]
    pub owner: String,

    /// Season year; must match the hosted season when supplied
    pub season: Option<Season>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnlockResponse {
    pub success: bool,
}

/// One locked prediction, keyed by race, with its grade when scored
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LockedPredictionResponse {
    pub race_id: RaceId,
    pub positions: Vec<PredictedPosition>,
    pub locked_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<PredictionScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<BreakdownEntry>>,
}

impl LockedPredictionResponse {
    pub fn from_prediction(race_id: RaceId, prediction: LockedPrediction) -> Self {
        Self {
            race_id,
            positions: prediction.positions,
            locked_at: prediction.locked_at,
            score: prediction.score,
            breakdown: prediction.breakdown,
        }
    }
}
