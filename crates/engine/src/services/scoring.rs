use std::collections::HashMap;

use crate::models::{
    BreakdownEntry, DriverId, GridPosition, LockedPrediction, PredictionKey, PredictionScore,
    RaceId, Season,
};
use crate::repository::predictions::PredictionStore;

/// Grades one locked prediction against the official rows.
///
/// The denominator is the number of positions the owner locked, not the grid
/// size. An official slot with no driver never matches. Pure, so re-scoring
/// after a result correction produces exactly the new grade and nothing else.
pub fn score_prediction(
    prediction: &LockedPrediction,
    official: &[GridPosition],
) -> (PredictionScore, Vec<BreakdownEntry>) {
    let official_by_position: HashMap<u8, &Option<DriverId>> = official
        .iter()
        .filter(|row| row.is_official_result)
        .map(|row| (row.position, &row.driver_id))
        .collect();

    let mut exact = 0u32;
    let mut breakdown = Vec::with_capacity(prediction.positions.len());

    for predicted in &prediction.positions {
        let actual = official_by_position
            .get(&predicted.position)
            .and_then(|driver| (*driver).clone());
        let is_exact = actual.as_ref() == Some(&predicted.driver_id);
        if is_exact {
            exact += 1;
        }

        breakdown.push(BreakdownEntry {
            position: predicted.position,
            predicted_driver_id: predicted.driver_id.clone(),
            actual_driver_id: actual,
            is_exact,
        });
    }

    let total = prediction.positions.len() as u32;
    let percentage = if total == 0 {
        0
    } else {
        (f64::from(exact) / f64::from(total) * 100.0).round() as u32
    };

    (
        PredictionScore {
            exact,
            total,
            percentage,
        },
        breakdown,
    )
}

/// Grades every lock for one race in a batch, once the official rows exist.
///
/// One owner's bad snapshot is logged and skipped, never aborting the rest.
/// Safe to re-run: each pass simply overwrites the stored grade with the one
/// derived from the current official rows. With no official rows the batch
/// is a no-op and the predictions stay in the `Locked` state (scoring is
/// deferred, not failed).
pub fn score_race(
    store: &PredictionStore,
    season: Season,
    race_id: &RaceId,
    official: &[GridPosition],
) -> u32 {
    if official.is_empty() {
        tracing::info!(%race_id, "official rows not yet available, deferring scoring");
        return 0;
    }

    let mut scored = 0u32;
    for (owner, prediction) in store.for_race(season, race_id) {
        if prediction.positions.is_empty() {
            tracing::warn!(%owner, %race_id, "skipping lock with no positions");
            continue;
        }

        let (score, breakdown) = score_prediction(&prediction, official);
        let key = PredictionKey {
            owner: owner.clone(),
            season,
            race_id: race_id.clone(),
        };
        match store.set_score(&key, score, breakdown) {
            Ok(()) => scored += 1,
            Err(error) => {
                tracing::warn!(%owner, %race_id, %error, "failed to store score, continuing batch");
            }
        }
    }

    scored
}
