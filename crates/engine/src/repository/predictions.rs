use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::error::{EngineError, Result};
use crate::models::{
    BreakdownEntry, LockedPrediction, Owner, PredictedPosition, PredictionKey, PredictionScore,
    Race, RaceId, Season,
};

/// Returned to the caller on a successful lock.
#[derive(Debug, Clone)]
pub struct LockAck {
    pub race_id: RaceId,
    pub locked_at: DateTime<Utc>,
}

/// Keeper of the `Unlocked -> Locked -> Scored` state machine.
///
/// Every transition validates synchronously and then performs its
/// check-then-write under the single write guard, so two racing `lock` calls
/// for one key resolve to exactly one success and one `AlreadyLocked`.
#[derive(Default)]
pub struct PredictionStore {
    inner: RwLock<HashMap<PredictionKey, LockedPrediction>>,
}

impl PredictionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks a snapshot of `positions` for `(owner, season, race)`.
    ///
    /// The snapshot is decoupled from the live grid; later draft edits never
    /// reach a locked prediction. `fetch_race` runs under the write guard, so
    /// the window check sees the race state at the moment of the write, not
    /// the state the handler read earlier. `now` is taken at the call site.
    pub fn lock(
        &self,
        key: PredictionKey,
        positions: Vec<PredictedPosition>,
        fetch_race: impl FnOnce() -> Result<Race>,
        now: DateTime<Utc>,
    ) -> Result<LockAck> {
        let mut guard = self.inner.write().expect("prediction store poisoned");

        let race = fetch_race()?;
        if !race.lock_window_open(now) {
            return Err(EngineError::LockWindowClosed);
        }
        if positions.is_empty() {
            return Err(EngineError::EmptyPrediction);
        }
        validate_positions(&positions, &race)?;

        if guard.contains_key(&key) {
            return Err(EngineError::AlreadyLocked);
        }

        let locked_at = now;
        guard.insert(key.clone(), LockedPrediction::new(positions, locked_at));

        Ok(LockAck {
            race_id: key.race_id,
            locked_at,
        })
    }

    /// Deletes the lock entirely; a later re-lock creates a fresh snapshot.
    pub fn unlock(
        &self,
        key: &PredictionKey,
        fetch_race: impl FnOnce() -> Result<Race>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let mut guard = self.inner.write().expect("prediction store poisoned");

        let race = fetch_race()?;
        if !race.lock_window_open(now) {
            return Err(EngineError::LockWindowClosed);
        }

        guard.remove(key).map(|_| ()).ok_or(EngineError::NotLocked)
    }

    /// Every prediction one owner holds for a season, including scores where
    /// present.
    pub fn for_owner(&self, owner: &Owner, season: Season) -> Vec<(RaceId, LockedPrediction)> {
        let guard = self.inner.read().expect("prediction store poisoned");
        let mut predictions: Vec<_> = guard
            .iter()
            .filter(|(key, _)| &key.owner == owner && key.season == season)
            .map(|(key, prediction)| (key.race_id.clone(), prediction.clone()))
            .collect();
        predictions.sort_by(|a, b| a.0.cmp(&b.0));
        predictions
    }

    /// Every owner's predictions for a season, grouped for the leaderboard.
    pub fn by_owner(&self, season: Season) -> HashMap<Owner, Vec<LockedPrediction>> {
        let guard = self.inner.read().expect("prediction store poisoned");
        let mut grouped: HashMap<Owner, Vec<LockedPrediction>> = HashMap::new();
        for (key, prediction) in guard.iter() {
            if key.season == season {
                grouped
                    .entry(key.owner.clone())
                    .or_default()
                    .push(prediction.clone());
            }
        }
        grouped
    }

    /// Snapshot of all locks for one race, for batch scoring.
    pub fn for_race(&self, season: Season, race_id: &RaceId) -> Vec<(Owner, LockedPrediction)> {
        let guard = self.inner.read().expect("prediction store poisoned");
        guard
            .iter()
            .filter(|(key, _)| key.season == season && &key.race_id == race_id)
            .map(|(key, prediction)| (key.owner.clone(), prediction.clone()))
            .collect()
    }

    /// `Locked -> Scored`. Overwrites any previous grade, which is what makes
    /// re-scoring after a result correction safe. Never touches `positions`.
    pub fn set_score(
        &self,
        key: &PredictionKey,
        score: PredictionScore,
        breakdown: Vec<BreakdownEntry>,
    ) -> Result<()> {
        let mut guard = self.inner.write().expect("prediction store poisoned");
        let prediction = guard.get_mut(key).ok_or(EngineError::NotLocked)?;
        prediction.score = Some(score);
        prediction.breakdown = Some(breakdown);
        Ok(())
    }
}

fn validate_positions(positions: &[PredictedPosition], race: &Race) -> Result<()> {
    let mut seen_positions = HashSet::new();
    let mut seen_drivers = HashSet::new();

    for predicted in positions {
        if predicted.position < 1 || predicted.position > race.grid_size {
            return Err(EngineError::InvalidPosition(format!(
                "position {} outside [1, {}]",
                predicted.position, race.grid_size
            )));
        }
        if !seen_positions.insert(predicted.position) {
            return Err(EngineError::InvalidPosition(format!(
                "position {} duplicated",
                predicted.position
            )));
        }
        if !seen_drivers.insert(&predicted.driver_id) {
            return Err(EngineError::InvalidPosition(format!(
                "driver {} placed more than once",
                predicted.driver_id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn race() -> Race {
        Race {
            id: RaceId::from("bahrain"),
            name: "Bahrain Grand Prix".to_string(),
            order: 1,
            is_sprint: false,
            completed: false,
            start_time: Some(Utc.with_ymd_and_hms(2025, 3, 2, 15, 0, 0).unwrap()),
            grid_size: 20,
        }
    }

    fn before_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn after_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 2, 15, 0, 0).unwrap()
    }

    fn key(owner: &str) -> PredictionKey {
        PredictionKey {
            owner: owner.into(),
            season: 2025,
            race_id: RaceId::from("bahrain"),
        }
    }

    fn positions() -> Vec<PredictedPosition> {
        vec![
            PredictedPosition {
                position: 1,
                driver_id: "ver".into(),
            },
            PredictedPosition {
                position: 2,
                driver_id: "nor".into(),
            },
        ]
    }

    #[test]
    fn test_lock_then_relock_rejected() {
        let store = PredictionStore::new();
        let ack = store
            .lock(key("alice"), positions(), || Ok(race()), before_start())
            .unwrap();
        assert_eq!(ack.race_id.as_str(), "bahrain");

        let second = store.lock(key("alice"), positions(), || Ok(race()), before_start());
        assert!(matches!(second, Err(EngineError::AlreadyLocked)));
    }

    #[test]
    fn test_lock_rejected_at_or_after_start() {
        let store = PredictionStore::new();
        let result = store.lock(key("alice"), positions(), || Ok(race()), after_start());
        assert!(matches!(result, Err(EngineError::LockWindowClosed)));
    }

    #[test]
    fn test_lock_rejected_without_start_time() {
        let store = PredictionStore::new();
        let mut no_start = race();
        no_start.start_time = None;

        let result = store.lock(key("alice"), positions(), move || Ok(no_start), before_start());
        assert!(matches!(result, Err(EngineError::LockWindowClosed)));
    }

    #[test]
    fn test_empty_prediction_rejected() {
        let store = PredictionStore::new();
        let result = store.lock(key("alice"), vec![], || Ok(race()), before_start());
        assert!(matches!(result, Err(EngineError::EmptyPrediction)));
    }

    #[test]
    fn test_out_of_range_and_duplicate_positions_rejected() {
        let store = PredictionStore::new();

        let out_of_range = vec![PredictedPosition {
            position: 21,
            driver_id: "ver".into(),
        }];
        assert!(matches!(
            store.lock(key("alice"), out_of_range, || Ok(race()), before_start()),
            Err(EngineError::InvalidPosition(_))
        ));

        let duplicated = vec![
            PredictedPosition {
                position: 1,
                driver_id: "ver".into(),
            },
            PredictedPosition {
                position: 1,
                driver_id: "nor".into(),
            },
        ];
        assert!(matches!(
            store.lock(key("alice"), duplicated, || Ok(race()), before_start()),
            Err(EngineError::InvalidPosition(_))
        ));
    }

    #[test]
    fn test_unlock_deletes_and_allows_fresh_lock() {
        let store = PredictionStore::new();
        store
            .lock(key("alice"), positions(), || Ok(race()), before_start())
            .unwrap();

        store.unlock(&key("alice"), || Ok(race()), before_start()).unwrap();
        assert!(store.for_owner(&"alice".into(), 2025).is_empty());

        store
            .lock(key("alice"), positions(), || Ok(race()), before_start())
            .unwrap();
    }

    #[test]
    fn test_unlock_without_lock_is_not_locked() {
        let store = PredictionStore::new();
        let result = store.unlock(&key("alice"), || Ok(race()), before_start());
        assert!(matches!(result, Err(EngineError::NotLocked)));
    }

    #[test]
    fn test_unlock_after_start_rejected() {
        let store = PredictionStore::new();
        store
            .lock(key("alice"), positions(), || Ok(race()), before_start())
            .unwrap();

        let result = store.unlock(&key("alice"), || Ok(race()), after_start());
        assert!(matches!(result, Err(EngineError::LockWindowClosed)));
    }

    #[test]
    fn test_lock_observes_completion_at_write_time() {
        let store = PredictionStore::new();
        let live = Arc::new(std::sync::RwLock::new(race()));

        // The handler read an open race, then the official result landed
        // before the store write.
        live.write().unwrap().completed = true;

        let fetch = {
            let live = Arc::clone(&live);
            move || Ok(live.read().unwrap().clone())
        };
        let result = store.lock(key("alice"), positions(), fetch, before_start());
        assert!(matches!(result, Err(EngineError::LockWindowClosed)));
    }

    #[test]
    fn test_concurrent_locks_one_winner() {
        let store = Arc::new(PredictionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .lock(key("alice"), positions(), || Ok(race()), before_start())
                        .is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|&succeeded| succeeded)
            .count();
        assert_eq!(successes, 1);
    }

    #[test]
    fn test_score_transition_preserves_positions() {
        let store = PredictionStore::new();
        store
            .lock(key("alice"), positions(), || Ok(race()), before_start())
            .unwrap();

        store
            .set_score(
                &key("alice"),
                PredictionScore {
                    exact: 1,
                    total: 2,
                    percentage: 50,
                },
                vec![],
            )
            .unwrap();

        let stored = store.for_owner(&"alice".into(), 2025);
        assert_eq!(stored[0].1.positions, positions());
        assert_eq!(stored[0].1.score.unwrap().percentage, 50);
    }
}
