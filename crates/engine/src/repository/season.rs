use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::error::{EngineError, Result};
use crate::models::{
    GridPosition, PointsSystem, PointsSystemId, Race, RaceId, Season, SeasonData,
    selectable_for_race,
};

/// Holds a season's validated reference data, the live race lifecycle flags,
/// and the official result rows as they arrive.
pub struct SeasonStore {
    reference: SeasonData,
    systems: HashMap<PointsSystemId, PointsSystem>,
    races: RwLock<Vec<Race>>,
    official: RwLock<HashMap<RaceId, Vec<GridPosition>>>,
}

impl SeasonStore {
    /// Rejects malformed reference data up front; everything downstream may
    /// assume it is consistent.
    pub fn new(data: SeasonData) -> Result<Self> {
        data.validate()?;

        let systems = data
            .points_systems
            .iter()
            .map(|system| (system.id.clone(), system.clone()))
            .collect();
        let races = data.races.clone();

        Ok(Self {
            reference: data,
            systems,
            races: RwLock::new(races),
            official: RwLock::new(HashMap::new()),
        })
    }

    pub fn season(&self) -> Season {
        self.reference.season
    }

    pub fn race(&self, race_id: &RaceId) -> Result<Race> {
        self.races
            .read()
            .expect("season store poisoned")
            .iter()
            .find(|race| &race.id == race_id)
            .cloned()
            .ok_or(EngineError::NotFound)
    }

    pub fn races(&self) -> Vec<Race> {
        self.races.read().expect("season store poisoned").clone()
    }

    /// Reference data with the current race lifecycle flags folded in, for
    /// the standings calculator.
    pub fn snapshot(&self) -> SeasonData {
        let mut data = self.reference.clone();
        data.races = self.races();
        data
    }

    /// Looks up a points system by id, falling back to the season default.
    pub fn points_system(&self, id: Option<&PointsSystemId>) -> Result<&PointsSystem> {
        let id = id.unwrap_or(&self.reference.default_points_system);
        self.systems.get(id).ok_or(EngineError::NotFound)
    }

    /// Stores a race's official rows and flips the race to completed.
    ///
    /// Re-posting corrected rows for an already completed race replaces the
    /// previous set wholesale, so downstream re-scoring sees only the
    /// corrected result.
    pub fn set_official_result(
        &self,
        race_id: &RaceId,
        mut rows: Vec<GridPosition>,
    ) -> Result<Vec<GridPosition>> {
        let race = self.race(race_id)?;
        self.validate_result_rows(&race, &rows)?;

        for row in &mut rows {
            row.race_id = race.id.clone();
            row.is_official_result = true;
        }

        {
            let mut official = self.official.write().expect("season store poisoned");
            official.insert(race.id.clone(), rows.clone());
        }
        {
            let mut races = self.races.write().expect("season store poisoned");
            if let Some(live) = races.iter_mut().find(|r| r.id == race.id) {
                live.completed = true;
            }
        }

        Ok(rows)
    }

    pub fn official_rows(&self, race_id: &RaceId) -> Vec<GridPosition> {
        self.official
            .read()
            .expect("season store poisoned")
            .get(race_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn official_map(&self) -> HashMap<RaceId, Vec<GridPosition>> {
        self.official.read().expect("season store poisoned").clone()
    }

    fn validate_result_rows(&self, race: &Race, rows: &[GridPosition]) -> Result<()> {
        let mut seen_positions = HashSet::new();
        let mut seen_drivers = HashSet::new();

        for row in rows {
            if row.position < 1 || row.position > race.grid_size {
                return Err(EngineError::InvalidPosition(format!(
                    "position {} outside [1, {}]",
                    row.position, race.grid_size
                )));
            }
            if !seen_positions.insert(row.position) {
                return Err(EngineError::InvalidPosition(format!(
                    "position {} duplicated",
                    row.position
                )));
            }
            if let Some(driver_id) = &row.driver_id {
                if !seen_drivers.insert(driver_id) {
                    return Err(EngineError::InvalidPosition(format!(
                        "driver {driver_id} placed more than once"
                    )));
                }
                if !selectable_for_race(&self.reference.identity_swaps, driver_id, race.order) {
                    return Err(EngineError::IneligibleDriver(driver_id.to_string()));
                }
            }
        }

        Ok(())
    }
}
