use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::error::{EngineError, Result};
use crate::models::{
    DriverId, GridPosition, IdentitySwap, Owner, Race, RaceId, selectable_for_race,
};

/// Per-owner draft grid rows, the server side of the client's debounced
/// autosave. Each upsert is a plain last-write-wins conditional write; it is
/// entirely separate from the explicit lock/unlock transition.
#[derive(Default)]
pub struct DraftStore {
    rows: RwLock<HashMap<(Owner, RaceId), BTreeMap<u8, GridPosition>>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `driver_id` (or clears the slot when `None`) at `position`.
    ///
    /// Placing a driver who already occupies another slot of the same race
    /// vacates the old slot first, preserving the one-slot-per-driver
    /// invariant under drag-and-drop style edits.
    pub fn set_slot(
        &self,
        owner: &Owner,
        race: &Race,
        swaps: &[IdentitySwap],
        position: u8,
        driver_id: Option<DriverId>,
        has_fastest_lap: bool,
    ) -> Result<GridPosition> {
        if race.completed {
            return Err(EngineError::RaceCompleted);
        }
        if position < 1 || position > race.grid_size {
            return Err(EngineError::InvalidPosition(format!(
                "position {} outside [1, {}]",
                position, race.grid_size
            )));
        }
        if let Some(driver_id) = &driver_id
            && !selectable_for_race(swaps, driver_id, race.order)
        {
            return Err(EngineError::IneligibleDriver(driver_id.to_string()));
        }

        let mut guard = self.rows.write().expect("draft store poisoned");
        let grid = guard
            .entry((owner.clone(), race.id.clone()))
            .or_default();

        if let Some(driver_id) = &driver_id {
            let previous = grid
                .iter()
                .find(|(slot, row)| **slot != position && row.driver_id.as_ref() == Some(driver_id))
                .map(|(slot, _)| *slot);
            if let Some(slot) = previous {
                grid.remove(&slot);
            }
        }

        let row = GridPosition {
            race_id: race.id.clone(),
            position,
            driver_id,
            team_id_override: None,
            is_official_result: false,
            has_fastest_lap,
        };
        grid.insert(position, row.clone());

        Ok(row)
    }

    pub fn clear_slot(&self, owner: &Owner, race_id: &RaceId, position: u8) -> Result<()> {
        let mut guard = self.rows.write().expect("draft store poisoned");
        let grid = guard
            .get_mut(&(owner.clone(), race_id.clone()))
            .ok_or(EngineError::NotFound)?;
        grid.remove(&position).ok_or(EngineError::NotFound)?;
        Ok(())
    }

    /// Rows for one race, ordered by position.
    pub fn rows(&self, owner: &Owner, race_id: &RaceId) -> Vec<GridPosition> {
        let guard = self.rows.read().expect("draft store poisoned");
        guard
            .get(&(owner.clone(), race_id.clone()))
            .map(|grid| grid.values().cloned().collect())
            .unwrap_or_default()
    }

    /// All of one owner's draft rows, grouped by race, for the standings
    /// calculator's full pass.
    pub fn rows_by_race(&self, owner: &Owner) -> HashMap<RaceId, Vec<GridPosition>> {
        let guard = self.rows.read().expect("draft store poisoned");
        guard
            .iter()
            .filter(|((row_owner, _), _)| row_owner == owner)
            .map(|((_, race_id), grid)| (race_id.clone(), grid.values().cloned().collect()))
            .collect()
    }
}
