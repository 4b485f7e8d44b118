use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{EngineError, Result};

use super::driver::{Driver, IdentitySwap, Team};
use super::ids::{PointsSystemId, Season};
use super::points_system::PointsSystem;
use super::race::Race;

/// Validated reference data for one season. The engine consumes this as-is;
/// fetching and parsing it is the caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonData {
    pub season: Season,
    /// Whether this season awards the +1 fastest-lap bonus.
    #[serde(default)]
    pub fastest_lap_bonus: bool,
    pub default_points_system: PointsSystemId,
    pub points_systems: Vec<PointsSystem>,
    pub races: Vec<Race>,
    pub teams: Vec<Team>,
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub identity_swaps: Vec<IdentitySwap>,
}

impl SeasonData {
    /// Rejects malformed reference data at the boundary, so the calculation
    /// layers never have to.
    pub fn validate(&self) -> Result<()> {
        let mut race_ids = HashSet::new();
        let mut orders = HashSet::new();
        for race in &self.races {
            if race.grid_size == 0 {
                return Err(EngineError::InvalidReferenceData(format!(
                    "race {} has grid size 0",
                    race.id
                )));
            }
            if !race_ids.insert(&race.id) {
                return Err(EngineError::InvalidReferenceData(format!(
                    "duplicate race id {}",
                    race.id
                )));
            }
            if !orders.insert(race.order) {
                return Err(EngineError::InvalidReferenceData(format!(
                    "duplicate calendar order {}",
                    race.order
                )));
            }
        }

        let team_ids: HashSet<_> = self.teams.iter().map(|t| &t.id).collect();
        if team_ids.len() != self.teams.len() {
            return Err(EngineError::InvalidReferenceData(
                "duplicate team id".to_string(),
            ));
        }

        let mut driver_ids = HashSet::new();
        for driver in &self.drivers {
            if !driver_ids.insert(&driver.id) {
                return Err(EngineError::InvalidReferenceData(format!(
                    "duplicate driver id {}",
                    driver.id
                )));
            }
            if !team_ids.contains(&driver.team_id) {
                return Err(EngineError::InvalidReferenceData(format!(
                    "driver {} references unknown team {}",
                    driver.id, driver.team_id
                )));
            }
        }

        for swap in &self.identity_swaps {
            if !driver_ids.contains(&swap.before) || !driver_ids.contains(&swap.after) {
                return Err(EngineError::InvalidReferenceData(format!(
                    "identity swap references unknown driver ({} / {})",
                    swap.before, swap.after
                )));
            }
        }

        let system_ids: HashSet<_> = self.points_systems.iter().map(|s| &s.id).collect();
        if system_ids.len() != self.points_systems.len() {
            return Err(EngineError::InvalidReferenceData(
                "duplicate points system id".to_string(),
            ));
        }
        if !system_ids.contains(&self.default_points_system) {
            return Err(EngineError::InvalidReferenceData(format!(
                "unknown default points system {}",
                self.default_points_system
            )));
        }

        Ok(())
    }
}
