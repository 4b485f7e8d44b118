use std::collections::HashMap;

use crate::models::{DriverId, GridPosition, PointsSystem, RaceKind};

/// Highest finishing position that can carry the fastest-lap bonus.
const FASTEST_LAP_CUTOFF: u8 = 10;

/// Turns one race's grid rows into per-driver points.
///
/// Every driver appearing in `rows` is present in the result, including
/// drivers scoring 0, so team attribution downstream sees the full field.
/// Positions missing from the table score 0 by definition.
pub fn race_points(
    system: &PointsSystem,
    kind: RaceKind,
    fastest_lap_eligible: bool,
    rows: &[GridPosition],
) -> HashMap<DriverId, u32> {
    let mut points = HashMap::new();

    for row in rows {
        let Some(driver_id) = &row.driver_id else {
            continue;
        };

        let mut awarded = system.points_for(kind, row.position);
        if fastest_lap_eligible && row.has_fastest_lap && row.position <= FASTEST_LAP_CUTOFF {
            awarded += 1;
        }

        *points.entry(driver_id.clone()).or_insert(0) += awarded;
    }

    points
}
