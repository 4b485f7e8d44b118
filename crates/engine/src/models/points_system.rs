use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::ids::PointsSystemId;

/// Regular grand prix or sprint race; each has its own points table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RaceKind {
    Regular,
    Sprint,
}

/// Immutable scoring table. Positions absent from a table score 0; that is
/// the defined behavior for top-N-only systems, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointsSystem {
    pub id: PointsSystemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Finishing position -> points for regular races.
    pub regular: BTreeMap<u8, u32>,
    /// Finishing position -> points for sprint races.
    #[serde(default)]
    pub sprint: BTreeMap<u8, u32>,
}

impl PointsSystem {
    pub fn points_for(&self, kind: RaceKind, position: u8) -> u32 {
        let table = match kind {
            RaceKind::Regular => &self.regular,
            RaceKind::Sprint => &self.sprint,
        };
        table.get(&position).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> PointsSystem {
        PointsSystem {
            id: PointsSystemId::from("current"),
            name: "Current".to_string(),
            description: String::new(),
            regular: [
                (1, 25),
                (2, 18),
                (3, 15),
                (4, 12),
                (5, 10),
                (6, 8),
                (7, 6),
                (8, 4),
                (9, 2),
                (10, 1),
            ]
            .into_iter()
            .collect(),
            sprint: (1..=8).map(|p| (p, 9 - p as u32)).collect(),
        }
    }

    #[test]
    fn test_points_for_scored_position() {
        assert_eq!(current().points_for(RaceKind::Regular, 1), 25);
        assert_eq!(current().points_for(RaceKind::Sprint, 1), 8);
    }

    #[test]
    fn test_unscored_position_yields_zero() {
        assert_eq!(current().points_for(RaceKind::Regular, 11), 0);
        assert_eq!(current().points_for(RaceKind::Sprint, 9), 0);
    }
}
