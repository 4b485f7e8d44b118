use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{DriverId, TeamId};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

/// A driver *identity*: the pairing of a real driver with one team. A real
/// driver who switched teams mid-season exists as two identities, linked by
/// an [`IdentitySwap`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub team_id: TeamId,
}

/// Links the two identities of a mid-season team swap. `before` is the only
/// selectable identity for races with `order < cutoff_order`, `after` for
/// races at or past the cutoff. Points consolidate onto `after` for display;
/// grid-placement eligibility is never consolidated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdentitySwap {
    pub before: DriverId,
    pub after: DriverId,
    pub cutoff_order: u32,
}

impl IdentitySwap {
    /// The identity a grid row for a race at `race_order` must use.
    pub fn identity_for_race(&self, race_order: u32) -> &DriverId {
        if race_order < self.cutoff_order {
            &self.before
        } else {
            &self.after
        }
    }

    pub fn involves(&self, driver_id: &DriverId) -> bool {
        &self.before == driver_id || &self.after == driver_id
    }

    /// Identity used when merging both halves for display.
    pub fn display_id(&self) -> &DriverId {
        &self.after
    }
}

/// Whether `driver_id` may be placed on the grid of a race at `race_order`.
/// Drivers outside any swap are always selectable.
pub fn selectable_for_race(swaps: &[IdentitySwap], driver_id: &DriverId, race_order: u32) -> bool {
    swaps
        .iter()
        .filter(|swap| swap.involves(driver_id))
        .all(|swap| swap.identity_for_race(race_order) == driver_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap() -> IdentitySwap {
        IdentitySwap {
            before: DriverId::from("lawson-redbull"),
            after: DriverId::from("lawson-racingbulls"),
            cutoff_order: 3,
        }
    }

    #[test]
    fn test_identity_before_cutoff() {
        assert_eq!(swap().identity_for_race(2).as_str(), "lawson-redbull");
    }

    #[test]
    fn test_identity_at_cutoff() {
        assert_eq!(swap().identity_for_race(3).as_str(), "lawson-racingbulls");
    }

    #[test]
    fn test_selectable_exactly_one_side() {
        let swaps = vec![swap()];
        let before = DriverId::from("lawson-redbull");
        let after = DriverId::from("lawson-racingbulls");

        assert!(selectable_for_race(&swaps, &before, 1));
        assert!(!selectable_for_race(&swaps, &after, 1));
        assert!(!selectable_for_race(&swaps, &before, 5));
        assert!(selectable_for_race(&swaps, &after, 5));
    }

    #[test]
    fn test_unswapped_driver_always_selectable() {
        let swaps = vec![swap()];
        let ver = DriverId::from("verstappen");
        assert!(selectable_for_race(&swaps, &ver, 1));
        assert!(selectable_for_race(&swaps, &ver, 24));
    }
}
