use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::RaceId;

/// One round of the season calendar. `order` drives every chronological
/// computation; `completed` flips exactly once, when official results arrive.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Race {
    pub id: RaceId,
    pub name: String,
    /// Calendar position, ascending. Sprint races carry their own order slot.
    pub order: u32,
    #[serde(default)]
    pub is_sprint: bool,
    #[serde(default)]
    pub completed: bool,
    /// Unknown start time means locking is disallowed (fail safe).
    pub start_time: Option<DateTime<Utc>>,
    /// Number of grid positions available this season.
    pub grid_size: u8,
}

impl Race {
    /// Whether a lock or unlock may still happen at instant `now`.
    pub fn lock_window_open(&self, now: DateTime<Utc>) -> bool {
        match self.start_time {
            Some(start) => !self.completed && now < start,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn race(start: Option<DateTime<Utc>>, completed: bool) -> Race {
        Race {
            id: RaceId::from("bahrain"),
            name: "Bahrain Grand Prix".to_string(),
            order: 1,
            is_sprint: false,
            completed,
            start_time: start,
            grid_size: 20,
        }
    }

    #[test]
    fn test_window_open_before_start() {
        let start = Utc.with_ymd_and_hms(2025, 3, 2, 15, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 2, 14, 59, 59).unwrap();
        assert!(race(Some(start), false).lock_window_open(now));
    }

    #[test]
    fn test_window_closed_at_start() {
        let start = Utc.with_ymd_and_hms(2025, 3, 2, 15, 0, 0).unwrap();
        assert!(!race(Some(start), false).lock_window_open(start));
    }

    #[test]
    fn test_window_closed_without_start_time() {
        let now = Utc.with_ymd_and_hms(2025, 3, 2, 14, 0, 0).unwrap();
        assert!(!race(None, false).lock_window_open(now));
    }

    #[test]
    fn test_window_closed_when_completed() {
        let start = Utc.with_ymd_and_hms(2025, 3, 2, 15, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        assert!(!race(Some(start), true).lock_window_open(now));
    }
}
