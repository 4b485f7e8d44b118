use std::collections::HashMap;

use crate::models::{
    DriverHistory, DriverId, DriverStanding, GridPosition, HistoryPoint, PointsSystem, RaceId,
    RaceKind, SeasonData, Standings, TeamHistory, TeamId, TeamStanding,
};

use super::points::race_points;

/// The grid rows the calculator reads: official rows shared by everyone, the
/// owner's draft rows layered in for races without a result yet.
#[derive(Debug, Default)]
pub struct GridView {
    pub official: HashMap<RaceId, Vec<GridPosition>>,
    pub drafts: HashMap<RaceId, Vec<GridPosition>>,
}

impl GridView {
    /// Rows for the official-only baseline pass.
    fn official_rows(&self, race_id: &RaceId) -> &[GridPosition] {
        self.official.get(race_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows for the full pass: the official result where one exists, the
    /// owner's predictions otherwise. Keeps the one-row-per-slot invariant.
    fn full_rows(&self, race_id: &RaceId) -> &[GridPosition] {
        match self.official.get(race_id) {
            Some(rows) if !rows.is_empty() => rows,
            _ => self.drafts.get(race_id).map(Vec::as_slice).unwrap_or(&[]),
        }
    }
}

#[derive(Default)]
struct PassTotals {
    drivers: HashMap<DriverId, u32>,
    teams: HashMap<TeamId, u32>,
    driver_history: Vec<(RaceId, HashMap<DriverId, u32>)>,
    team_history: Vec<(RaceId, HashMap<TeamId, u32>)>,
}

/// Derives ranked driver and team standings plus cumulative histories.
///
/// Two passes run over the calendar: the official-only baseline and the full
/// view including predictions. The final standings are the full view
/// annotated with its deltas against the baseline. Ties on points break by
/// id ascending, so repeated runs always produce the same order.
pub fn calculate(data: &SeasonData, view: &GridView, system: &PointsSystem) -> Standings {
    let mut races: Vec<_> = data.races.iter().collect();
    races.sort_by_key(|race| race.order);

    let driver_teams: HashMap<&DriverId, &TeamId> = data
        .drivers
        .iter()
        .map(|driver| (&driver.id, &driver.team_id))
        .collect();

    // Mid-season identity swaps consolidate onto the post-cutoff identity
    // for display; placement eligibility stays per-identity elsewhere.
    let display_ids: HashMap<&DriverId, &DriverId> = data
        .identity_swaps
        .iter()
        .flat_map(|swap| {
            [
                (&swap.before, swap.display_id()),
                (&swap.after, swap.display_id()),
            ]
        })
        .collect();

    let run_pass = |official_only: bool| -> PassTotals {
        let mut totals = PassTotals::default();

        for race in &races {
            let rows = if official_only {
                view.official_rows(&race.id)
            } else {
                view.full_rows(&race.id)
            };
            let kind = if race.is_sprint {
                RaceKind::Sprint
            } else {
                RaceKind::Regular
            };

            let per_driver = race_points(system, kind, data.fastest_lap_bonus, rows);

            // Team a row's points land on: the override when the driver raced
            // for a different team in that race, else the configured team.
            let row_teams: HashMap<&DriverId, &TeamId> = rows
                .iter()
                .filter_map(|row| {
                    let driver_id = row.driver_id.as_ref()?;
                    let team = row
                        .team_id_override
                        .as_ref()
                        .or_else(|| driver_teams.get(driver_id).copied())?;
                    Some((driver_id, team))
                })
                .collect();

            let mut race_driver_points: HashMap<DriverId, u32> = HashMap::new();
            let mut race_team_points: HashMap<TeamId, u32> = HashMap::new();

            for (driver_id, points) in &per_driver {
                let display = display_ids.get(driver_id).copied().unwrap_or(driver_id);
                *totals.drivers.entry(display.clone()).or_insert(0) += points;
                *race_driver_points.entry(display.clone()).or_insert(0) += points;

                if let Some(team_id) = row_teams.get(driver_id) {
                    *totals.teams.entry((*team_id).clone()).or_insert(0) += points;
                    *race_team_points.entry((*team_id).clone()).or_insert(0) += points;
                }
            }

            totals
                .driver_history
                .push((race.id.clone(), race_driver_points));
            totals
                .team_history
                .push((race.id.clone(), race_team_points));
        }

        totals
    };

    let official = run_pass(true);
    let full = run_pass(false);

    let official_driver_ranks = rank(&official.drivers);
    let full_driver_ranks = rank(&full.drivers);
    let official_team_ranks = rank(&official.teams);
    let full_team_ranks = rank(&full.teams);

    let mut driver_standings: Vec<DriverStanding> = full_driver_ranks
        .iter()
        .map(|(driver_id, full_position)| {
            let full_points = full.drivers[driver_id];
            let official_points = official.drivers.get(driver_id).copied().unwrap_or(full_points);
            let official_position = official_driver_ranks
                .get(driver_id)
                .copied()
                .unwrap_or(*full_position);

            DriverStanding {
                driver_id: driver_id.clone(),
                team_id: driver_teams
                    .get(driver_id)
                    .map(|team| (*team).clone())
                    .unwrap_or_else(|| TeamId::new("unknown")),
                points: full_points,
                position: *full_position,
                prediction_points_gained: i64::from(full_points) - i64::from(official_points),
                position_change: official_position as i32 - *full_position as i32,
            }
        })
        .collect();
    driver_standings.sort_by_key(|standing| standing.position);

    let mut team_standings: Vec<TeamStanding> = full_team_ranks
        .iter()
        .map(|(team_id, full_position)| {
            let full_points = full.teams[team_id];
            let official_points = official.teams.get(team_id).copied().unwrap_or(full_points);
            let official_position = official_team_ranks
                .get(team_id)
                .copied()
                .unwrap_or(*full_position);

            TeamStanding {
                team_id: team_id.clone(),
                points: full_points,
                position: *full_position,
                prediction_points_gained: i64::from(full_points) - i64::from(official_points),
                position_change: official_position as i32 - *full_position as i32,
            }
        })
        .collect();
    team_standings.sort_by_key(|standing| standing.position);

    Standings {
        driver_standings,
        team_standings,
        driver_history: driver_series(&full),
        team_history: team_series(&full),
    }
}

/// Ranks entities 1, 2, 3, … with no gaps: points descending, id ascending
/// on ties.
fn rank<Id: Clone + Ord + std::hash::Hash>(totals: &HashMap<Id, u32>) -> HashMap<Id, u32> {
    let mut ordered: Vec<_> = totals.iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, (id, _))| (id.clone(), index as u32 + 1))
        .collect()
}

fn driver_series(pass: &PassTotals) -> Vec<DriverHistory> {
    let mut by_driver: HashMap<DriverId, Vec<HistoryPoint>> = HashMap::new();
    let mut cumulative: HashMap<DriverId, u32> = HashMap::new();

    for (race_id, race_points) in &pass.driver_history {
        for (driver_id, points) in race_points {
            *cumulative.entry(driver_id.clone()).or_insert(0) += points;
        }
        // Extend every known driver's series each race so chart lines stay
        // continuous once a driver has scored.
        for (driver_id, total) in &cumulative {
            by_driver
                .entry(driver_id.clone())
                .or_default()
                .push(HistoryPoint {
                    race_id: race_id.clone(),
                    points: race_points.get(driver_id).copied().unwrap_or(0),
                    cumulative_points: *total,
                });
        }
    }

    let mut series: Vec<DriverHistory> = by_driver
        .into_iter()
        .map(|(driver_id, entries)| DriverHistory { driver_id, entries })
        .collect();
    series.sort_by(|a, b| a.driver_id.cmp(&b.driver_id));
    series
}

fn team_series(pass: &PassTotals) -> Vec<TeamHistory> {
    let mut by_team: HashMap<TeamId, Vec<HistoryPoint>> = HashMap::new();
    let mut cumulative: HashMap<TeamId, u32> = HashMap::new();

    for (race_id, race_points) in &pass.team_history {
        for (team_id, points) in race_points {
            *cumulative.entry(team_id.clone()).or_insert(0) += points;
        }
        for (team_id, total) in &cumulative {
            by_team.entry(team_id.clone()).or_default().push(HistoryPoint {
                race_id: race_id.clone(),
                points: race_points.get(team_id).copied().unwrap_or(0),
                cumulative_points: *total,
            });
        }
    }

    let mut series: Vec<TeamHistory> = by_team
        .into_iter()
        .map(|(team_id, entries)| TeamHistory { team_id, entries })
        .collect();
    series.sort_by(|a, b| a.team_id.cmp(&b.team_id));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Driver, IdentitySwap, PointsSystemId, Race, Team};

    fn points_system() -> PointsSystem {
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

    fn race(id: &str, order: u32, is_sprint: bool, completed: bool) -> Race {
        Race {
            id: RaceId::from(id),
            name: id.to_string(),
            order,
            is_sprint,
            completed,
            start_time: None,
            grid_size: 20,
        }
    }

    fn season(races: Vec<Race>, swaps: Vec<IdentitySwap>) -> SeasonData {
        SeasonData {
            season: 2025,
            fastest_lap_bonus: false,
            default_points_system: PointsSystemId::from("current"),
            points_systems: vec![points_system()],
            races,
            teams: vec![
                Team {
                    id: TeamId::from("red-bull"),
                    name: "Red Bull".to_string(),
                },
                Team {
                    id: TeamId::from("mclaren"),
                    name: "McLaren".to_string(),
                },
                Team {
                    id: TeamId::from("racing-bulls"),
                    name: "Racing Bulls".to_string(),
                },
            ],
            drivers: vec![
                Driver {
                    id: DriverId::from("ver"),
                    name: "Max Verstappen".to_string(),
                    team_id: TeamId::from("red-bull"),
                },
                Driver {
                    id: DriverId::from("nor"),
                    name: "Lando Norris".to_string(),
                    team_id: TeamId::from("mclaren"),
                },
                Driver {
                    id: DriverId::from("tsu-rb"),
                    name: "Yuki Tsunoda".to_string(),
                    team_id: TeamId::from("racing-bulls"),
                },
                Driver {
                    id: DriverId::from("tsu-redbull"),
                    name: "Yuki Tsunoda".to_string(),
                    team_id: TeamId::from("red-bull"),
                },
            ],
            identity_swaps: swaps,
        }
    }

    fn official(race: &str, position: u8, driver: &str) -> GridPosition {
        GridPosition::official(RaceId::from(race), position, driver.into())
    }

    fn predicted(race: &str, position: u8, driver: &str) -> GridPosition {
        GridPosition::predicted(RaceId::from(race), position, driver.into())
    }

    #[test]
    fn test_predictions_layer_over_official_baseline() {
        let data = season(vec![race("r1", 1, false, true), race("r2", 2, false, false)], vec![]);
        let view = GridView {
            official: [(
                RaceId::from("r1"),
                vec![official("r1", 1, "ver"), official("r1", 2, "nor")],
            )]
            .into_iter()
            .collect(),
            drafts: [(
                RaceId::from("r2"),
                vec![predicted("r2", 1, "nor"), predicted("r2", 2, "ver")],
            )]
            .into_iter()
            .collect(),
        };

        let standings = calculate(&data, &view, &points_system());

        // Full view: ver 25+18=43, nor 18+25=43; the id tie-break puts
        // "nor" ahead of "ver".
        let nor = standings
            .driver_standings
            .iter()
            .find(|s| s.driver_id.as_str() == "nor")
            .unwrap();
        let ver = standings
            .driver_standings
            .iter()
            .find(|s| s.driver_id.as_str() == "ver")
            .unwrap();

        assert_eq!(nor.points, 43);
        assert_eq!(ver.points, 43);
        assert_eq!(nor.position, 1);
        assert_eq!(ver.position, 2);

        // Baseline: ver 25 (rank 1), nor 18 (rank 2).
        assert_eq!(nor.position_change, 1);
        assert_eq!(ver.position_change, -1);
        assert_eq!(nor.prediction_points_gained, 25);
        assert_eq!(ver.prediction_points_gained, 18);
    }

    #[test]
    fn test_position_change_symmetry_sums_to_zero() {
        let data = season(vec![race("r1", 1, false, true), race("r2", 2, false, false)], vec![]);
        let view = GridView {
            official: [(RaceId::from("r1"), vec![official("r1", 1, "ver"), official("r1", 2, "nor")])]
                .into_iter()
                .collect(),
            drafts: [(RaceId::from("r2"), vec![predicted("r2", 1, "nor")])]
                .into_iter()
                .collect(),
        };

        let standings = calculate(&data, &view, &points_system());
        let sum: i32 = standings
            .driver_standings
            .iter()
            .map(|s| s.position_change)
            .sum();
        assert_eq!(sum, 0);
    }

    #[test]
    fn test_no_predictions_means_zero_deltas() {
        let data = season(vec![race("r1", 1, false, true)], vec![]);
        let view = GridView {
            official: [(RaceId::from("r1"), vec![official("r1", 1, "ver"), official("r1", 2, "nor")])]
                .into_iter()
                .collect(),
            drafts: HashMap::new(),
        };

        let standings = calculate(&data, &view, &points_system());
        for standing in &standings.driver_standings {
            assert_eq!(standing.position_change, 0);
            assert_eq!(standing.prediction_points_gained, 0);
        }
    }

    #[test]
    fn test_aggregation_conserves_points() {
        let data = season(vec![race("r1", 1, false, true), race("r2", 2, true, false)], vec![]);
        let view = GridView {
            official: [(RaceId::from("r1"), vec![official("r1", 1, "ver"), official("r1", 2, "nor")])]
                .into_iter()
                .collect(),
            drafts: [(RaceId::from("r2"), vec![predicted("r2", 1, "nor"), predicted("r2", 2, "ver")])]
                .into_iter()
                .collect(),
        };

        let standings = calculate(&data, &view, &points_system());
        let total: u32 = standings.driver_standings.iter().map(|s| s.points).sum();
        // r1 regular: 25 + 18; r2 sprint: 8 + 7.
        assert_eq!(total, 25 + 18 + 8 + 7);
    }

    #[test]
    fn test_team_override_attributes_to_historical_team() {
        let data = season(vec![race("r1", 1, false, true)], vec![]);
        let mut row = official("r1", 1, "ver");
        row.team_id_override = Some(TeamId::from("mclaren"));
        let view = GridView {
            official: [(RaceId::from("r1"), vec![row])].into_iter().collect(),
            drafts: HashMap::new(),
        };

        let standings = calculate(&data, &view, &points_system());
        let mclaren = standings
            .team_standings
            .iter()
            .find(|s| s.team_id.as_str() == "mclaren")
            .unwrap();
        assert_eq!(mclaren.points, 25);
        assert!(
            !standings
                .team_standings
                .iter()
                .any(|s| s.team_id.as_str() == "red-bull" && s.points > 0)
        );
    }

    #[test]
    fn test_identity_swap_consolidates_points_and_splits_teams() {
        let swaps = vec![IdentitySwap {
            before: DriverId::from("tsu-rb"),
            after: DriverId::from("tsu-redbull"),
            cutoff_order: 2,
        }];
        let data = season(vec![race("r1", 1, false, true), race("r2", 2, false, true)], swaps);
        let view = GridView {
            official: [
                (RaceId::from("r1"), vec![official("r1", 1, "tsu-rb")]),
                (RaceId::from("r2"), vec![official("r2", 1, "tsu-redbull")]),
            ]
            .into_iter()
            .collect(),
            drafts: HashMap::new(),
        };

        let standings = calculate(&data, &view, &points_system());

        // Both identities' points merge under the post-cutoff identity.
        let tsunoda = standings
            .driver_standings
            .iter()
            .find(|s| s.driver_id.as_str() == "tsu-redbull")
            .unwrap();
        assert_eq!(tsunoda.points, 50);
        assert!(
            !standings
                .driver_standings
                .iter()
                .any(|s| s.driver_id.as_str() == "tsu-rb")
        );

        // Team points stay on the team each identity raced for.
        let racing_bulls = standings
            .team_standings
            .iter()
            .find(|s| s.team_id.as_str() == "racing-bulls")
            .unwrap();
        let red_bull = standings
            .team_standings
            .iter()
            .find(|s| s.team_id.as_str() == "red-bull")
            .unwrap();
        assert_eq!(racing_bulls.points, 25);
        assert_eq!(red_bull.points, 25);
    }

    #[test]
    fn test_history_is_cumulative_in_calendar_order() {
        let data = season(vec![race("r2", 2, false, true), race("r1", 1, false, true)], vec![]);
        let view = GridView {
            official: [
                (RaceId::from("r1"), vec![official("r1", 1, "ver")]),
                (RaceId::from("r2"), vec![official("r2", 2, "ver")]),
            ]
            .into_iter()
            .collect(),
            drafts: HashMap::new(),
        };

        let standings = calculate(&data, &view, &points_system());
        let ver = standings
            .driver_history
            .iter()
            .find(|h| h.driver_id.as_str() == "ver")
            .unwrap();

        assert_eq!(ver.entries.len(), 2);
        assert_eq!(ver.entries[0].race_id.as_str(), "r1");
        assert_eq!(ver.entries[0].cumulative_points, 25);
        assert_eq!(ver.entries[1].race_id.as_str(), "r2");
        assert_eq!(ver.entries[1].points, 18);
        assert_eq!(ver.entries[1].cumulative_points, 43);
    }
}
