use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::{LeaderboardEntry, LockedPrediction, Owner};

/// A page of the season leaderboard. Ranks are global, assigned before the
/// page slice.
#[derive(Debug, Clone)]
pub struct LeaderboardPage {
    pub entries: Vec<LeaderboardEntry>,
    pub total_users: u32,
    pub total_pages: u32,
}

/// Rolls every owner's scored predictions into a ranked leaderboard.
///
/// Only predictions carrying a score participate; a locked-but-unscored race
/// contributes nothing. Ordering is accuracy descending, then races scored
/// descending, then earliest first lock, then owner id ascending, so two
/// requests always see the same ranking.
pub fn build(
    predictions: &HashMap<Owner, Vec<LockedPrediction>>,
    page: u32,
    page_size: u32,
) -> LeaderboardPage {
    struct Rollup {
        owner: Owner,
        races_scored: u32,
        exact_matches: u32,
        total_positions: u32,
        accuracy: u32,
        first_locked_at: DateTime<Utc>,
    }

    let mut rollups: Vec<Rollup> = predictions
        .iter()
        .filter_map(|(owner, owned)| {
            let scored: Vec<_> = owned.iter().filter(|p| p.is_scored()).collect();
            if scored.is_empty() {
                return None;
            }

            let exact_matches: u32 = scored.iter().filter_map(|p| p.score).map(|s| s.exact).sum();
            let total_positions: u32 = scored.iter().filter_map(|p| p.score).map(|s| s.total).sum();
            let first_locked_at = scored
                .iter()
                .map(|p| p.locked_at)
                .min()
                .unwrap_or_else(Utc::now);
            let accuracy = if total_positions == 0 {
                0
            } else {
                (f64::from(exact_matches) / f64::from(total_positions) * 100.0).round() as u32
            };

            Some(Rollup {
                owner: owner.clone(),
                races_scored: scored.len() as u32,
                exact_matches,
                total_positions,
                accuracy,
                first_locked_at,
            })
        })
        .collect();

    rollups.sort_by(|a, b| {
        b.accuracy
            .cmp(&a.accuracy)
            .then_with(|| b.races_scored.cmp(&a.races_scored))
            .then_with(|| a.first_locked_at.cmp(&b.first_locked_at))
            .then_with(|| a.owner.cmp(&b.owner))
    });

    let total_users = rollups.len() as u32;
    let total_pages = total_users.div_ceil(page_size.max(1));

    let entries = rollups
        .into_iter()
        .enumerate()
        .map(|(index, rollup)| LeaderboardEntry {
            owner: rollup.owner,
            races_scored: rollup.races_scored,
            exact_matches: rollup.exact_matches,
            total_positions: rollup.total_positions,
            accuracy: rollup.accuracy,
            rank: index as u32 + 1,
        })
        .skip((page.saturating_sub(1) as usize) * page_size as usize)
        .take(page_size as usize)
        .collect();

    LeaderboardPage {
        entries,
        total_users,
        total_pages,
    }
}
