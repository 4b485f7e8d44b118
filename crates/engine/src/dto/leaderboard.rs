use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{LeaderboardEntry, Season};
use crate::services::leaderboard::LeaderboardPage;

#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    /// Season year; must match the hosted season when supplied
    pub season: Option<Season>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

impl LeaderboardQuery {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.page_size < 1 || self.page_size > 100 {
            return Err("page_size must be between 1 and 100".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    pub total_users: u32,
    pub total_pages: u32,
}

impl From<LeaderboardPage> for LeaderboardResponse {
    fn from(page: LeaderboardPage) -> Self {
        Self {
            entries: page.entries,
            total_users: page.total_users,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_defaults_to_first_page_of_fifty() {
        let query: LeaderboardQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 50);
        assert_eq!(query.season, None);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_query_bounds_enforced() {
        let query: LeaderboardQuery =
            serde_json::from_value(json!({"page": 0, "page_size": 50})).unwrap();
        assert!(query.validate().is_err());

        let query: LeaderboardQuery =
            serde_json::from_value(json!({"page": 1, "page_size": 101})).unwrap();
        assert!(query.validate().is_err());
    }
}
