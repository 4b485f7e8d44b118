use std::sync::Arc;

use engine::models::Season;
use engine::{DraftStore, PredictionStore, SeasonStore};

use crate::error::{WebError, WebResult};
use crate::middleware::auth::ApiKeys;

/// Shared application state: the season's reference data and the three
/// in-memory stores, injected into every handler. No ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub season: Arc<SeasonStore>,
    pub drafts: Arc<DraftStore>,
    pub predictions: Arc<PredictionStore>,
    pub api_keys: Arc<ApiKeys>,
}

impl AppState {
    pub fn new(season: SeasonStore, api_keys: ApiKeys) -> Self {
        Self {
            season: Arc::new(season),
            drafts: Arc::new(DraftStore::new()),
            predictions: Arc::new(PredictionStore::new()),
            api_keys: Arc::new(api_keys),
        }
    }

    /// Requests may name the season explicitly; one process hosts exactly one
    /// season, so any other year is an unknown resource.
    pub fn verify_season(&self, requested: Option<Season>) -> WebResult<()> {
        match requested {
            Some(season) if season != self.season.season() => Err(WebError::NotFound),
            _ => Ok(()),
        }
    }
}
