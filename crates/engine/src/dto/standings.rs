use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for the standings projection
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StandingsQuery {
    /// Owner whose draft predictions feed the full view; omit for the
    /// official-only picture
    pub owner: Option<String>,
    /// Points system id; defaults to the season's configured system
    pub points_system: Option<String>,
}
