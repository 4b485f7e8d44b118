use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::get_standings;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_standings))
}
