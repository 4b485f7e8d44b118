use axum::Router;
use tower_http::cors::CorsLayer;

use crate::features;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/races", features::races::routes::routes(state.clone()))
        .nest("/api/predictions", features::predictions::routes::routes())
        .nest("/api/standings", features::standings::routes::routes())
        .nest("/api/leaderboard", features::leaderboard::routes::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
