use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::middleware::auth::require_api_key;
use crate::state::AppState;

use super::handlers::{
    clear_grid_slot, get_grid, list_races, set_grid_slot, submit_official_result,
};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_races))
        .route("/:race_id/grid", put(set_grid_slot).get(get_grid))
        .route("/:race_id/grid/:position", delete(clear_grid_slot))
        .route(
            "/:race_id/result",
            post(submit_official_result)
                .route_layer(middleware::from_fn_with_state(state, require_api_key)),
        )
}
