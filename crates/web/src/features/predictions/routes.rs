use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::handlers::{list_locked_predictions, lock_prediction, unlock_prediction};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locked_predictions))
        .route("/:race_id/lock", post(lock_prediction))
        .route("/:race_id/unlock", post(unlock_prediction))
}
