use anyhow::Context;
use axum::{Json, routing::get};
use engine::SeasonStore;
use engine::models::SeasonData;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::races::handlers::list_races,
        features::races::handlers::submit_official_result,
        features::races::handlers::set_grid_slot,
        features::races::handlers::clear_grid_slot,
        features::races::handlers::get_grid,
        features::predictions::handlers::lock_prediction,
        features::predictions::handlers::unlock_prediction,
        features::predictions::handlers::list_locked_predictions,
        features::standings::handlers::get_standings,
        features::leaderboard::handlers::get_leaderboard,
    ),
    components(
        schemas(
            engine::dto::prediction::LockPredictionRequest,
            engine::dto::prediction::LockResponse,
            engine::dto::prediction::UnlockPredictionRequest,
            engine::dto::prediction::UnlockResponse,
            engine::dto::prediction::LockedPredictionResponse,
            engine::dto::grid::SetGridSlotRequest,
            engine::dto::grid::OfficialResultRow,
            engine::dto::grid::OfficialResultRequest,
            engine::dto::grid::OfficialResultResponse,
            engine::dto::leaderboard::LeaderboardResponse,
            engine::models::Race,
            engine::models::GridPosition,
            engine::models::PredictedPosition,
            engine::models::PredictionScore,
            engine::models::BreakdownEntry,
            engine::models::LeaderboardEntry,
            engine::models::Standings,
            engine::models::DriverStanding,
            engine::models::TeamStanding,
            engine::models::DriverHistory,
            engine::models::TeamHistory,
            engine::models::HistoryPoint,
            engine::models::PointsSystem,
            engine::models::RaceKind,
            engine::models::Driver,
            engine::models::Team,
            engine::models::IdentitySwap,
            engine::models::DriverId,
            engine::models::TeamId,
            engine::models::RaceId,
            engine::models::PointsSystemId,
            engine::models::Owner,
        )
    ),
    tags(
        (name = "races", description = "Race calendar, draft grid edits, and official results"),
        (name = "predictions", description = "Lock, unlock, and fetch race predictions"),
        (name = "standings", description = "Derived driver and team standings"),
        (name = "leaderboard", description = "Cross-user season leaderboard"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting prediction engine API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let season_json = match &config.season_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read season file {path}"))?,
        None => include_str!("../data/season.json").to_string(),
    };
    let season_data: SeasonData =
        serde_json::from_str(&season_json).context("Failed to parse season reference data")?;
    let season = SeasonStore::new(season_data).context("Invalid season reference data")?;
    tracing::info!(season = season.season(), "Season reference data loaded");

    let state = AppState::new(season, ApiKeys::from_comma_separated(&config.api_keys));

    let app = routes::router(state)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }));

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "OpenAPI document available at http://{}/api-docs/openapi.json",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
