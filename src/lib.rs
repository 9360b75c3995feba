use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod routes;

use provider::StatsClient;

/// Shared, read-only handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub stats: StatsClient,
}

impl AppState {
    pub fn new(stats: StatsClient) -> Self {
        Self { stats }
    }
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(routes::health::index))
        .route("/health", get(routes::health::health_check))

        // Game endpoints
        .route("/getgameteams", get(routes::games::get_game_teams))
        .route("/getgamecoaches", get(routes::games::get_game_coaches))
        .route("/findlastscorer", get(routes::games::find_last_scorer))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
