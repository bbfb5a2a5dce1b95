// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod state;

use axum::{
    routing::{delete, get, post},
    Router,
};

use handlers::{health, pokemon, teams};
pub use state::AppState;

/// Builds the application router without middleware layers
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Catalog routes
        .route("/api/pokemon", get(pokemon::list_pokemon))
        .route("/api/pokemon/:name", get(pokemon::get_pokemon))
        // Team routes
        .route("/api/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/api/teams/current",
            get(teams::get_current_team).put(teams::set_current_team),
        )
        .route("/api/teams/:id", get(teams::get_team).delete(teams::delete_team))
        .route("/api/teams/:id/stats", get(teams::get_team_stats))
        .route("/api/teams/:id/pokemon", post(teams::add_pokemon))
        .route(
            "/api/teams/:id/pokemon/:pokemon_id",
            delete(teams::remove_pokemon),
        )
        .route(
            "/api/teams/:id/pokemon/:pokemon_id/availability",
            get(teams::pokemon_availability),
        )
        .with_state(state)
}
