use std::sync::Arc;

use pokedex_teams_api::api::{self, AppState};
use pokedex_teams_api::config::AppConfig;
use pokedex_teams_api::domain::team::TeamStore;
use pokedex_teams_api::infrastructure::pokeapi::PokeApiClient;
use pokedex_teams_api::infrastructure::storage::FileStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();
    let config = AppConfig::from_env();

    // Load persisted teams
    let storage = Arc::new(FileStore::new(&config.data_dir));
    tracing::info!("Loading teams from {}", storage.root().display());
    let store = TeamStore::open(storage);

    let catalog = Arc::new(PokeApiClient::new(&config.pokeapi_base_url));
    tracing::info!("Using catalog at {}", catalog.base_url());

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(AppState::new(store, catalog))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
