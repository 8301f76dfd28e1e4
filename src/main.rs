use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use volleytrack::{
    api, AppConfig, AppState, GameRepository, InMemoryGameRepository, JsonFileGameRepository,
    TrackerService,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "volleytrack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    info!(
        game_id = %config.game_id,
        game_name = %config.game_name,
        "Starting volleyball shot tracker"
    );

    // Device-local files when a data directory is configured, otherwise a
    // shared in-memory store
    let repository: Arc<dyn GameRepository> = match &config.data_dir {
        Some(dir) => {
            info!(data_dir = %dir.display(), "Using JSON file storage");
            Arc::new(JsonFileGameRepository::new(dir.clone()))
        }
        None => {
            info!("Using in-memory storage");
            Arc::new(InMemoryGameRepository::new())
        }
    };

    let tracker =
        Arc::new(TrackerService::load(repository, &config.game_id, &config.game_name).await);
    let _listener = tracker.spawn_remote_listener();

    let app = api::router(AppState::new(tracker))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(bind_addr = %config.bind_addr, "Server running");
    axum::serve(listener, app).await
}
