//! HostelHerald API server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use herald_common::config::AppConfig;
use herald_common::db::create_pool;
use herald_notifier::{
    DeliveryDispatcher, DeliveryTransport, LogOnlyTransport, PushGatewayTransport,
};

use herald_api::routes::create_router;
use herald_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("herald_api=debug,herald_engine=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting HostelHerald API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Create database connection pool
    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    tracing::info!("Database pool created");

    // Run migrations
    sqlx::migrate!("../../migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    // Wire up the push transport
    let transport: Arc<dyn DeliveryTransport> = match &config.push_gateway_url {
        Some(url) => {
            tracing::info!(gateway = %url, "Push gateway transport enabled");
            Arc::new(PushGatewayTransport::new(
                url.clone(),
                config.push_gateway_key.clone(),
            ))
        }
        None => {
            tracing::warn!("PUSH_GATEWAY_URL not set, delivery attempts will be logged only");
            Arc::new(LogOnlyTransport)
        }
    };
    let dispatcher = DeliveryDispatcher::new(transport);

    // Build application state
    let state = AppState::new(pool, dispatcher, config);

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
