use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsgauge::backend::BackendClient;
use newsgauge::config::Config;
use newsgauge::routes::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsgauge=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load_or_default("dashboard.toml")?;
    info!(
        "Loaded configuration: backend at {}, {} topics",
        config.backend_url,
        config.topics.len()
    );

    let backend = BackendClient::new(config.backend_url.clone());

    // Create app state
    let state = Arc::new(AppState {
        config,
        backend,
        articles: RwLock::new(Vec::new()),
    });

    // Build router
    let app = Router::new()
        .route("/", get(routes::index))
        .route("/clear", post(routes::clear))
        .route("/fetch", post(routes::fetch))
        .route("/reload", post(routes::reload))
        .route("/analyze", post(routes::analyze))
        .route("/health", get(routes::health))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Dashboard starting on http://localhost:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
