//! Binge Club API Server

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api=debug".parse()?)
                .add_directive("engine=debug".parse()?),
        )
        .init();

    info!("🍿 Starting Binge Club API");

    // Load configuration
    let config = common::Config::from_env();

    // Connect to database
    let pool = db::create_pool(&config.database_url).await?;

    // Run migrations
    db::run_migrations(&pool).await?;

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), pool));

    // Build router with state
    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/users", post(routes::users::register))
        .route("/api/users/:id/profile", get(routes::users::profile))
        .route("/api/checkin", post(routes::checkin::check_in))
        .route("/api/notifications", get(routes::notifications::list))
        .route(
            "/api/notifications/unread-count",
            get(routes::notifications::unread_count),
        )
        .route(
            "/api/notifications/read-all",
            post(routes::notifications::mark_all_read),
        )
        .route(
            "/api/notifications/:id/read",
            post(routes::notifications::mark_read),
        )
        .route(
            "/api/notifications/:id",
            delete(routes::notifications::delete),
        )
        .route("/api/events", post(routes::events::ingest))
        .route("/api/admin/broadcast", post(routes::admin::broadcast))
        .route("/api/ws", get(routes::ws::upgrade))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("🚀 Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
