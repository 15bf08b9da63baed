//! HTTP API server

use axum::{
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{require_auth, TokenService};
use crate::config::Config;
use crate::error::Result;
use crate::store::{MemoryShiftStore, MemoryUserStore, PostgresStore, ShiftStore, UserStore};

use super::{login, shifts, users};

/// Application state shared across handlers. Read-only after startup.
pub struct AppState {
    pub tokens: TokenService,
    pub users: Arc<dyn UserStore>,
    pub shifts: Arc<dyn ShiftStore>,
}

impl AppState {
    pub fn new(tokens: TokenService, users: Arc<dyn UserStore>, shifts: Arc<dyn ShiftStore>) -> Self {
        Self { tokens, users, shifts }
    }
}

pub type SharedState = Arc<AppState>;

/// Build state from configuration, connecting to PostgreSQL when a URL is set
pub async fn build_state(config: &Config) -> Result<SharedState> {
    let tokens = TokenService::new(&config.auth);

    let state = match &config.database.url {
        Some(url) => {
            let store = Arc::new(PostgresStore::connect(url).await?);
            store.migrate().await?;
            tracing::info!("Connected to PostgreSQL");
            AppState::new(tokens, store.clone(), store)
        }
        None => {
            tracing::warn!("No database configured, serving empty in-memory user and shift stores");
            AppState::new(tokens, Arc::new(MemoryUserStore::new()), Arc::new(MemoryShiftStore::new()))
        }
    };

    Ok(Arc::new(state))
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = build_state(&config).await?;

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    serve(listener, state).await
}

/// Serve the API on an already bound listener until ctrl-c
pub async fn serve(listener: TcpListener, state: SharedState) -> Result<()> {
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    // The guard only wraps routes in this group
    let authenticated = Router::new()
        .route("/users/me", get(users::get_me))
        .route("/shifts", get(shifts::get_shifts).post(shifts::create_shift))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(login::login))
        .route("/users", get(users::get_users))
        .route("/users/", get(users::get_users))
        .route("/users/{id}", get(users::get_user))
        .merge(authenticated)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
