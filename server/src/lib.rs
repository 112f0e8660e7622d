//! Wishlist Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and SQLite implementations
//! - commands: HTTP command handlers

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header::CONTENT_TYPE, HeaderName, Method};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod domain;
pub mod repository;
pub mod commands;
pub mod config;

use config::ServerConfig;
use repository::{init_db, DbState, ListItemRepository, WishListRepository, WishRepository};

/// Application state shared across commands
#[derive(Clone)]
pub struct AppState {
    pub wishes: Arc<WishRepository>,
    pub lists: Arc<WishListRepository>,
    pub items: Arc<ListItemRepository>,
}

impl AppState {
    pub fn new(db: &DbState) -> Self {
        Self {
            wishes: Arc::new(WishRepository::new(db.connection())),
            lists: Arc::new(WishListRepository::new(db.connection())),
            items: Arc::new(ListItemRepository::new(db.connection())),
        }
    }
}

/// Router with CORS and request tracing layers
pub fn app(state: AppState) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(commands::USER_HEADER)])
        .max_age(Duration::from_secs(60 * 60));

    commands::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Open the database and serve until Ctrl-C
pub async fn run(config: ServerConfig) -> Result<(), String> {
    let db = init_db(&config.db_path).await?;
    let state = AppState::new(&db);

    let address = config.address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", address, e))?;
    log::info!("Server running on {}", address);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    log::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
