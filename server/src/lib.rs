//! Shopping-list REST backend.
//!
//! # Overview
//! Four item endpoints over a document store, plus a health probe:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/items` | 200, items newest first |
//! | POST | `/items` | 201, created item |
//! | PUT | `/items/{id}` | 200, updated item |
//! | DELETE | `/items/{id}` | 200, confirmation |
//! | GET | `/health` | 200 |
//!
//! # Design
//! - Handlers hand raw JSON to [`ItemService`], which validates before any
//!   store call and reads the [`Clock`] once per mutation.
//! - [`ItemStore`] is the persistence seam; `memory://` and SQLite backends
//!   are selected by `DATABASE_URL`.
//! - Every failure becomes a JSON `{"error": ...}` body; store faults and
//!   handler panics are logged and reported as a generic 500.

use std::io;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, put},
    Router,
};
use thiserror::Error;
use tokio::{net::TcpListener, signal};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub mod clock;
pub mod config;
pub mod error;
pub mod item;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod validation;

pub use clock::{Clock, SteppingClock, SystemClock};
pub use config::Config;
pub use error::ServiceError;
pub use item::Item;
pub use service::ItemService;
pub use state::AppState;
pub use store::{ItemStore, MemoryStore, SqliteStore, StoreError};

use config::{ConfigError, ALLOWED_ORIGINS};
use routes::{
    create_item, delete_item, handle_panic, health, list_items, route_not_found, update_item,
};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot open item store: {0}")]
    Store(#[from] StoreError),

    #[error("server io: {0}")]
    Io(#[from] io::Error),
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", put(update_item).delete(delete_item))
        .route("/health", get(health))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), io::Error> {
    axum::serve(listener, app(state)).await
}

/// Opens the store, binds `127.0.0.1:<port>` and serves until Ctrl+C or
/// SIGTERM.
pub async fn start_server(config: Config) -> Result<(), StartupError> {
    info!("Opening item store at {}", config.database_url);
    let state = AppState::from_config(&config)?;

    let address = format!("127.0.0.1:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Shopping list API listening on http://{address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
