#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the emergency calls dashboard.
//!
//! Loads the call records CSV once at startup, then serves the dashboard
//! page, the category filter endpoint and the page script. The loaded
//! dataset is immutable and shared read-only across workers.

pub mod config;
mod handlers;
mod page;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use calls_dashboard_calls_models::CallDataset;
use calls_dashboard_ingest::{LoadError, load_calls};
use thiserror::Error;

pub use config::ServerConfig;

/// Shared application state.
pub struct AppState {
    /// Call records loaded at startup.
    pub dataset: Arc<CallDataset>,
}

impl AppState {
    #[must_use]
    pub fn new(dataset: CallDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The dataset could not be loaded.
    #[error("Failed to load call records: {0}")]
    Load(#[from] LoadError),

    /// Binding or running the HTTP server failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Registers the dashboard routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::dashboard))
        .route("/filter", web::post().to(handlers::filter))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/reasons", web::get().to(handlers::reasons)),
        );
}

/// Loads the dataset and runs the HTTP server until it shuts down.
///
/// The dataset is fully loaded before the server binds, so no request ever
/// sees a partial table. This is a regular async function; the caller
/// provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// * [`ServerError::Load`] if the CSV cannot be loaded
/// * [`ServerError::Io`] if the server fails to bind or run
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let loaded = load_calls(&config.data_path)?;
    log::info!(
        "Dataset ready: {} records, {} reasons",
        loaded.dataset.len(),
        loaded.dataset.reasons().len()
    );

    let state = web::Data::new(AppState::new(loaded.dataset));
    let static_dir = config.static_dir.clone();

    log::info!(
        "Starting server on {}:{} (static files from {})",
        config.bind_addr,
        config.port,
        static_dir.display()
    );

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_routes)
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await?;

    Ok(())
}
