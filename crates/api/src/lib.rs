//! # Where2Tattoo API
//!
//! The API crate provides the web server for the Where2Tattoo marketplace:
//! studio discovery, opening hours, artist rosters, booking availability and
//! booking requests.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Error-to-response mapping
//! - **Config**: Handle environment and application configuration
//!
//! Handlers reach storage only through the repository traits in
//! `where2tattoo_db::store`, so tests can swap in mocks.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use where2tattoo_core::availability::taken::{FailMode, TakenSlotsSource};
use where2tattoo_db::store::{ArtistRepository, BookingRepository, PgStore, StudioRepository};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub studios: Arc<dyn StudioRepository>,
    pub artists: Arc<dyn ArtistRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    /// Source of already-booked start times
    pub taken_slots: Arc<dyn TakenSlotsSource>,
    /// Policy when `taken_slots` cannot be reached
    pub fail_mode: FailMode,
}

impl ApiState {
    /// Backs every repository with the same PostgreSQL store.
    pub fn from_store(store: PgStore, fail_mode: FailMode) -> Self {
        let store = Arc::new(store);
        Self {
            studios: store.clone(),
            artists: store.clone(),
            bookings: store.clone(),
            taken_slots: store,
            fail_mode,
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Studio listing, profiles, opening hours and artists
        .merge(routes::studio::routes())
        // Slot availability
        .merge(routes::availability::routes())
        // Booking requests and status changes
        .merge(routes::booking::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and state
///
/// This function sets up logging, configures routes and middleware,
/// and serves HTTP until the listener fails.
pub async fn start_server(config: config::ApiConfig, state: ApiState) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = app(Arc::new(state));

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| {
                origin
                    .parse()
                    .wrap_err_with(|| format!("Invalid CORS origin '{}'", origin))
            })
            .collect::<Result<Vec<axum::http::HeaderValue>>>()?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(axum::error_handling::HandleErrorLayer::new(
                middleware::error_handling::handle_timeout,
            ))
            .timeout(std::time::Duration::from_secs(config.request_timeout))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Server listening on http://{} (availability fail mode: {:?})",
        addr, config.fail_mode
    );
    axum::serve(listener, app).await?;

    Ok(())
}
