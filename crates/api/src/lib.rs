//! # ClinicBook API
//!
//! HTTP front of the ClinicBook booking core. Handlers decode typed
//! requests, call [`ClinicService`] and map [`BookingError`] kinds to status
//! codes; no business rule lives in this crate.
//!
//! ## Architecture
//!
//! - **Routes**: endpoint paths grouped by resource
//! - **Handlers**: request decoding and response shaping
//! - **Middleware**: error to response mapping
//! - **Config**: environment-driven server settings
//!
//! [`BookingError`]: clinicbook_core::errors::BookingError

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling middleware
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use clinicbook_core::ClinicService;
use clinicbook_db::PgStore;
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub clinic: ClinicService,
}

impl ApiState {
    pub fn new(clinic: ClinicService) -> Arc<Self> {
        Arc::new(Self { clinic })
    }
}

/// Builds the router with every endpoint and request tracing attached.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::appointments::routes())
        .merge(routes::doctors::routes())
        .merge(routes::specializations::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("Invalid API_CORS_ORIGINS value")?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}

/// Starts the API server over a Postgres-backed clinic.
///
/// Installs the global tracing subscriber, so call it once per process.
pub async fn start_server(config: config::ApiConfig, store: PgStore) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let clinic = ClinicService::new(Arc::new(store), config.booking_config());
    let app = app(ApiState::new(clinic));

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new().layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
