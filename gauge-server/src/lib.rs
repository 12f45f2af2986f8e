//! # Saorsa Gauge Server Library
//!
//! Shared types and functionality for the gauge server.
//! This library is used by both the binary and integration tests.

use axum::routing::{get, post};
use axum::Router;
use gauge_core::GaugeStore;

pub mod config;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod validation;

pub use config::{CliArgs, ServerConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Gauge store holding every configured gauge.
    pub store: GaugeStore,
}

impl AppState {
    /// Create state around an existing store.
    #[must_use]
    pub fn new(store: GaugeStore) -> Self {
        Self { store }
    }

    /// Get a reference to the gauge store.
    #[must_use]
    pub fn store(&self) -> &GaugeStore {
        &self.store
    }
}

/// Build the application router.
///
/// Used by both the binary and the integration test harness so the two
/// always serve the same route table. The `/metrics` endpoint is attached
/// separately by the binary because it carries its own recorder handle.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/health", get(health::readiness)) // Backward compatible
        .route("/gauge/{file}", get(routes::gauge_image))
        .route("/api/gauges", get(routes::list_gauges))
        .route(
            "/api/gauge/{gauge_id}",
            get(routes::get_gauge)
                .put(routes::put_gauge)
                .delete(routes::delete_gauge),
        )
        .route("/api/gauge/{gauge_id}/value", post(routes::set_gauge_value))
        .route("/api/export", post(routes::export_gauge))
        .layer(axum::middleware::from_fn(metrics::track_http))
        .with_state(state)
}
