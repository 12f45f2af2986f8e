//! Prometheus metrics for gauge-server.
//!
//! Provides metrics collection, an HTTP tracking middleware, and the
//! recorder handle behind the Prometheus-compatible `/metrics` endpoint.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

// Metric names as constants for consistency
const HTTP_REQUESTS_TOTAL: &str = "gauge_http_requests_total";
const HTTP_REQUEST_DURATION: &str = "gauge_http_request_duration_seconds";
const RENDERS_TOTAL: &str = "gauge_renders_total";
const EXPORTS_TOTAL: &str = "gauge_exports_total";
const VALUE_UPDATES_TOTAL: &str = "gauge_value_updates_total";
const VALIDATION_FAILURES_TOTAL: &str = "gauge_validation_failures_total";
const STORE_SIZE: &str = "gauge_store_size";

/// Initialize metrics and return the Prometheus handle.
///
/// # Errors
///
/// Returns an error if the Prometheus recorder cannot be installed
/// (e.g., if another recorder is already installed).
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Axum middleware that records request count and latency per route.
///
/// Uses the matched route template (`/api/gauge/{gauge_id}`) rather than
/// the raw path so gauge ids don't explode label cardinality.
pub async fn track_http(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.extensions().get::<MatchedPath>().map_or_else(
        || req.uri().path().to_string(),
        |p| p.as_str().to_string(),
    );

    let start = Instant::now();
    let response = next.run(req).await;
    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );
    response
}

/// Record an HTTP request.
///
/// # Arguments
///
/// * `method` - HTTP method (GET, POST, etc.)
/// * `path` - Matched route template
/// * `status` - HTTP status code
/// * `duration_secs` - Request duration in seconds
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        HTTP_REQUEST_DURATION,
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

/// Record a gauge render.
///
/// # Arguments
///
/// * `format` - Output format (png, jpeg, svg, pdf, html)
pub fn record_render(format: &str) {
    counter!(
        RENDERS_TOTAL,
        "format" => format.to_string()
    )
    .increment(1);
}

/// Record an export request.
///
/// # Arguments
///
/// * `format` - Output format requested
/// * `success` - Whether the export succeeded
pub fn record_export(format: &str, success: bool) {
    counter!(
        EXPORTS_TOTAL,
        "format" => format.to_string(),
        "success" => success.to_string()
    )
    .increment(1);
}

/// Record a gauge value update.
pub fn record_value_update() {
    counter!(VALUE_UPDATES_TOTAL).increment(1);
}

/// Record an input validation failure.
///
/// # Arguments
///
/// * `validation_type` - Type of validation that failed (gauge_id, label, render_size, etc.)
pub fn record_validation_failure(validation_type: &str) {
    counter!(
        VALIDATION_FAILURES_TOTAL,
        "type" => validation_type.to_string()
    )
    .increment(1);
}

/// Update the stored gauge count.
#[allow(clippy::cast_precision_loss)]
pub fn set_store_size(count: usize) {
    gauge!(STORE_SIZE).set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    // The metrics macros are no-ops without an installed recorder, so the
    // record functions must not panic when called bare.

    #[test]
    fn test_record_functions_without_recorder() {
        record_http_request("GET", "/api/gauges", 200, 0.001);
        record_render("svg");
        record_export("png", true);
        record_export("pdf", false);
        record_value_update();
        record_validation_failure("gauge_id");
        set_store_size(3);
    }
}
