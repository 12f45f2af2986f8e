//! API route handlers.
//!
//! Every handler validates untrusted input before touching the store and
//! returns a `{"success": false, "error": ...}` JSON envelope on failure.

use std::fmt::Write;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use gauge_core::{GaugeDocument, StoreError, DEFAULT_GAUGE};
use gauge_renderer::export::{ExportConfig, ExportFormat, GaugeExporter};
use gauge_renderer::{render_svg, GaugeTheme};

use crate::metrics::{
    record_export, record_render, record_validation_failure, record_value_update, set_store_size,
};
use crate::validation;
use crate::AppState;

/// Body for `POST /api/gauge/{gauge_id}/value`.
#[derive(Debug, Deserialize)]
pub struct ValueUpdate {
    /// New reading value, inside the gauge's threshold domain.
    pub value: f64,
}

/// Body for `POST /api/export`.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Gauge to export.
    pub gauge_id: String,
    /// Output format: png, jpeg, svg, or pdf.
    pub format: String,
    /// Optional output width override in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Optional output height override in pixels.
    #[serde(default)]
    pub height: Option<u32>,
    /// Optional scale factor (e.g. 2.0 for retina).
    #[serde(default)]
    pub scale: Option<f64>,
    /// Optional JPEG quality (1-100).
    #[serde(default)]
    pub quality: Option<u8>,
}

/// JSON error envelope shared by all handlers.
fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "success": false,
            "error": message.into(),
        })),
    )
        .into_response()
}

/// Map a store failure onto the right HTTP status.
fn store_error_response(err: &StoreError) -> Response {
    let status = match err {
        StoreError::GaugeNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::InvalidSpec(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}

/// `GET /` - HTML index embedding the default gauge.
#[tracing::instrument(name = "index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Response {
    let Some(spec) = state.store.get(DEFAULT_GAUGE) else {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "default gauge missing");
    };

    let svg = match render_svg(&spec, &GaugeTheme::default()) {
        Ok(svg) => svg,
        Err(e) => return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    record_render("html");

    let mut items = String::new();
    for id in state.store.gauge_ids() {
        // Ids are admission-validated to [A-Za-z0-9_-], safe to embed
        let _ = write!(items, "<li><a href=\"/gauge/{id}.svg\">{id}</a></li>");
    }

    let page = format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>Saorsa Gauge</title></head>\
         <body>{svg}<ul>{items}</ul></body></html>"
    );
    Html(page).into_response()
}

/// `GET /gauge/{file}` - rendered gauge image, e.g. `/gauge/default.svg`.
///
/// The extension selects the output format (svg, png, jpeg, pdf).
#[tracing::instrument(name = "gauge_image", skip(state))]
pub async fn gauge_image(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    let Some((gauge_id, ext)) = file.rsplit_once('.') else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "expected <gauge_id>.<format>, e.g. default.svg",
        );
    };

    if let Err(e) = validation::validate_gauge_id(gauge_id) {
        record_validation_failure("gauge_id");
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    let format = match ext.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let Some(spec) = state.store.get(gauge_id) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("gauge '{gauge_id}' not found"),
        );
    };

    let exporter = GaugeExporter::with_defaults();
    match exporter.export(&spec, format) {
        Ok(bytes) => {
            record_render(format.extension());
            ([(header::CONTENT_TYPE, format.content_type())], bytes).into_response()
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// `GET /api/gauges` - sorted list of gauge ids.
#[tracing::instrument(name = "list_gauges", skip(state))]
pub async fn list_gauges(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "gauges": state.store.gauge_ids(),
    }))
}

/// `GET /api/gauge/{gauge_id}` - canonical document for one gauge.
#[tracing::instrument(name = "get_gauge", skip(state))]
pub async fn get_gauge(State(state): State<AppState>, Path(gauge_id): Path<String>) -> Response {
    if let Err(e) = validation::validate_gauge_id(&gauge_id) {
        record_validation_failure("gauge_id");
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    match state.store.document(&gauge_id) {
        Some(doc) => Json(doc).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("gauge '{gauge_id}' not found"),
        ),
    }
}

/// `PUT /api/gauge/{gauge_id}` - create or replace a gauge from a document.
#[tracing::instrument(name = "put_gauge", skip(state, document))]
pub async fn put_gauge(
    State(state): State<AppState>,
    Path(gauge_id): Path<String>,
    Json(document): Json<GaugeDocument>,
) -> Response {
    if let Err(e) = validation::validate_gauge_id(&gauge_id) {
        record_validation_failure("gauge_id");
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }
    if let Err(e) = validation::validate_label(&document.data.label) {
        record_validation_failure("label");
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }
    if let Err(e) = validation::validate_units(&document.units) {
        record_validation_failure("units");
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }
    if let Err(e) = validation::validate_dimension(document.size.height)
        .and_then(|()| document.size.width.map_or(Ok(()), validation::validate_dimension))
    {
        record_validation_failure("size");
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    let spec = match document.into_spec() {
        Ok(spec) => spec,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    match state.store.replace(&gauge_id, spec) {
        Ok(()) => {
            set_store_size(state.store.gauge_ids().len());
            tracing::info!("Gauge '{}' replaced", gauge_id);
            Json(serde_json::json!({
                "success": true,
                "gauge": state.store.document(&gauge_id),
            }))
            .into_response()
        }
        Err(e) => store_error_response(&e),
    }
}

/// `DELETE /api/gauge/{gauge_id}` - remove a gauge and its persisted file.
#[tracing::instrument(name = "delete_gauge", skip(state))]
pub async fn delete_gauge(
    State(state): State<AppState>,
    Path(gauge_id): Path<String>,
) -> Response {
    if let Err(e) = validation::validate_gauge_id(&gauge_id) {
        record_validation_failure("gauge_id");
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    match state.store.remove(&gauge_id) {
        Ok(()) => {
            set_store_size(state.store.gauge_ids().len());
            tracing::info!("Gauge '{}' removed", gauge_id);
            Json(serde_json::json!({ "success": true })).into_response()
        }
        Err(e) => store_error_response(&e),
    }
}

/// `POST /api/gauge/{gauge_id}/value` - update a gauge's reading.
///
/// Responds with the color band the new value falls into.
#[tracing::instrument(name = "set_gauge_value", skip(state))]
pub async fn set_gauge_value(
    State(state): State<AppState>,
    Path(gauge_id): Path<String>,
    Json(update): Json<ValueUpdate>,
) -> Response {
    if let Err(e) = validation::validate_gauge_id(&gauge_id) {
        record_validation_failure("gauge_id");
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    if let Err(e) = state.store.set_value(&gauge_id, update.value) {
        return store_error_response(&e);
    }
    record_value_update();

    let Some(spec) = state.store.get(&gauge_id) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("gauge '{gauge_id}' not found"),
        );
    };
    Json(serde_json::json!({
        "success": true,
        "gauge_id": gauge_id,
        "value": spec.reading.value,
        "color": spec.color().to_string(),
    }))
    .into_response()
}

/// `POST /api/export` - render a gauge with explicit output options.
#[tracing::instrument(name = "export_gauge", skip(state, request), fields(gauge_id = %request.gauge_id, format = %request.format))]
pub async fn export_gauge(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Response {
    if let Err(e) = validation::validate_gauge_id(&request.gauge_id) {
        record_validation_failure("gauge_id");
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    let format = match request.format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let Some(spec) = state.store.get(&request.gauge_id) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("gauge '{}' not found", request.gauge_id),
        );
    };

    // Bound the raster work before any pixels are allocated
    let (spec_w, spec_h) = spec.pixel_size();
    let width = request.width.unwrap_or(spec_w);
    let height = request.height.unwrap_or(spec_h);
    let scale = request.scale.unwrap_or(1.0);
    if let Err(e) = validation::validate_render_size(width, height, scale) {
        record_validation_failure("render_size");
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }
    let quality = request.quality.unwrap_or(85);
    if let Err(e) = validation::validate_quality(quality) {
        record_validation_failure("quality");
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    let exporter = GaugeExporter::new(ExportConfig {
        width: Some(width),
        height: Some(height),
        scale,
        jpeg_quality: quality,
        ..Default::default()
    });

    match exporter.export(&spec, format) {
        Ok(bytes) => {
            record_export(format.extension(), true);
            ([(header::CONTENT_TYPE, format.content_type())], bytes).into_response()
        }
        Err(e) => {
            record_export(format.extension(), false);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
