//! # Saorsa Gauge Renderer
//!
//! Turns a [`gauge_core::GaugeSpec`] into pixels and documents.
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────┐    ┌─────────────┐    ┌──────────────────┐
//! │ GaugeSpec │ -> │ SVG string  │ -> │ usvg/resvg pixmap │ -> PNG/JPEG/PDF
//! └───────────┘    └─────────────┘    └──────────────────┘
//! ```
//!
//! SVG is the source of truth; every raster format is produced by
//! rasterizing it, so the band color selected by the scale is the color
//! that reaches the output bytes in every format.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod svg;
pub mod theme;

pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportFormat, GaugeExporter};
pub use svg::render_svg;
pub use theme::GaugeTheme;
