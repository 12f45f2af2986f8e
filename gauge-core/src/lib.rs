//! # Saorsa Gauge Core
//!
//! Data model for a threshold-banded gauge: a single labeled percentage
//! reading mapped onto a semicircular arc whose color is selected by a
//! fixed list of ascending threshold boundaries.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 gauge-core                  │
//! ├──────────────────────┬──────────────────────┤
//! │  Reading             │  BandScale           │
//! │  - label             │  - threshold bands   │
//! │  - value             │  - value → color     │
//! ├──────────────────────┼──────────────────────┤
//! │  GaugeSpec           │  GaugeStore          │
//! │  - reading + scale   │  - named gauges      │
//! │  - size, units       │  - JSON persistence  │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! Rendering lives in `gauge-renderer`; this crate owns the semantics,
//! most importantly the band-selection contract: a value belongs to the
//! first band whose upper boundary is strictly greater than it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod arc;
pub mod color;
pub mod error;
pub mod reading;
pub mod scale;
pub mod schema;
pub mod spec;
pub mod store;

pub use color::Color;
pub use error::{GaugeError, GaugeResult};
pub use reading::Reading;
pub use scale::{Band, BandScale, MAX_BANDS};
pub use schema::GaugeDocument;
pub use spec::{GaugeSize, GaugeSpec};
pub use store::{GaugeStore, StoreError, DEFAULT_GAUGE};

/// Gauge core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
