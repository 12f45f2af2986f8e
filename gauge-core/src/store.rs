//! Shared gauge storage for multi-handler access.
//!
//! Provides a thread-safe [`GaugeStore`] that can be shared across HTTP
//! routes for consistent gauge state, with optional JSON persistence so
//! configured gauges survive a restart.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::schema::GaugeDocument;
use crate::spec::GaugeSpec;

/// Default gauge identifier.
pub const DEFAULT_GAUGE: &str = "default";

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested gauge does not exist.
    #[error("Gauge not found: {0}")]
    GaugeNotFound(String),
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// A gauge failed its admission invariants.
    #[error("Invalid gauge: {0}")]
    InvalidSpec(String),
    /// The store has no data directory configured.
    #[error("No data directory configured")]
    NoDataDir,
}

/// Thread-safe gauge storage shared across HTTP handlers.
///
/// # Example
///
/// ```
/// use gauge_core::store::{GaugeStore, DEFAULT_GAUGE};
///
/// let store = GaugeStore::new();
/// store.set_value(DEFAULT_GAUGE, 42.0).unwrap();
/// assert!((store.get(DEFAULT_GAUGE).unwrap().reading.value - 42.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GaugeStore {
    gauges: Arc<RwLock<HashMap<String, GaugeSpec>>>,
    /// Optional data directory for filesystem persistence.
    data_dir: Option<PathBuf>,
}

impl GaugeStore {
    /// Create a new store holding the default gauge (no persistence).
    #[must_use]
    pub fn new() -> Self {
        let mut gauges = HashMap::new();
        gauges.insert(DEFAULT_GAUGE.to_string(), GaugeSpec::default());
        Self {
            gauges: Arc::new(RwLock::new(gauges)),
            data_dir: None,
        }
    }

    /// Create a store with filesystem persistence.
    ///
    /// Gauges are saved as JSON documents in `data_dir`. The directory is
    /// created if it doesn't exist; previously persisted gauges are not
    /// loaded until [`GaugeStore::load_all_gauges`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        let mut gauges = HashMap::new();
        gauges.insert(DEFAULT_GAUGE.to_string(), GaugeSpec::default());
        Ok(Self {
            gauges: Arc::new(RwLock::new(gauges)),
            data_dir: Some(data_dir),
        })
    }

    /// Get a gauge by id if it exists.
    #[must_use]
    pub fn get(&self, gauge_id: &str) -> Option<GaugeSpec> {
        let gauges = self
            .gauges
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        gauges.get(gauge_id).cloned()
    }

    /// Get or create a gauge for the given id.
    ///
    /// If the gauge does not exist, a default gauge is created in memory.
    #[must_use]
    pub fn get_or_create(&self, gauge_id: &str) -> GaugeSpec {
        let mut gauges = self
            .gauges
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        gauges
            .entry(gauge_id.to_string())
            .or_insert_with(GaugeSpec::default)
            .clone()
    }

    /// Replace a gauge, creating the id if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSpec`] if the gauge fails validation.
    pub fn replace(&self, gauge_id: &str, spec: GaugeSpec) -> Result<(), StoreError> {
        spec.validate()
            .map_err(|e| StoreError::InvalidSpec(e.to_string()))?;
        {
            let mut gauges = self
                .gauges
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            gauges.insert(gauge_id.to_string(), spec);
        }
        self.persist_gauge(gauge_id);
        Ok(())
    }

    /// Update a gauge using a closure.
    ///
    /// The update is applied to a copy and only committed if the result
    /// still passes validation, so the store never holds an invalid gauge.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GaugeNotFound`] if the gauge does not exist,
    /// or [`StoreError::InvalidSpec`] if the update breaks validation.
    pub fn update<F>(&self, gauge_id: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut GaugeSpec),
    {
        {
            let mut gauges = self
                .gauges
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let spec = gauges
                .get_mut(gauge_id)
                .ok_or_else(|| StoreError::GaugeNotFound(gauge_id.to_string()))?;
            let mut candidate = spec.clone();
            f(&mut candidate);
            candidate
                .validate()
                .map_err(|e| StoreError::InvalidSpec(e.to_string()))?;
            *spec = candidate;
        }
        self.persist_gauge(gauge_id);
        Ok(())
    }

    /// Set a gauge's reading value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GaugeNotFound`] if the gauge does not exist,
    /// or [`StoreError::InvalidSpec`] if the value is outside the gauge's
    /// threshold domain.
    pub fn set_value(&self, gauge_id: &str, value: f64) -> Result<(), StoreError> {
        self.update(gauge_id, |spec| {
            spec.reading.value = value;
        })
    }

    /// Get the canonical document representation of a gauge.
    #[must_use]
    pub fn document(&self, gauge_id: &str) -> Option<GaugeDocument> {
        self.get(gauge_id).map(|spec| GaugeDocument::from_spec(&spec))
    }

    /// Get a sorted list of all gauge ids.
    #[must_use]
    pub fn gauge_ids(&self) -> Vec<String> {
        let gauges = self
            .gauges
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut ids: Vec<String> = gauges.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Remove a gauge from the store and delete its persisted file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GaugeNotFound`] if the gauge does not exist.
    pub fn remove(&self, gauge_id: &str) -> Result<(), StoreError> {
        {
            let mut gauges = self
                .gauges
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            gauges
                .remove(gauge_id)
                .ok_or_else(|| StoreError::GaugeNotFound(gauge_id.to_string()))?;
        }
        self.delete_gauge_file(gauge_id);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Save a gauge to disk as a JSON document.
    ///
    /// No-op if the store was created without a data directory.
    fn persist_gauge(&self, gauge_id: &str) {
        let Some(ref data_dir) = self.data_dir else {
            return;
        };
        let Some(doc) = self.document(gauge_id) else {
            return;
        };
        let json = match serde_json::to_string_pretty(&doc) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!("Failed to serialize gauge {gauge_id}: {e}");
                return;
            }
        };
        let path = data_dir.join(format!("{}.json", sanitize_filename(gauge_id)));
        if let Err(e) = std::fs::write(&path, json) {
            tracing::warn!(
                "Failed to persist gauge {gauge_id} to {}: {e}",
                path.display()
            );
        }
    }

    /// Load a single gauge from disk into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, can't be parsed, or
    /// describes an invalid gauge.
    pub fn load_gauge_from_disk(&self, gauge_id: &str) -> Result<(), StoreError> {
        let data_dir = self.data_dir.as_ref().ok_or(StoreError::NoDataDir)?;
        let path = data_dir.join(format!("{}.json", sanitize_filename(gauge_id)));
        let contents = std::fs::read_to_string(&path)?;
        let doc: GaugeDocument = serde_json::from_str(&contents)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let spec = doc
            .into_spec()
            .map_err(|e| StoreError::InvalidSpec(e.to_string()))?;

        let mut gauges = self
            .gauges
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        gauges.insert(gauge_id.to_string(), spec);
        Ok(())
    }

    /// Discover and load all persisted gauges from the data directory.
    ///
    /// Files that fail to parse are skipped with a warning so one corrupt
    /// document cannot block startup. Returns the ids that were loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory can't be read.
    pub fn load_all_gauges(&self) -> Result<Vec<String>, StoreError> {
        let data_dir = self.data_dir.as_ref().ok_or(StoreError::NoDataDir)?;
        let mut loaded = Vec::new();
        for entry in std::fs::read_dir(data_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    match self.load_gauge_from_disk(stem) {
                        Ok(()) => loaded.push(stem.to_string()),
                        Err(e) => {
                            tracing::warn!("Skipping gauge file {}: {e}", path.display());
                        }
                    }
                }
            }
        }
        Ok(loaded)
    }

    /// Remove a gauge's persisted file from disk.
    ///
    /// No-op if the store has no data directory or the file doesn't exist.
    pub fn delete_gauge_file(&self, gauge_id: &str) {
        let Some(ref data_dir) = self.data_dir else {
            return;
        };
        let path = data_dir.join(format!("{}.json", sanitize_filename(gauge_id)));
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!("Failed to delete gauge file {}: {e}", path.display());
            }
        }
    }
}

/// Sanitize a gauge id for use as a filename.
///
/// Replaces any character that is not alphanumeric, `-`, or `_` with `_`.
fn sanitize_filename(gauge_id: &str) -> String {
    gauge_id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::reading::Reading;
    use crate::scale::BandScale;

    #[test]
    fn test_new_creates_default_gauge() {
        let store = GaugeStore::new();
        let ids = store.gauge_ids();
        assert!(ids.contains(&DEFAULT_GAUGE.to_string()));

        let spec = store.get(DEFAULT_GAUGE).expect("default exists");
        assert_eq!(spec.reading.label, "Accuracy");
    }

    #[test]
    fn test_get_nonexistent_returns_none() {
        let store = GaugeStore::new();
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_get_or_create_new_gauge() {
        let store = GaugeStore::new();
        let spec = store.get_or_create("cpu");
        assert_eq!(spec, GaugeSpec::default());
        assert!(store.gauge_ids().contains(&"cpu".to_string()));
    }

    #[test]
    fn test_replace_gauge() {
        let store = GaugeStore::new();
        let spec = GaugeSpec::new(Reading::new("Memory", 40.0), BandScale::default());
        store.replace("memory", spec).expect("replace");

        let stored = store.get("memory").expect("exists");
        assert_eq!(stored.reading.label, "Memory");
        assert_eq!(stored.color(), Color::ORANGE);
    }

    #[test]
    fn test_replace_rejects_invalid_spec() {
        let store = GaugeStore::new();
        let spec = GaugeSpec::default().with_value(500.0);
        assert!(matches!(
            store.replace("bad", spec),
            Err(StoreError::InvalidSpec(_))
        ));
        assert!(store.get("bad").is_none());
    }

    #[test]
    fn test_set_value() {
        let store = GaugeStore::new();
        store.set_value(DEFAULT_GAUGE, 25.0).expect("set");
        let spec = store.get(DEFAULT_GAUGE).expect("exists");
        assert!((spec.reading.value - 25.0).abs() < f64::EPSILON);
        assert_eq!(spec.color(), Color::RED);
    }

    #[test]
    fn test_set_value_nonexistent_fails() {
        let store = GaugeStore::new();
        assert!(matches!(
            store.set_value("nonexistent", 10.0),
            Err(StoreError::GaugeNotFound(_))
        ));
    }

    #[test]
    fn test_update_keeping_store_valid() {
        let store = GaugeStore::new();

        // An update that breaks the domain invariant is rejected in full
        let result = store.update(DEFAULT_GAUGE, |spec| {
            spec.reading.value = -50.0;
        });
        assert!(matches!(result, Err(StoreError::InvalidSpec(_))));

        // The stored gauge is untouched
        let spec = store.get(DEFAULT_GAUGE).expect("exists");
        assert!((spec.reading.value - 86.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remove_gauge() {
        let store = GaugeStore::new();
        let _ = store.get_or_create("temp");
        store.remove("temp").expect("remove");
        assert!(store.get("temp").is_none());

        assert!(matches!(
            store.remove("temp"),
            Err(StoreError::GaugeNotFound(_))
        ));
    }

    #[test]
    fn test_document_reflects_spec() {
        let store = GaugeStore::new();
        let doc = store.document(DEFAULT_GAUGE).expect("doc");
        assert_eq!(doc.data.label, "Accuracy");
        assert_eq!(doc.color.pattern.len(), 4);
        assert!(store.document("nonexistent").is_none());
    }

    #[test]
    fn test_gauge_ids_sorted() {
        let store = GaugeStore::new();
        let _ = store.get_or_create("zeta");
        let _ = store.get_or_create("alpha");
        assert_eq!(store.gauge_ids(), vec!["alpha", "default", "zeta"]);
    }

    // -----------------------------------------------------------------------
    // Persistence tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_persistence_save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = GaugeStore::with_data_dir(dir.path()).expect("store");
        store.set_value(DEFAULT_GAUGE, 12.5).expect("set");

        // Load into a fresh store and verify
        let store2 = GaugeStore::with_data_dir(dir.path()).expect("store2");
        store2.load_gauge_from_disk(DEFAULT_GAUGE).expect("load");

        let spec = store2.get(DEFAULT_GAUGE).expect("exists");
        assert!((spec.reading.value - 12.5).abs() < f64::EPSILON);
        assert_eq!(spec.color(), Color::RED);
    }

    #[test]
    fn test_persistence_auto_save_on_mutation() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = GaugeStore::with_data_dir(dir.path()).expect("store");

        store
            .replace("disk", GaugeSpec::new(Reading::new("Disk", 77.0), BandScale::default()))
            .expect("replace");

        let path = dir.path().join("disk.json");
        assert!(path.exists(), "JSON file should be written on replace");
    }

    #[test]
    fn test_load_all_gauges() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = GaugeStore::with_data_dir(dir.path()).expect("store");
        for (name, value) in [("gauge-a", 10.0), ("gauge-b", 50.0), ("gauge-c", 90.0)] {
            store
                .replace(
                    name,
                    GaugeSpec::new(Reading::new(name.to_string(), value), BandScale::default()),
                )
                .expect("replace");
        }

        let store2 = GaugeStore::with_data_dir(dir.path()).expect("store2");
        let loaded = store2.load_all_gauges().expect("load all");
        assert!(loaded.contains(&"gauge-a".to_string()));
        assert!(loaded.contains(&"gauge-b".to_string()));
        assert!(loaded.contains(&"gauge-c".to_string()));

        let spec = store2.get("gauge-c").expect("exists");
        assert_eq!(spec.color(), Color::GREEN);
    }

    #[test]
    fn test_load_all_skips_corrupt_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = GaugeStore::with_data_dir(dir.path()).expect("store");
        store.set_value(DEFAULT_GAUGE, 30.0).expect("set");
        std::fs::write(dir.path().join("broken.json"), "not json").expect("write");

        let store2 = GaugeStore::with_data_dir(dir.path()).expect("store2");
        let loaded = store2.load_all_gauges().expect("load all");
        assert!(loaded.contains(&DEFAULT_GAUGE.to_string()));
        assert!(!loaded.contains(&"broken".to_string()));
    }

    #[test]
    fn test_load_nonexistent_gauge_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = GaugeStore::with_data_dir(dir.path()).expect("store");
        assert!(store.load_gauge_from_disk("does-not-exist").is_err());
    }

    #[test]
    fn test_load_without_data_dir_fails() {
        let store = GaugeStore::new();
        assert!(matches!(
            store.load_gauge_from_disk(DEFAULT_GAUGE),
            Err(StoreError::NoDataDir)
        ));
    }

    #[test]
    fn test_delete_gauge_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = GaugeStore::with_data_dir(dir.path()).expect("store");
        store.set_value(DEFAULT_GAUGE, 30.0).expect("set");

        let path = dir.path().join(format!("{DEFAULT_GAUGE}.json"));
        assert!(path.exists());

        store.delete_gauge_file(DEFAULT_GAUGE);
        assert!(!path.exists());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("simple"), "simple");
        assert_eq!(sanitize_filename("with-dash"), "with-dash");
        assert_eq!(sanitize_filename("with_under"), "with_under");
        assert_eq!(sanitize_filename("has/slash"), "has_slash");
        assert_eq!(sanitize_filename("has space"), "has_space");
        assert_eq!(sanitize_filename("a.b.c"), "a_b_c");
    }
}
