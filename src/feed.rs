//! Hotspot feed: the satellite hotspot list returned by the home-map
//! endpoint, normalized for rendering.
//!
//! The response has the shape `{"sat_data": [record, ...]}` where each
//! record is a loosely-typed point (see [`crate::extract`]) that may also
//! carry `date`, `time` and `confidence`. Records whose coordinates cannot
//! be resolved are skipped and counted.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::cluster::{cluster_hotspots_with_counts, ClusterConfig, HotspotCluster};
use crate::extract::lnglat_from_value;
use crate::{LngLat, LngLatBounds};

/// Placeholder shown for missing popup fields.
const MISSING: &str = "—";

/// A single hotspot with the metadata shown in its popup.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotFeature {
    pub coord: LngLat,
    pub date: Option<Value>,
    pub time: Option<Value>,
    pub confidence: Option<Value>,
}

/// Take a property, treating JSON `null` as absent.
fn property(record: &Value, key: &str) -> Option<Value> {
    record.get(key).filter(|v| !v.is_null()).cloned()
}

/// Render a property for display: strings without quotes, other values
/// as JSON text.
fn display_property(value: &Option<Value>) -> String {
    match value {
        None => MISSING.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
    }
}

impl HotspotFeature {
    /// Build from a raw record; `None` when it has no usable coordinate.
    pub fn from_record(record: &Value) -> Option<Self> {
        let coord = lnglat_from_value(record)?;
        Some(Self {
            coord,
            date: property(record, "date"),
            time: property(record, "time"),
            confidence: property(record, "confidence"),
        })
    }

    /// GeoJSON `Point` feature with `date`, `time` and `confidence`
    /// properties (`null` when absent).
    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": self.coord.to_array(),
            },
            "properties": {
                "date": self.date,
                "time": self.time,
                "confidence": self.confidence,
            },
        })
    }

    /// Popup text, one line per field. Coordinates are printed
    /// latitude first with five decimals.
    pub fn summary(&self) -> String {
        format!(
            "Hotspot\n{:.5}, {:.5}\nDate: {}\nTime: {}\nConfidence: {}",
            self.coord.lat,
            self.coord.lng,
            display_property(&self.date),
            display_property(&self.time),
            display_property(&self.confidence),
        )
    }
}

/// All usable hotspots from one home-map response.
#[derive(Debug, Clone, Default)]
pub struct HotspotFeed {
    pub features: Vec<HotspotFeature>,
    pub bounds: LngLatBounds,
    /// Records dropped for lack of a usable coordinate.
    pub skipped: usize,
}

impl HotspotFeed {
    /// Build a feed from a list of raw records.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut feed = Self::default();
        for record in records {
            match HotspotFeature::from_record(record) {
                Some(feature) => {
                    feed.bounds.extend(feature.coord);
                    feed.features.push(feature);
                }
                None => feed.skipped += 1,
            }
        }
        if feed.features.is_empty() {
            warn!("No valid hotspot points found ({} records skipped)", feed.skipped);
        } else {
            debug!(
                "Loaded {} hotspots, skipped {} records",
                feed.features.len(),
                feed.skipped
            );
        }
        feed
    }

    /// Parse a home-map response value.
    ///
    /// Fails when the value is not an object with a `sat_data` array.
    pub fn from_value(response: &Value) -> Result<Self> {
        let records = response
            .get("sat_data")
            .and_then(Value::as_array)
            .context("Unexpected response format: missing `sat_data` array")?;
        Ok(Self::from_records(records))
    }

    /// Parse a home-map response from JSON text.
    ///
    /// Number literals outside the `f64` range (`1e400`) do not fail the
    /// parse; the record holding them is skipped like any other bad record.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let response: Value =
            serde_json::from_str(text).context("Failed to parse home-map response")?;
        Self::from_value(&response)
    }

    /// Load a saved home-map response from disk.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Hotspot coordinates in feed order.
    pub fn coords(&self) -> Vec<LngLat> {
        self.features.iter().map(|f| f.coord).collect()
    }

    /// Cluster the feed's hotspots.
    pub fn cluster(&self, config: &ClusterConfig) -> Vec<HotspotCluster> {
        cluster_hotspots_with_counts(&self.coords(), config)
    }

    /// GeoJSON `FeatureCollection` of all hotspots.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self.features.iter().map(HotspotFeature::to_geojson).collect();
        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}
