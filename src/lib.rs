//! # hotspot-geo
//!
//! Geospatial helpers for a wildfire-awareness map: normalize satellite
//! hotspot records into coordinates, measure great-circle distances, and
//! group nearby hotspots into clusters before handing them to a renderer.
//!
//! ## Example
//!
//! ```
//! use hotspot_geo::{cluster_hotspots, lnglat_from_value, LngLat};
//! use serde_json::json;
//!
//! let records = [
//!     json!({"lat": 42, "lon": 23}),
//!     json!({"latitude": "42.001", "longitude": "23.001"}),
//!     json!({"station": "no position"}),
//! ];
//!
//! let points: Vec<LngLat> = records.iter().filter_map(lnglat_from_value).collect();
//! assert_eq!(points.len(), 2);
//!
//! // Both hotspots are within 2 km of each other, so they merge.
//! let centroids = cluster_hotspots(&points, 2.0);
//! assert_eq!(centroids.len(), 1);
//! ```
//!
//! ## Pipeline
//!
//! 1. **Extraction**: each record resolves latitude and longitude through a
//!    fixed alias table (`lat`/`latitude`/`geo_y`/`y`,
//!    `lng`/`lon`/`longitude`/`geo_x`/`x`), accepting numbers or decimal
//!    strings. Records without two finite values are skipped.
//! 2. **Distance**: haversine on a 6371 km sphere.
//! 3. **Clustering**: greedy first-fit against running centroids with a
//!    distance threshold (2 km by default). Results depend on input order.
//! 4. **Output**: centroids, GeoJSON feature collections, bounds, popup
//!    text, report-area circles, or an rkyv snapshot.
//!
//! Coordinates are always longitude first. Latitude and longitude ranges are
//! not validated: finite out-of-range values pass through.

pub mod circle;
pub mod cluster;
pub mod extract;
pub mod feed;
pub mod haversine;
mod lnglat;
pub mod report;
pub mod snapshot;

pub use circle::{circle_geojson, circle_polygon, destination, CircleConfig};
pub use cluster::{
    cluster_hotspots, cluster_hotspots_with_counts, ClusterConfig, HotspotCluster,
    HotspotClusterer,
};
pub use extract::{extract_lnglats, lnglat_from_record, lnglat_from_value, RawPointRecord};
pub use feed::{HotspotFeature, HotspotFeed};
pub use haversine::{haversine_km, EARTH_RADIUS_KM};
pub use lnglat::*;
pub use report::{ReportPayload, ReportStatus};
pub use snapshot::HotspotSnapshot;
