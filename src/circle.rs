//! Geodesic circles for fire report areas.
//!
//! A report marks a circular area around a centre. Renderers only draw
//! polygons, so the circle is approximated by `steps` vertices placed at
//! the requested distance along evenly spaced bearings, closed by
//! repeating the first vertex.
//!
//! Circles use [`EARTH_RADIUS_KM`] (6371 km), the same sphere as the
//! distance metric, rather than turf's 6371.0088 km. For report-sized
//! radii the two place vertices well under a meter apart.

use serde_json::{json, Value};

use crate::haversine::EARTH_RADIUS_KM;
use crate::LngLat;

/// Smallest radius drawn, in kilometers (one meter).
pub const MIN_RADIUS_KM: f64 = 0.001;

/// Parameters controlling circle approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleConfig {
    /// Number of distinct vertices. Default 128, floored at 3.
    pub steps: usize,
}

impl Default for CircleConfig {
    fn default() -> Self {
        Self { steps: 128 }
    }
}

/// Point reached from `origin` after travelling `distance_km` along the
/// initial bearing `bearing_deg` (clockwise from north).
pub fn destination(origin: &LngLat, bearing_deg: f64, distance_km: f64) -> LngLat {
    let lat1 = origin.lat.to_radians();
    let lng1 = origin.lng.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_delta, cos_delta) = delta.sin_cos();

    let sin_lat2 = (sin_lat1 * cos_delta + cos_lat1 * sin_delta * theta.cos()).clamp(-1.0, 1.0);
    let lat2 = sin_lat2.asin();
    let lng2 = lng1
        + (theta.sin() * sin_delta * cos_lat1).atan2(cos_delta - sin_lat1 * sin_lat2);

    LngLat::new(lng2.to_degrees(), lat2.to_degrees())
}

/// Closed ring approximating a circle of `radius_km` around `center`.
///
/// Vertices run counter-clockwise starting due north; the ring has
/// `steps + 1` entries with the last equal to the first.
pub fn circle_polygon(center: &LngLat, radius_km: f64, config: &CircleConfig) -> Vec<LngLat> {
    let steps = config.steps.max(3);
    let radius_km = if radius_km.is_finite() {
        radius_km.max(MIN_RADIUS_KM)
    } else {
        MIN_RADIUS_KM
    };

    let mut ring: Vec<LngLat> = (0..steps)
        .map(|i| {
            let bearing = -360.0 * i as f64 / steps as f64;
            destination(center, bearing, radius_km)
        })
        .collect();
    let first = ring[0];
    ring.push(first);
    ring
}

/// GeoJSON `Polygon` feature for a circle, with `properties` attached as-is.
pub fn circle_geojson(
    center: &LngLat,
    radius_km: f64,
    config: &CircleConfig,
    properties: Value,
) -> Value {
    let ring: Vec<[f64; 2]> = circle_polygon(center, radius_km, config)
        .iter()
        .map(LngLat::to_array)
        .collect();
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [ring],
        },
        "properties": properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_due_north() {
        let origin = LngLat::new(23.0, 42.0);
        let p = destination(&origin, 0.0, 111.19492664455873);
        assert!((p.lng - 23.0).abs() < 1e-9);
        assert!((p.lat - 43.0).abs() < 1e-6);
    }

    #[test]
    fn destination_matches_haversine() {
        let origin = LngLat::new(23.3219, 42.6977);
        for bearing in [0.0, 45.0, 90.0, 180.0, -135.0] {
            let p = destination(&origin, bearing, 5.0);
            assert!((crate::haversine_km(&origin, &p) - 5.0).abs() < 1e-6);
        }
    }

    #[test]
    fn close_to_turf_sphere() {
        const TURF_RADIUS_KM: f64 = 6371.0088;
        let origin = LngLat::new(23.0, 42.0);
        for radius_km in [0.5, 10.0, 50.0] {
            let ours = destination(&origin, 0.0, radius_km);
            let turf = LngLat::new(23.0, 42.0 + (radius_km / TURF_RADIUS_KM).to_degrees());
            assert!(crate::haversine_km(&ours, &turf) < 0.001);
        }
    }

    #[test]
    fn ring_is_closed_and_round() {
        let center = LngLat::new(23.3219, 42.6977);
        let ring = circle_polygon(&center, 1.5, &CircleConfig::default());
        assert_eq!(ring.len(), 129);
        assert_eq!(ring.first(), ring.last());
        for p in &ring {
            assert!((crate::haversine_km(&center, p) - 1.5).abs() < 1e-6);
        }
        // First vertex due north, second turns west (counter-clockwise).
        assert!(ring[0].lat > center.lat);
        assert!(ring[1].lng < center.lng);
    }

    #[test]
    fn degenerate_inputs_are_floored() {
        let center = LngLat::new(0.0, 0.0);
        let ring = circle_polygon(&center, 0.0, &CircleConfig { steps: 1 });
        assert_eq!(ring.len(), 4);
        let r = crate::haversine_km(&center, &ring[0]);
        assert!((r - MIN_RADIUS_KM).abs() < 1e-9);

        let ring = circle_polygon(&center, f64::NAN, &CircleConfig::default());
        assert!(ring.iter().all(LngLat::is_finite));
    }

    #[test]
    fn geojson_polygon() {
        let center = LngLat::new(23.0, 42.0);
        let feature = circle_geojson(
            &center,
            0.5,
            &CircleConfig { steps: 16 },
            json!({"radius_m": 500}),
        );
        assert_eq!(feature["geometry"]["type"], "Polygon");
        assert_eq!(feature["geometry"]["coordinates"][0].as_array().unwrap().len(), 17);
        assert_eq!(feature["properties"]["radius_m"], 500);
    }
}
