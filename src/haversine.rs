//! Great-circle distance on a spherical Earth.

use crate::LngLat;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
///
/// `h = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlng/2)`, distance `2·R·asin(√h)`.
/// Exactly zero for identical points and symmetric in its arguments.
pub fn haversine_km(a: &LngLat, b: &LngLat) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlng = (dlng / 2.0).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;

    // Rounding can push h a hair above 1 for antipodal points, and asin
    // of that is NaN.
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_for_identical_points() {
        for p in [
            LngLat::new(0.0, 0.0),
            LngLat::new(23.3219, 42.6977),
            LngLat::new(-179.9, -89.5),
        ] {
            assert!(haversine_km(&p, &p).abs() < 1e-9);
        }
    }

    #[test]
    fn positive_for_distinct_points() {
        let a = LngLat::new(0.0, 0.0);
        let b = LngLat::new(0.01, 0.0);
        assert!(haversine_km(&a, &b) > 0.0);
    }

    #[test]
    fn symmetric() {
        let a = LngLat::new(23.3219, 42.6977);
        let b = LngLat::new(24.7453, 42.1354);
        assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2πR / 360
        let a = LngLat::new(10.0, 0.0);
        let b = LngLat::new(10.0, 1.0);
        let expected = 2.0 * std::f64::consts::PI * EARTH_RADIUS_KM / 360.0;
        assert!((haversine_km(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn sofia_to_plovdiv() {
        // Roughly 130 km apart.
        let sofia = LngLat::new(23.3219, 42.6977);
        let plovdiv = LngLat::new(24.7453, 42.1354);
        let d = haversine_km(&sofia, &plovdiv);
        assert!(d > 125.0 && d < 135.0, "distance = {d}");
    }

    #[test]
    fn antipodal_points_are_finite() {
        let a = LngLat::new(0.0, 0.0);
        let b = LngLat::new(180.0, 0.0);
        let d = haversine_km(&a, &b);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
