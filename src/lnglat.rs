//! Canonical geographic point and bounding box.
//!
//! Every coordinate handled by this crate is a `LngLat`: longitude first,
//! latitude second, both in degrees. The array form `[lng, lat]` is the
//! order map renderers and GeoJSON expect.
//!
//! Ranges are not validated. A finite but out-of-range value such as
//! `lat = 123.0` passes through unchanged.

use rkyv::{Archive, Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Archive, Serialize, Deserialize)]
pub struct LngLat {
    /// Longitude in degrees (east positive).
    pub lng: f64,
    /// Latitude in degrees (north positive).
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Build from a `[lng, lat]` pair.
    pub fn from_array(pair: [f64; 2]) -> Self {
        Self {
            lng: pair[0],
            lat: pair[1],
        }
    }

    /// `[lng, lat]`, the GeoJSON position order.
    pub fn to_array(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Both components are finite.
    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(&self, other: &LngLat) -> f64 {
        crate::haversine::haversine_km(self, other)
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(pair: [f64; 2]) -> Self {
        Self::from_array(pair)
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        p.to_array()
    }
}

impl std::fmt::Display for LngLat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lng, self.lat)
    }
}

/// Axis-aligned longitude/latitude box that grows as points are added.
///
/// Starts empty. No antimeridian handling: the box spans the numeric
/// min/max of the longitudes it has seen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Archive, Serialize, Deserialize)]
pub struct LngLatBounds {
    /// `(south-west, north-east)` corners, `None` until the first extend.
    pub corners: Option<(LngLat, LngLat)>,
}

impl LngLatBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the box to include `p`.
    pub fn extend(&mut self, p: LngLat) {
        self.corners = Some(match self.corners {
            None => (p, p),
            Some((sw, ne)) => (
                LngLat::new(sw.lng.min(p.lng), sw.lat.min(p.lat)),
                LngLat::new(ne.lng.max(p.lng), ne.lat.max(p.lat)),
            ),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_none()
    }

    pub fn south_west(&self) -> Option<LngLat> {
        self.corners.map(|(sw, _)| sw)
    }

    pub fn north_east(&self) -> Option<LngLat> {
        self.corners.map(|(_, ne)| ne)
    }

    /// Midpoint of the box, `None` when empty.
    pub fn center(&self) -> Option<LngLat> {
        self.corners
            .map(|(sw, ne)| LngLat::new((sw.lng + ne.lng) / 2.0, (sw.lat + ne.lat) / 2.0))
    }

    /// `true` when `p` lies inside the box, edges included.
    pub fn contains(&self, p: &LngLat) -> bool {
        match self.corners {
            None => false,
            Some((sw, ne)) => {
                p.lng >= sw.lng && p.lng <= ne.lng && p.lat >= sw.lat && p.lat <= ne.lat
            }
        }
    }
}

impl FromIterator<LngLat> for LngLatBounds {
    fn from_iter<I: IntoIterator<Item = LngLat>>(iter: I) -> Self {
        let mut bounds = Self::new();
        for p in iter {
            bounds.extend(p);
        }
        bounds
    }
}
