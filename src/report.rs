//! Fire report areas: the payload posted for a new report and the status
//! codes reports come back with.

use serde_json::{json, Value};

use crate::circle::{circle_geojson, CircleConfig};
use crate::LngLat;

/// Colour used for reports without a known status.
pub const UNKNOWN_STATUS_COLOR: &str = "#7f8c8d";

/// Label used for reports without a known status.
pub const UNKNOWN_STATUS_LABEL: &str = "Неизвестен статус";

/// Lifecycle status of a fire report, as numbered by the report service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportStatus {
    /// The fire is under control (id 2).
    UnderControl,
    /// The fire is extinguished (id 3).
    Extinguished,
    /// The fire is spreading (id 4).
    Spreading,
}

impl ReportStatus {
    /// Map a service status id; `None` for anything other than 2, 3 or 4.
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            2 => Some(Self::UnderControl),
            3 => Some(Self::Extinguished),
            4 => Some(Self::Spreading),
            _ => None,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::UnderControl => 2,
            Self::Extinguished => 3,
            Self::Spreading => 4,
        }
    }

    /// Map fill colour.
    pub fn color(&self) -> &'static str {
        match self {
            Self::UnderControl => "#3498db",
            Self::Extinguished => "#27ae60",
            Self::Spreading => "#e67e22",
        }
    }

    /// Display label in Bulgarian, as shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnderControl => "Под контрол",
            Self::Extinguished => "Потушен",
            Self::Spreading => "Разпространява се",
        }
    }
}

/// Colour for a raw status id, falling back to grey.
pub fn status_color(id: i64) -> &'static str {
    ReportStatus::from_id(id).map_or(UNKNOWN_STATUS_COLOR, |s| s.color())
}

/// Non-finite values become zero.
fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Body of a new-report request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportPayload {
    /// Centre longitude.
    pub geo_x: f64,
    /// Centre latitude.
    pub geo_y: f64,
    /// Radius in whole meters, never negative.
    pub radius: u64,
}

impl ReportPayload {
    /// Normalize a drawn circle into a payload. Non-finite coordinates
    /// and radii are replaced by zero; the radius is rounded to meters.
    pub fn new(center: &LngLat, radius_m: f64) -> Self {
        let radius = finite_or_zero(radius_m).round().max(0.0);
        Self {
            geo_x: finite_or_zero(center.lng),
            geo_y: finite_or_zero(center.lat),
            radius: radius as u64,
        }
    }

    pub fn center(&self) -> LngLat {
        LngLat::new(self.geo_x, self.geo_y)
    }

    /// JSON request body.
    pub fn to_json(&self) -> Value {
        json!({
            "geo_x": self.geo_x,
            "geo_y": self.geo_y,
            "radius": self.radius,
        })
    }

    /// Polygon feature for drawing the report area. Status fields are
    /// filled from `status` when known, otherwise fall back to grey and
    /// the unknown label.
    pub fn to_geojson(&self, status: Option<ReportStatus>, config: &CircleConfig) -> Value {
        let status_id = status.map(|s| s.id());
        let status_text = status.map_or(UNKNOWN_STATUS_LABEL, |s| s.label());
        let color = status.map_or(UNKNOWN_STATUS_COLOR, |s| s.color());
        let properties = json!({
            "center_lng": self.geo_x,
            "center_lat": self.geo_y,
            "radius_m": self.radius,
            "statusId": status_id,
            "statusText": status_text,
            "color": color,
        });
        circle_geojson(&self.center(), self.radius as f64 / 1000.0, config, properties)
    }
}
