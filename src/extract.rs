//! Coordinate extraction from loosely-shaped point records.
//!
//! Hotspot feeds do not agree on field names. A record may carry its
//! position as `lat`/`lng`, `latitude`/`longitude`, `geo_y`/`geo_x` or
//! plain `y`/`x`, and the values may be JSON numbers or decimal strings.
//! The extractor resolves each axis through a fixed priority table and
//! returns a [`LngLat`] only when both axes resolve to finite numbers.

use serde_json::{Map, Value};
use tracing::debug;

use crate::LngLat;

/// Latitude aliases, highest priority first.
pub const LAT_KEYS: [&str; 4] = ["lat", "latitude", "geo_y", "y"];

/// Longitude aliases, highest priority first.
pub const LNG_KEYS: [&str; 5] = ["lng", "lon", "longitude", "geo_x", "x"];

/// A raw point record: an open JSON object.
pub type RawPointRecord = Map<String, Value>;

/// Value of the first key in `keys` that is present and not `null`.
fn first_present<'a>(record: &'a RawPointRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

/// Length of the longest prefix of `s` that reads as a decimal float:
/// optional sign, then `Infinity` or digits with an optional fraction and
/// an optional exponent. Zero when no digit is found.
fn decimal_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    if b[i..].starts_with(b"Infinity") {
        return i + "Infinity".len();
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }
    if digits == 0 {
        return 0;
    }

    // Exponent only counts when at least one digit follows it.
    if i < b.len() && matches!(b[i], b'e' | b'E') {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

/// Parse the leading decimal float of `s`, ignoring leading whitespace and
/// anything after the number: `"42.70 N"` reads as `42.7`, `"abc"` as nothing.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let len = decimal_prefix_len(s);
    if len == 0 {
        return None;
    }
    let prefix = &s[..len];
    let unsigned = prefix.trim_start_matches(['+', '-']);
    if unsigned == "Infinity" {
        return Some(if prefix.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    prefix.parse::<f64>().ok()
}

/// Coerce a JSON value to a finite `f64`.
///
/// Numbers are taken as-is, strings are read with [`parse_float_prefix`].
/// Every other type, and any non-finite result, is rejected.
fn coerce_finite(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_float_prefix(s)?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Extract a canonical `(lng, lat)` point from a record.
///
/// Returns `None` when either axis is missing, unparsable, or non-finite.
/// Once an alias is found for an axis, lower-priority aliases are not
/// consulted even if the chosen value turns out to be malformed.
pub fn lnglat_from_record(record: &RawPointRecord) -> Option<LngLat> {
    let lat = coerce_finite(first_present(record, &LAT_KEYS)?)?;
    let lng = coerce_finite(first_present(record, &LNG_KEYS)?)?;
    Some(LngLat::new(lng, lat))
}

/// Same as [`lnglat_from_record`] for an arbitrary JSON value.
/// Anything other than an object yields `None`.
pub fn lnglat_from_value(value: &Value) -> Option<LngLat> {
    value.as_object().and_then(lnglat_from_record)
}

/// Extract every valid point from a batch, in input order.
pub fn extract_lnglats<'a, I>(records: I) -> Vec<LngLat>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut total = 0usize;
    let points: Vec<LngLat> = records
        .into_iter()
        .inspect(|_| total += 1)
        .filter_map(lnglat_from_value)
        .collect();
    if points.len() < total {
        debug!(
            "Dropped {} of {} records without usable coordinates",
            total - points.len(),
            total
        );
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(v: Value) -> Option<LngLat> {
        lnglat_from_value(&v)
    }

    fn assert_close(got: Option<LngLat>, lng: f64, lat: f64) {
        let p = got.expect("expected a coordinate");
        assert!((p.lng - lng).abs() < 1e-9, "lng {} != {}", p.lng, lng);
        assert!((p.lat - lat).abs() < 1e-9, "lat {} != {}", p.lat, lat);
    }

    #[test]
    fn lat_lon_numeric() {
        assert_close(extract(json!({"lat": 42, "lon": 23})), 23.0, 42.0);
    }

    #[test]
    fn latitude_longitude_strings() {
        assert_close(
            extract(json!({"latitude": "42.70", "longitude": "23.32"})),
            23.32,
            42.70,
        );
    }

    #[test]
    fn geo_x_geo_y() {
        assert_close(
            extract(json!({"geo_y": 41.998, "geo_x": 25.123})),
            25.123,
            41.998,
        );
    }

    #[test]
    fn generic_x_y() {
        assert_close(extract(json!({"y": 40.1, "x": 19.9})), 19.9, 40.1);
    }

    #[test]
    fn unrecognized_fields() {
        assert_eq!(extract(json!({"foo": 1, "bar": 2})), None);
    }

    #[test]
    fn priority_order_wins() {
        let record = json!({
            "y": 1.0, "geo_y": 2.0, "latitude": 3.0, "lat": 4.0,
            "x": 5.0, "geo_x": 6.0, "longitude": 7.0, "lon": 8.0, "lng": 9.0,
        });
        assert_close(extract(record), 9.0, 4.0);

        let record = json!({"y": 1.0, "geo_y": 2.0, "x": 5.0, "geo_x": 6.0});
        assert_close(extract(record), 6.0, 2.0);
    }

    #[test]
    fn null_falls_through_to_next_alias() {
        let record = json!({"lat": null, "latitude": 42.5, "lng": null, "lon": 23.5});
        assert_close(extract(record), 23.5, 42.5);
    }

    #[test]
    fn malformed_alias_does_not_fall_through() {
        let record = json!({"lat": "abc", "latitude": 42.5, "lng": 23.5});
        assert_eq!(extract(record), None);
    }

    #[test]
    fn missing_one_axis() {
        assert_eq!(extract(json!({"lat": 42.0})), None);
        assert_eq!(extract(json!({"lng": 23.0})), None);
    }

    #[test]
    fn non_finite_strings_rejected() {
        assert_eq!(extract(json!({"lat": "NaN", "lng": 1.0})), None);
        assert_eq!(extract(json!({"lat": "inf", "lng": 1.0})), None);
        assert_eq!(extract(json!({"lat": "Infinity", "lng": 1.0})), None);
        assert_eq!(extract(json!({"lat": "-Infinity", "lng": 1.0})), None);
        assert_eq!(extract(json!({"lat": "", "lng": 1.0})), None);
    }

    #[test]
    fn trailing_text_after_number_is_ignored() {
        assert_close(extract(json!({"lat": "42.7abc", "lng": 23.0})), 23.0, 42.7);
        assert_close(extract(json!({"lat": "42.70 N", "lng": "23.32 E"})), 23.32, 42.70);
        assert_eq!(extract(json!({"lat": "abc", "lng": 23.0})), None);
        assert_eq!(extract(json!({"lat": "N 42.7", "lng": 23.0})), None);
    }

    #[test]
    fn float_prefix_grammar() {
        assert_eq!(parse_float_prefix("  -12.5e2xyz"), Some(-1250.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("1e+"), Some(1.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("+3"), Some(3.0));
        assert_eq!(parse_float_prefix("1.2.3"), Some(1.2));
        assert_eq!(parse_float_prefix("Infinityx"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("e5"), None);
        assert_eq!(parse_float_prefix("inf"), None);
    }

    #[test]
    fn overflowing_number_literal_rejected() {
        let record: Value = serde_json::from_str(r#"{"lat": 1e400, "lng": 23.0}"#).unwrap();
        assert_eq!(lnglat_from_value(&record), None);
    }

    #[test]
    fn other_json_types_rejected() {
        assert_eq!(extract(json!({"lat": true, "lng": 1.0})), None);
        assert_eq!(extract(json!({"lat": [42.0], "lng": 1.0})), None);
        assert_eq!(extract(json!([42.0, 23.0])), None);
        assert_eq!(extract(json!("42,23")), None);
    }

    #[test]
    fn padded_strings_parse() {
        assert_close(extract(json!({"lat": " 42.5 ", "lng": "\t23.25"})), 23.25, 42.5);
    }

    #[test]
    fn batch_skips_bad_records() {
        let records = vec![
            json!({"lat": 42.0, "lng": 23.0}),
            json!({"foo": 1}),
            json!({"latitude": "41.5", "longitude": "24.5"}),
        ];
        let points = extract_lnglats(&records);
        assert_eq!(
            points,
            vec![LngLat::new(23.0, 42.0), LngLat::new(24.5, 41.5)]
        );
    }
}
