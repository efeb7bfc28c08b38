use numpy::ndarray::Array2;
use numpy::PyReadonlyArray2;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyString};
use serde_json::{Map, Number, Value};

use hotspot_geo::LngLat;

/// Convert one Python value to JSON for coordinate extraction.
///
/// Non-finite floats become their string form so the extractor rejects
/// them instead of treating them as `null`. Types the extractor never
/// accepts map to an empty object.
fn py_to_json(value: &Bound<'_, PyAny>) -> PyResult<Value> {
    if value.is_none() {
        return Ok(Value::Null);
    }
    if let Ok(b) = value.cast::<PyBool>() {
        return Ok(Value::Bool(b.is_true()));
    }
    if let Ok(i) = value.cast::<PyInt>() {
        if let Ok(v) = i.extract::<i64>() {
            return Ok(Value::from(v));
        }
        let v: f64 = i.extract()?;
        return Ok(Number::from_f64(v).map_or_else(|| Value::String(v.to_string()), Value::Number));
    }
    if let Ok(f) = value.cast::<PyFloat>() {
        let v = f.value();
        return Ok(Number::from_f64(v).map_or_else(|| Value::String(v.to_string()), Value::Number));
    }
    if let Ok(s) = value.cast::<PyString>() {
        return Ok(Value::String(s.to_str()?.to_string()));
    }
    Ok(Value::Object(Map::new()))
}

/// Convert a Python dict with string keys to a point record.
/// Non-string keys are ignored.
pub(crate) fn dict_to_record(dict: &Bound<'_, PyDict>) -> PyResult<Map<String, Value>> {
    let mut record = Map::new();
    for (key, value) in dict.iter() {
        if let Ok(key) = key.extract::<String>() {
            record.insert(key, py_to_json(&value)?);
        }
    }
    Ok(record)
}

/// Parse an Nx2 `(lng, lat)` array into points.
pub(crate) fn parse_points(points: &PyReadonlyArray2<f64>) -> PyResult<Vec<LngLat>> {
    let a = points.as_array();
    if a.shape()[1] != 2 {
        return Err(pyo3::exceptions::PyValueError::new_err(format!(
            "points array must have exactly 2 columns (lng, lat), got {}",
            a.shape()[1]
        )));
    }
    Ok((0..a.shape()[0])
        .map(|i| LngLat::new(a[[i, 0]], a[[i, 1]]))
        .collect())
}

/// Pack points into a Kx2 `(lng, lat)` array.
pub(crate) fn points_to_array(points: &[LngLat]) -> Array2<f64> {
    let mut data = Array2::<f64>::zeros((points.len(), 2));
    for (i, p) in points.iter().enumerate() {
        data[[i, 0]] = p.lng;
        data[[i, 1]] = p.lat;
    }
    data
}
