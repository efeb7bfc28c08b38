//! Python bindings for hotspot-geo via PyO3.
//!
//! Exposes coordinate extraction, haversine distance and hotspot
//! clustering to Python as the `hotspot_geo` module.

mod helpers;

use numpy::{PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use hotspot_geo::{ClusterConfig, LngLat};

use crate::helpers::{dict_to_record, parse_points, points_to_array};

/// Extract a (lng, lat) tuple from a loosely-shaped record.
///
/// Latitude is read from the first of `lat`, `latitude`, `geo_y`, `y`;
/// longitude from the first of `lng`, `lon`, `longitude`, `geo_x`, `x`.
/// Values may be numbers or decimal strings.
///
/// Args:
///     record: dict with coordinate fields.
///
/// Returns:
///     (lng, lat) tuple, or None when either coordinate is missing or invalid.
#[pyfunction]
fn lnglat_from_record(record: &Bound<'_, PyDict>) -> PyResult<Option<(f64, f64)>> {
    let record = dict_to_record(record)?;
    Ok(hotspot_geo::lnglat_from_record(&record).map(|p| (p.lng, p.lat)))
}

/// Great-circle distance in kilometers between two (lng, lat) points.
#[pyfunction]
fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    hotspot_geo::haversine_km(&LngLat::new(a.0, a.1), &LngLat::new(b.0, b.1))
}

/// Cluster hotspots with greedy first-fit centroid assignment.
///
/// Args:
///     points: Nx2 numpy array of (lng, lat) rows, processed in row order.
///     max_distance_km: Merge distance in kilometers. Default 2.
///
/// Returns:
///     Kx2 numpy array of cluster centroids as (lng, lat) rows, in
///     cluster-creation order.
#[pyfunction]
#[pyo3(signature = (points, max_distance_km = 2.0))]
fn cluster_hotspots<'py>(
    py: Python<'py>,
    points: PyReadonlyArray2<f64>,
    max_distance_km: f64,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let points = parse_points(&points)?;
    let centroids = hotspot_geo::cluster_hotspots(&points, max_distance_km);
    Ok(PyArray2::from_owned_array(py, points_to_array(&centroids)))
}

/// Cluster hotspots and report how many points each cluster absorbed.
///
/// Args:
///     points: Nx2 numpy array of (lng, lat) rows, processed in row order.
///     max_distance_km: Merge distance in kilometers. Default 2.
///
/// Returns:
///     dict with keys 'centroids' (Kx2 array of (lng, lat)) and
///     'counts' (length-K array of member counts), in cluster-creation order.
#[pyfunction]
#[pyo3(signature = (points, max_distance_km = 2.0))]
fn cluster_hotspots_with_counts<'py>(
    py: Python<'py>,
    points: PyReadonlyArray2<f64>,
    max_distance_km: f64,
) -> PyResult<Bound<'py, PyDict>> {
    let points = parse_points(&points)?;
    let clusters =
        hotspot_geo::cluster_hotspots_with_counts(&points, &ClusterConfig { max_distance_km });

    let centroids: Vec<LngLat> = clusters.iter().map(|c| c.centroid).collect();
    let counts: Vec<u64> = clusters.iter().map(|c| c.count as u64).collect();

    let dict = PyDict::new(py);
    dict.set_item("centroids", PyArray2::from_owned_array(py, points_to_array(&centroids)))?;
    dict.set_item("counts", PyArray1::from_vec(py, counts))?;
    Ok(dict)
}

/// hotspot_geo: wildfire hotspot geometry
///
/// Coordinate normalization, haversine distance and greedy hotspot
/// clustering, exposed to Python via PyO3.
#[pymodule]
#[pyo3(name = "hotspot_geo")]
fn hotspot_geo_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(lnglat_from_record, m)?)?;
    m.add_function(wrap_pyfunction!(haversine_km, m)?)?;
    m.add_function(wrap_pyfunction!(cluster_hotspots, m)?)?;
    m.add_function(wrap_pyfunction!(cluster_hotspots_with_counts, m)?)?;
    Ok(())
}
