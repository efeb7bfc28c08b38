//! Greedy centroid clustering of hotspot points.
//!
//! Points are processed in input order. Each point joins the **first**
//! existing cluster (in creation order) whose current centroid lies within
//! `max_distance_km`, otherwise it starts a new cluster. Centroids move as
//! members are added, so the grouping depends on input order: the same set
//! of points fed in a different order may cluster differently. That is the
//! intended behavior, not nearest-centroid assignment.
//!
//! Cost is O(n·k) for n points and k clusters; there is no spatial index.

use nalgebra::Vector2;
use tracing::info;

use crate::LngLat;

/// Default merge distance in kilometers.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 2.0;

/// Parameters controlling hotspot clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterConfig {
    /// A point joins a cluster when its haversine distance to the
    /// cluster centroid is at most this many kilometers. Default 2.0.
    pub max_distance_km: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
        }
    }
}

/// A finished cluster: its centroid and how many points it absorbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotCluster {
    pub centroid: LngLat,
    pub count: usize,
}

/// Working cluster. Members are kept so callers can inspect them; the
/// running sum gives the centroid without re-reducing the members.
#[derive(Debug, Clone)]
struct Cluster {
    members: Vec<LngLat>,
    sum: Vector2<f64>,
}

impl Cluster {
    fn singleton(p: LngLat) -> Self {
        Self {
            members: vec![p],
            sum: Vector2::new(p.lng, p.lat),
        }
    }

    fn push(&mut self, p: LngLat) {
        self.sum += Vector2::new(p.lng, p.lat);
        self.members.push(p);
    }

    fn centroid(&self) -> LngLat {
        let mean = self.sum / self.members.len() as f64;
        LngLat::new(mean.x, mean.y)
    }
}

/// Incremental first-fit clusterer.
///
/// ```
/// use hotspot_geo::{ClusterConfig, HotspotClusterer, LngLat};
///
/// let mut clusterer = HotspotClusterer::new(ClusterConfig::default());
/// clusterer.push(LngLat::new(23.0, 42.0));
/// clusterer.push(LngLat::new(23.001, 42.001));
/// assert_eq!(clusterer.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct HotspotClusterer {
    config: ClusterConfig,
    clusters: Vec<Cluster>,
}

impl HotspotClusterer {
    pub fn new(config: ClusterConfig) -> Self {
        Self {
            config,
            clusters: Vec::new(),
        }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Assign one point and return the index of the cluster it joined.
    pub fn push(&mut self, p: LngLat) -> usize {
        let max_km = self.config.max_distance_km;
        let hit = self
            .clusters
            .iter()
            .position(|c| crate::haversine_km(&p, &c.centroid()) <= max_km);

        match hit {
            Some(idx) => {
                self.clusters[idx].push(p);
                idx
            }
            None => {
                self.clusters.push(Cluster::singleton(p));
                self.clusters.len() - 1
            }
        }
    }

    /// Assign every point from `points`, in order.
    pub fn extend<I: IntoIterator<Item = LngLat>>(&mut self, points: I) {
        for p in points {
            self.push(p);
        }
    }

    /// Number of clusters formed so far.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Members of cluster `idx`, in the order they were assigned.
    pub fn members(&self, idx: usize) -> Option<&[LngLat]> {
        self.clusters.get(idx).map(|c| c.members.as_slice())
    }

    /// Current centroids in cluster-creation order.
    pub fn centroids(&self) -> Vec<LngLat> {
        self.clusters.iter().map(Cluster::centroid).collect()
    }

    /// Current centroids with member counts, in cluster-creation order.
    pub fn clusters(&self) -> Vec<HotspotCluster> {
        self.clusters
            .iter()
            .map(|c| HotspotCluster {
                centroid: c.centroid(),
                count: c.members.len(),
            })
            .collect()
    }
}

/// Cluster `points` and return one centroid per cluster, in creation order.
///
/// An empty slice gives an empty result; a single point gives itself.
pub fn cluster_hotspots(points: &[LngLat], max_distance_km: f64) -> Vec<LngLat> {
    cluster_hotspots_with_counts(points, &ClusterConfig { max_distance_km })
        .into_iter()
        .map(|c| c.centroid)
        .collect()
}

/// Like [`cluster_hotspots`] but keeps each cluster's member count.
pub fn cluster_hotspots_with_counts(
    points: &[LngLat],
    config: &ClusterConfig,
) -> Vec<HotspotCluster> {
    let mut clusterer = HotspotClusterer::new(*config);
    clusterer.extend(points.iter().copied());
    let clusters = clusterer.clusters();
    if !points.is_empty() {
        info!(
            "Clustered {} hotspots into {} clusters (max distance {} km)",
            points.len(),
            clusters.len(),
            config.max_distance_km
        );
    }
    clusters
}
