//! Persisted clustering results.
//!
//! A `HotspotSnapshot` keeps the outcome of clustering one feed (the
//! centroids, how many hotspots each absorbed, and the overall bounds) so a
//! renderer can reload it without re-running the aggregation. Snapshots
//! serialize with rkyv.

use std::path::Path;

use anyhow::{Context, Result};
use rkyv::{Archive, Deserialize, Serialize};
use tracing::info;

use crate::cluster::{ClusterConfig, HotspotCluster};
use crate::feed::HotspotFeed;
use crate::{LngLat, LngLatBounds};

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct HotspotSnapshot {
    /// Merge distance the clusters were built with.
    pub max_distance_km: f64,
    /// Cluster centroids in creation order.
    pub centroids: Vec<LngLat>,
    /// Member count per centroid, same order as `centroids`.
    pub counts: Vec<u64>,
    /// Bounds of the raw hotspots, not only the centroids.
    pub bounds: LngLatBounds,
}

impl HotspotSnapshot {
    /// Cluster a feed and capture the result.
    pub fn from_feed(feed: &HotspotFeed, config: &ClusterConfig) -> Self {
        Self::from_clusters(&feed.cluster(config), feed.bounds, config)
    }

    pub fn from_clusters(
        clusters: &[HotspotCluster],
        bounds: LngLatBounds,
        config: &ClusterConfig,
    ) -> Self {
        Self {
            max_distance_km: config.max_distance_km,
            centroids: clusters.iter().map(|c| c.centroid).collect(),
            counts: clusters.iter().map(|c| c.count as u64).collect(),
            bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// Total hotspots represented by the snapshot.
    pub fn total_hotspots(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Centroids paired with their member counts. Counts that do not fit
    /// `usize` on this target saturate.
    pub fn clusters(&self) -> Vec<HotspotCluster> {
        self.centroids
            .iter()
            .zip(&self.counts)
            .map(|(&centroid, &count)| HotspotCluster {
                centroid,
                count: usize::try_from(count).unwrap_or(usize::MAX),
            })
            .collect()
    }
}

// ── Serialization ───────────────────────────────────────────────────────────

impl HotspotSnapshot {
    /// Serialize the snapshot to bytes using rkyv.
    pub fn to_rkyv_bytes(&self) -> Result<Vec<u8>> {
        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map_err(|e| anyhow::anyhow!("rkyv serialization failed: {}", e))?;
        Ok(bytes.to_vec())
    }

    /// Deserialize a snapshot from rkyv bytes.
    pub fn from_rkyv_bytes(bytes: &[u8]) -> Result<Self> {
        // Archived data must be aligned; file buffers carry no guarantee.
        let mut aligned = rkyv::util::AlignedVec::<16>::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);
        rkyv::from_bytes::<Self, rkyv::rancor::Error>(&aligned)
            .map_err(|e| anyhow::anyhow!("rkyv deserialization failed: {}", e))
    }

    /// Save the snapshot to a file using rkyv.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_rkyv_bytes()?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(
            "Saved hotspot snapshot to {} ({} bytes)",
            path.display(),
            bytes.len()
        );
        Ok(())
    }

    /// Load a snapshot from an rkyv file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let snapshot = Self::from_rkyv_bytes(&bytes)?;
        info!(
            "Loaded hotspot snapshot: {} clusters, {} hotspots",
            snapshot.len(),
            snapshot.total_hotspots()
        );
        Ok(snapshot)
    }
}
