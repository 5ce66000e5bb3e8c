//! Threshold filtering and spatial clustering of z-scored contacts
//!
//! Only the (row, col) bin coordinates of surviving entries are clustering
//! features; z-scores decide survival and are carried along for reporting.
//! Pairwise distances are O(M^2) in the number of survivors.

use crate::core::dbscan::{dbscan, ClusterAssignment, DistanceMatrix};
use crate::core::matrix::SparseMatrix;
use crate::core::params::DetectionParams;
use log::{debug, info};

/// A z-scored entry that passed the threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredPoint {
    pub row: usize,
    pub col: usize,
    pub zscore: f64,
}

/// Surviving points and their parallel cluster labels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactClusters {
    pub points: Vec<FilteredPoint>,
    pub assignment: ClusterAssignment,
}

impl ContactClusters {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Keep entries with `zscore >= threshold`, in storage order
///
/// Non-finite z-scores never survive, whatever the threshold.
pub fn filter_by_threshold(zscored: &SparseMatrix, threshold: f64) -> Vec<FilteredPoint> {
    zscored
        .entries()
        .filter(|e| e.value.is_finite() && e.value >= threshold)
        .map(|e| FilteredPoint {
            row: e.row,
            col: e.col,
            zscore: e.value,
        })
        .collect()
}

/// Pairwise Euclidean distances between the (row, col) coordinates
pub fn coordinate_distances(points: &[FilteredPoint]) -> DistanceMatrix {
    let coords: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.row as f64, p.col as f64))
        .collect();
    DistanceMatrix::euclidean(&coords)
}

/// Filter a z-scored matrix and cluster the survivors
///
/// Parameters are assumed validated. Zero survivors yield an empty result.
pub fn cluster_contacts(zscored: &SparseMatrix, params: &DetectionParams) -> ContactClusters {
    let points = filter_by_threshold(zscored, params.zscore_threshold);
    info!(
        "{} of {} entries pass z-score threshold {}",
        points.len(),
        zscored.nnz(),
        params.zscore_threshold
    );
    if points.is_empty() {
        return ContactClusters::default();
    }

    let distances = coordinate_distances(&points);
    let assignment = dbscan(&distances, params.eps, params.min_samples);
    debug!(
        "DBSCAN(eps={}, min_samples={}): {} clusters, {} noise points",
        params.eps,
        params.min_samples,
        assignment.n_clusters(),
        assignment.noise_count()
    );

    ContactClusters { points, assignment }
}
