//! Density-based clustering over a precomputed distance matrix
//!
//! Standard DBSCAN semantics:
//! - a point's neighbourhood is every point (itself included) at distance `<= eps`
//! - a core point has at least `min_samples` neighbours
//! - clusters grow transitively through core points; border points join the
//!   first cluster that reaches them
//! - everything else is noise, labelled [`NOISE`]
//!
//! Clusters are numbered in order of their lowest-indexed core point, so the
//! labelling is deterministic for a given point order.

use rayon::prelude::*;

/// Label assigned to points that belong to no cluster
pub const NOISE: i32 = -1;

/// Symmetric pairwise distance matrix in condensed upper-triangle form
///
/// Memory is O(n^2); this is intended for the small point sets left after
/// thresholding.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    condensed: Vec<f64>,
    n: usize,
}

impl DistanceMatrix {
    /// Euclidean distances between 2-D points
    pub fn euclidean(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let condensed = (0..n)
            .into_par_iter()
            .map(|i| {
                let (xi, yi) = points[i];
                ((i + 1)..n)
                    .map(|j| {
                        let (xj, yj) = points[j];
                        ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt()
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();
        Self { condensed, n }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance between points `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        self.condensed[a * self.n - a * (a + 1) / 2 + (b - a - 1)]
    }

    /// Indices within `eps` of point `i`, ascending, including `i`
    pub fn neighbors(&self, i: usize, eps: f64) -> Vec<usize> {
        (0..self.n).filter(|&j| j == i || self.get(i, j) <= eps).collect()
    }
}

/// Per-point cluster labels produced by [`dbscan`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterAssignment {
    labels: Vec<i32>,
    n_clusters: usize,
}

impl ClusterAssignment {
    /// Assignment over zero points
    pub fn empty() -> Self {
        Self::default()
    }

    /// One label per point, [`NOISE`] for noise
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    pub fn label(&self, i: usize) -> Option<i32> {
        self.labels.get(i).copied()
    }

    /// Number of clusters found, not counting noise
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE).count()
    }

    /// Member count per cluster id
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.n_clusters];
        for &label in &self.labels {
            if label != NOISE {
                sizes[label as usize] += 1;
            }
        }
        sizes
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Run DBSCAN on a precomputed distance matrix
///
/// Parameter validation (`eps > 0`, `min_samples >= 1`) is the caller's job;
/// see [`DetectionParams::validate`](crate::core::DetectionParams::validate).
pub fn dbscan(distances: &DistanceMatrix, eps: f64, min_samples: usize) -> ClusterAssignment {
    let n = distances.len();
    if n == 0 {
        return ClusterAssignment::empty();
    }

    let neighborhoods: Vec<Vec<usize>> = (0..n)
        .into_par_iter()
        .map(|i| distances.neighbors(i, eps))
        .collect();
    let is_core: Vec<bool> = neighborhoods
        .iter()
        .map(|nb| nb.len() >= min_samples)
        .collect();

    let mut labels = vec![NOISE; n];
    let mut cluster_id = 0i32;
    let mut stack = Vec::new();

    for seed in 0..n {
        if labels[seed] != NOISE || !is_core[seed] {
            continue;
        }

        stack.push(seed);
        while let Some(i) = stack.pop() {
            if labels[i] != NOISE {
                continue;
            }
            labels[i] = cluster_id;
            if !is_core[i] {
                continue;
            }
            for &j in &neighborhoods[i] {
                if labels[j] == NOISE {
                    stack.push(j);
                }
            }
        }
        cluster_id += 1;
    }

    ClusterAssignment {
        labels,
        n_clusters: cluster_id as usize,
    }
}
