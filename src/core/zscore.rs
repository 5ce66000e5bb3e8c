//! Per-distance z-score normalization
//!
//! Every stored entry is scored against the population of all bin pairs at
//! the same genomic distance `d = |row - col|`.
//!
//! # Population convention
//!
//! Both the mean and the variance of bucket `d` divide by the matrix
//! dimension N, not by the number of stored entries at that distance. Implicit
//! zeros therefore count as observations and pull the mean down:
//!
//! ```text
//! mean[d]  = sum(value at d) / N
//! sigma[d] = sqrt(sum((value - mean[d])^2 at d) / N)
//! z        = (value - mean[d]) / sigma[d]
//! ```
//!
//! This is a modelling choice kept for compatibility with existing results;
//! switching to a count-based divisor changes every score. When `sigma[d]` is
//! zero the score is non-finite and is left as-is; thresholding drops it.

use crate::core::error::{MatrixParseError, MatrixResult};
use crate::core::matrix::{Entry, SparseMatrix};
use log::debug;
use rayon::prelude::*;

/// Mean and standard deviation per genomic distance
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceStats {
    mean: Vec<f64>,
    sigma: Vec<f64>,
    observed: Vec<usize>,
}

impl DistanceStats {
    /// Accumulate per-distance statistics in two sequential passes over the
    /// stored entries
    pub fn from_matrix(matrix: &SparseMatrix) -> Self {
        let n = matrix.dim();
        let divisor = n as f64;

        let mut sum = vec![0.0f64; n];
        let mut observed = vec![0usize; n];
        for entry in matrix.entries() {
            let d = entry.distance();
            sum[d] += entry.value;
            observed[d] += 1;
        }

        let mean: Vec<f64> = sum.iter().map(|s| s / divisor).collect();

        let mut sigma_sq = vec![0.0f64; n];
        for entry in matrix.entries() {
            let d = entry.distance();
            let diff = entry.value - mean[d];
            sigma_sq[d] += diff * diff;
        }

        let sigma = sigma_sq.iter().map(|s| (s / divisor).sqrt()).collect();

        Self {
            mean,
            sigma,
            observed,
        }
    }

    /// Number of distance buckets (the matrix dimension)
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    pub fn mean(&self, distance: usize) -> Option<f64> {
        self.mean.get(distance).copied()
    }

    pub fn sigma(&self, distance: usize) -> Option<f64> {
        self.sigma.get(distance).copied()
    }

    /// Stored entries contributing to bucket `distance`
    pub fn observed(&self, distance: usize) -> usize {
        self.observed.get(distance).copied().unwrap_or(0)
    }

    /// Buckets with stored entries but zero spread
    pub fn degenerate_buckets(&self) -> usize {
        self.observed
            .iter()
            .zip(&self.sigma)
            .filter(|&(&count, &sigma)| count > 0 && sigma == 0.0)
            .count()
    }

    /// Z-score of a single entry, `None` when its distance has no bucket
    #[inline]
    pub fn zscore(&self, entry: &Entry) -> Option<f64> {
        let d = entry.distance();
        Some((entry.value - self.mean.get(d)?) / self.sigma.get(d)?)
    }
}

/// Z-score every stored entry, returning a new value array in entry order
///
/// The input matrix is not modified.
pub fn zscore_values(matrix: &SparseMatrix) -> Vec<f64> {
    let stats = DistanceStats::from_matrix(matrix);
    score_entries(matrix, &stats)
}

/// Z-score every stored entry against precomputed statistics
///
/// `stats` must come from a matrix of the same dimension.
pub fn zscore_values_with(
    matrix: &SparseMatrix,
    stats: &DistanceStats,
) -> MatrixResult<Vec<f64>> {
    if stats.len() != matrix.dim() {
        return Err(MatrixParseError::DimensionMismatch {
            expected: matrix.dim(),
            found: stats.len(),
        });
    }
    Ok(score_entries(matrix, stats))
}

fn score_entries(matrix: &SparseMatrix, stats: &DistanceStats) -> Vec<f64> {
    let scores: Vec<f64> = (0..matrix.nnz())
        .into_par_iter()
        .map(|i| {
            let entry = Entry {
                row: matrix.rows()[i],
                col: matrix.cols()[i],
                value: matrix.values()[i],
            };
            // Every distance is below the dimension, so the bucket exists
            stats.zscore(&entry).unwrap_or(f64::NAN)
        })
        .collect();

    let non_finite = scores.iter().filter(|z| !z.is_finite()).count();
    debug!(
        "Z-scored {} entries over {} distances ({} degenerate buckets, {} non-finite scores)",
        scores.len(),
        stats.len(),
        stats.degenerate_buckets(),
        non_finite
    );
    scores
}

/// Z-scored copy of `matrix` with identical coordinates
pub fn zscore_matrix(matrix: &SparseMatrix) -> MatrixResult<SparseMatrix> {
    matrix.with_values(zscore_values(matrix))
}
