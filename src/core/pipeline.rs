//! End-to-end detection: normalize, threshold, cluster, map

use crate::core::bins::BinLookup;
use crate::core::contacts::cluster_contacts;
use crate::core::error::Result;
use crate::core::mapping::{map_clusters, MappedClusterRecord};
use crate::core::matrix::SparseMatrix;
use crate::core::params::DetectionParams;
use crate::core::zscore::{zscore_values_with, DistanceStats};
use log::info;

/// Counters collected over one detection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionStats {
    /// Stored matrix entries
    pub entries: usize,
    /// Entries whose z-score is NaN or infinite
    pub non_finite: usize,
    /// Entries passing the z-score threshold
    pub survivors: usize,
    /// Clusters found among the survivors
    pub clusters: usize,
    /// Survivors labelled as noise
    pub noise: usize,
    /// Records produced (survivors minus noise)
    pub records: usize,
}

/// Records plus run statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub records: Vec<MappedClusterRecord>,
    pub stats: DetectionStats,
}

/// Run the whole detection pipeline on an in-memory matrix
pub fn detect_long_range_contacts<L>(
    matrix: &SparseMatrix,
    bins: &L,
    params: &DetectionParams,
) -> Result<Detection>
where
    L: BinLookup + ?Sized,
{
    params.validate()?;
    info!(
        "Detecting long-range contacts in {}x{} matrix with {} entries",
        matrix.dim(),
        matrix.dim(),
        matrix.nnz()
    );

    let stats = DistanceStats::from_matrix(matrix);
    let zscored = matrix.with_values(zscore_values_with(matrix, &stats)?)?;
    let non_finite = zscored.values().iter().filter(|z| !z.is_finite()).count();

    let clusters = cluster_contacts(&zscored, params);
    let records = map_clusters(&clusters.points, &clusters.assignment, bins)?;

    let stats = DetectionStats {
        entries: matrix.nnz(),
        non_finite,
        survivors: clusters.points.len(),
        clusters: clusters.assignment.n_clusters(),
        noise: clusters.assignment.noise_count(),
        records: records.len(),
    };
    info!(
        "Found {} clusters ({} records, {} noise points)",
        stats.clusters, stats.records, stats.noise
    );

    Ok(Detection { records, stats })
}
