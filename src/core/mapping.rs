//! Cluster-to-genome coordinate mapping
//!
//! Each clustered (row, col) point becomes one record pairing the genomic
//! intervals of its two bins. Noise points are dropped; records keep the
//! order of the input points and carry the point's own cluster label.

use crate::core::bins::{BinLookup, GenomicBin};
use crate::core::contacts::FilteredPoint;
use crate::core::dbscan::{ClusterAssignment, NOISE};
use crate::core::error::{MappingError, MappingResult};
use std::fmt;

/// One clustered contact in genomic coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedClusterRecord {
    pub chrom_x: String,
    pub start_x: u64,
    pub end_x: u64,
    pub chrom_y: String,
    pub start_y: u64,
    pub end_y: u64,
    pub cluster_id: usize,
}

impl MappedClusterRecord {
    fn from_bins(x: &GenomicBin, y: &GenomicBin, cluster_id: usize) -> Self {
        Self {
            chrom_x: x.chrom.clone(),
            start_x: x.start,
            end_x: x.end,
            chrom_y: y.chrom.clone(),
            start_y: y.start,
            end_y: y.end,
            cluster_id,
        }
    }

    /// Format as a tab-separated line (no trailing newline)
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MappedClusterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom_x,
            self.start_x,
            self.end_x,
            self.chrom_y,
            self.start_y,
            self.end_y,
            self.cluster_id
        )
    }
}

/// Map every non-noise point to a genomic-coordinate record
pub fn map_clusters<L>(
    points: &[FilteredPoint],
    assignment: &ClusterAssignment,
    lookup: &L,
) -> MappingResult<Vec<MappedClusterRecord>>
where
    L: BinLookup + ?Sized,
{
    if assignment.len() != points.len() {
        return Err(MappingError::LabelCountMismatch {
            labels: assignment.len(),
            points: points.len(),
        });
    }

    let resolve = |index: usize| {
        lookup.bin(index).ok_or(MappingError::BinNotFound {
            index,
            len: lookup.bin_count(),
        })
    };

    let mut records = Vec::with_capacity(points.len() - assignment.noise_count());
    for (point, &label) in points.iter().zip(assignment.labels()) {
        if label == NOISE {
            continue;
        }
        let x = resolve(point.row)?;
        let y = resolve(point.col)?;
        records.push(MappedClusterRecord::from_bins(x, y, label as usize));
    }
    Ok(records)
}
