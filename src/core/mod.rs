//! Core long-range contact detection
//!
//! This module contains the sparse matrix model, per-distance z-score
//! normalization, threshold filtering, DBSCAN clustering and the mapping of
//! clusters back to genomic coordinates.

mod bins;
mod contacts;
pub mod dbscan;
mod error;
pub mod io;
mod mapping;
mod matrix;
mod params;
mod pipeline;
pub mod zscore;

pub use bins::{BinLookup, BinTable, GenomicBin};
pub use contacts::{
    cluster_contacts, coordinate_distances, filter_by_threshold, ContactClusters, FilteredPoint,
};
pub use dbscan::{dbscan, ClusterAssignment, DistanceMatrix, NOISE};
pub use error::{
    BinParseError, BinResult, LongRangeError, MappingError, MappingResult, MatrixParseError,
    MatrixResult, ParameterError, Result,
};
pub use mapping::{map_clusters, MappedClusterRecord};
pub use matrix::{Entry, MatrixLayout, SparseMatrix};
pub use params::{DetectionParams, DEFAULT_EPS, DEFAULT_MIN_SAMPLES, DEFAULT_ZSCORE_THRESHOLD};
pub use pipeline::{detect_long_range_contacts, Detection, DetectionStats};
pub use zscore::{zscore_matrix, zscore_values, DistanceStats};
