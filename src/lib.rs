//! hic-longrange - Long-range contact detection for Hi-C matrices
//!
//! Finds clusters of unusually strong chromatin contacts in a binned Hi-C
//! contact matrix.
//!
//! # Pipeline
//!
//! - Per-distance z-score normalization of every stored entry
//! - Threshold filtering and DBSCAN clustering in matrix-coordinate space
//! - Mapping of clustered bin pairs to genomic coordinates
//!
//! # Example
//!
//! ```ignore
//! use hic_longrange::{detect_long_range_contacts, BinTable, DetectionParams, SparseMatrix};
//!
//! let bins = BinTable::uniform(&[("chr1", 400)], 100);
//! let matrix = SparseMatrix::from_triplets(4, vec![(0, 2, 10.0), (1, 3, 10.0), (0, 1, 1.0)])?;
//! let params = DetectionParams::new(1.0, 2.0, 1);
//!
//! let detection = detect_long_range_contacts(&matrix, &bins, &params)?;
//! for record in &detection.records {
//!     println!("{}", record);
//! }
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    detect_long_range_contacts, BinLookup, BinTable, ClusterAssignment, Detection,
    DetectionParams, DetectionStats, GenomicBin, LongRangeError, MappedClusterRecord,
    MatrixLayout, Result, SparseMatrix,
};
pub use formats::{run_detection, IndexBase, RunOptions};
