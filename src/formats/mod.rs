//! File format adapters
//!
//! Bin tables and triplet matrices in, tab-separated cluster records out.

pub mod bins;
pub mod clusters;
pub mod triplets;

pub use bins::{parse_bins_file, parse_bins_reader, BinFile, IndexBase};
pub use clusters::{run_detection, write_records, write_records_file, RunOptions};
pub use triplets::{parse_matrix_file, parse_matrix_reader};
