//! Cluster record output and file-level detection
//!
//! Output is tab-separated, one record per line, no header:
//!
//! ```text
//! chrom_x  start_x  end_x  chrom_y  start_y  end_y  cluster_id
//! ```

use crate::core::{
    detect_long_range_contacts, DetectionParams, DetectionStats, LongRangeError,
    MappedClusterRecord, MatrixLayout, Result,
};
use crate::formats::bins::{parse_bins_file, IndexBase};
use crate::formats::triplets::parse_matrix_file;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write records as TSV lines, returning the number written
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[MappedClusterRecord],
) -> io::Result<usize> {
    for record in records {
        writeln!(writer, "{}", record)?;
    }
    Ok(records.len())
}

/// Write records to `path`, replacing any existing file
pub fn write_records_file(path: &Path, records: &[MappedClusterRecord]) -> io::Result<usize> {
    let mut output = BufWriter::with_capacity(128 * 1024, File::create(path)?);
    let written = write_records(&mut output, records)?;
    output.flush()?;
    Ok(written)
}

/// Options for a file-to-file detection run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub params: DetectionParams,
    pub layout: MatrixLayout,
    /// Matrix index base; `None` follows the bin table's index column
    pub index_base: Option<IndexBase>,
    /// Worker threads for the parallel stages
    pub threads: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            params: DetectionParams::default(),
            layout: MatrixLayout::default(),
            index_base: None,
            threads: 1,
        }
    }
}

/// Load a bin table and triplet matrix, detect contacts, write the records
pub fn run_detection<M, B, O>(
    matrix: M,
    bins: B,
    output: O,
    options: &RunOptions,
) -> Result<DetectionStats>
where
    M: AsRef<Path>,
    B: AsRef<Path>,
    O: AsRef<Path>,
{
    options.params.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads.max(1))
        .build()
        .map_err(|e| LongRangeError::ThreadPool(e.to_string()))?;

    let bin_file = parse_bins_file(bins.as_ref())?;
    let base = options
        .index_base
        .or(bin_file.index_base)
        .unwrap_or(IndexBase::Zero);
    let matrix = parse_matrix_file(
        matrix.as_ref(),
        bin_file.table.len(),
        base,
        options.layout,
    )?;

    let detection =
        pool.install(|| detect_long_range_contacts(&matrix, &bin_file.table, &options.params))?;

    let written = write_records_file(output.as_ref(), &detection.records)?;
    info!("Wrote {} records to {}", written, output.as_ref().display());
    Ok(detection.stats)
}
