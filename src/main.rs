//! hic-longrange CLI entry point
//!
//! Detects clusters of long-range contacts in a Hi-C triplet matrix.

use clap::{Parser, ValueEnum};
use hic_longrange::core::{
    DetectionParams, MatrixLayout, DEFAULT_EPS, DEFAULT_MIN_SAMPLES, DEFAULT_ZSCORE_THRESHOLD,
};
use hic_longrange::formats::{self, IndexBase, RunOptions};
use std::path::PathBuf;
use std::time::Instant;

/// Storage layout of the input matrix (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum LayoutArg {
    /// Upper triangle only (HiC-Pro); off-diagonal entries are mirrored
    #[default]
    #[value(name = "upper")]
    Upper,
    /// Every entry stored explicitly
    #[value(name = "full")]
    Full,
}

impl From<LayoutArg> for MatrixLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Upper => MatrixLayout::UpperTriangle,
            LayoutArg::Full => MatrixLayout::Full,
        }
    }
}

/// Index base of the matrix file (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum IndexBaseArg {
    /// Follow the bin table's index column, 0-based without one
    #[default]
    #[value(name = "auto")]
    Auto,
    #[value(name = "0")]
    Zero,
    #[value(name = "1")]
    One,
}

impl From<IndexBaseArg> for Option<IndexBase> {
    fn from(arg: IndexBaseArg) -> Self {
        match arg {
            IndexBaseArg::Auto => None,
            IndexBaseArg::Zero => Some(IndexBase::Zero),
            IndexBaseArg::One => Some(IndexBase::One),
        }
    }
}

#[derive(Parser)]
#[command(name = "hic-longrange")]
#[command(about = "Detect long-range contact clusters in Hi-C matrices")]
#[command(version)]
struct Cli {
    /// Sparse contact matrix (row col value)
    #[arg(short = 'm', long)]
    matrix: PathBuf,

    /// Bin table (chrom start end [index])
    #[arg(short = 'b', long)]
    bins: PathBuf,

    /// Output TSV of clustered contacts
    #[arg(short = 'o', long = "out-file-name", alias = "outFileName")]
    out_file_name: PathBuf,

    /// Minimum z-score for a contact to be clustered
    #[arg(
        short = 'z',
        long = "zscore-threshold",
        alias = "zScoreThreshold",
        default_value_t = DEFAULT_ZSCORE_THRESHOLD,
        allow_negative_numbers = true
    )]
    zscore_threshold: f64,

    /// DBSCAN neighbourhood radius in matrix coordinates
    #[arg(short = 'e', long = "eps-dbscan", alias = "epsDbscan", default_value_t = DEFAULT_EPS)]
    eps: f64,

    /// DBSCAN minimum neighbourhood size, the point itself included
    #[arg(
        short = 's',
        long = "min-samples-dbscan",
        alias = "minSamplesDbscan",
        default_value_t = DEFAULT_MIN_SAMPLES
    )]
    min_samples: usize,

    /// Matrix storage layout
    #[arg(long, default_value = "upper")]
    layout: LayoutArg,

    /// Matrix index base: auto, 0 or 1
    #[arg(long = "index-base", default_value = "auto")]
    index_base: IndexBaseArg,

    /// Number of threads
    #[arg(short = 't', long, default_value = "1")]
    threads: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let options = RunOptions {
        params: DetectionParams::new(cli.zscore_threshold, cli.eps, cli.min_samples),
        layout: cli.layout.into(),
        index_base: cli.index_base.into(),
        threads: cli.threads,
    };

    eprintln!(
        "Detecting long-range contacts: {:?} + {:?} -> {:?}",
        cli.matrix, cli.bins, cli.out_file_name
    );
    eprintln!(
        "Parameters: zscore_threshold={} eps={} min_samples={}",
        options.params.zscore_threshold, options.params.eps, options.params.min_samples
    );

    let stats = formats::run_detection(&cli.matrix, &cli.bins, &cli.out_file_name, &options)
        .map_err(|e| anyhow::anyhow!("Detection failed: {}", e))?;

    eprintln!("\n=== Detection Statistics ===");
    eprintln!("Matrix entries:  {}", stats.entries);
    eprintln!("Degenerate:      {}", stats.non_finite);
    eprintln!("Survivors:       {}", stats.survivors);
    eprintln!("Clusters:        {}", stats.clusters);
    eprintln!("Noise points:    {}", stats.noise);
    eprintln!("Records written: {}", stats.records);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
