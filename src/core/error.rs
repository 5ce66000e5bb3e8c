//! Error types for hic-longrange
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for long-range contact detection
#[derive(Debug, Error)]
pub enum LongRangeError {
    /// Contact matrix parsing errors
    #[error("Matrix parse error: {0}")]
    MatrixParse(#[from] MatrixParseError),

    /// Bin table parsing errors
    #[error("Bin table parse error: {0}")]
    BinParse(#[from] BinParseError),

    /// Genomic coordinate mapping errors
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Rejected detection parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),

    /// Thread pool construction failed
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while reading or building a sparse contact matrix
#[derive(Debug, Error)]
pub enum MatrixParseError {
    /// Malformed triplet line
    #[error("Invalid matrix line at line {line}: {message}")]
    InvalidLine { line: usize, message: String },

    /// Failed to parse a numeric field
    #[error("Failed to parse {field} '{value}' at line {line}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Field is not valid UTF-8
    #[error("Invalid UTF-8 in {field} at line {line}")]
    InvalidUtf8 { line: usize, field: &'static str },

    /// Entry coordinate outside [0, N)
    #[error("Entry ({row}, {col}) is outside a {dim}x{dim} matrix")]
    IndexOutOfBounds { row: usize, col: usize, dim: usize },

    /// 1-based file contained a zero index
    #[error("Index 0 at line {line} in a 1-based matrix file")]
    ZeroIndexInOneBased { line: usize },

    /// Parallel arrays of different lengths
    #[error("Length mismatch: {rows} rows, {cols} cols, {values} values")]
    LengthMismatch {
        rows: usize,
        cols: usize,
        values: usize,
    },

    /// Per-distance statistics built for a matrix of another dimension
    #[error("Statistics cover {found} distances, matrix dimension is {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Value is negative or not a finite number
    #[error("Invalid contact count '{value}' at line {line}: must be finite and >= 0")]
    InvalidCount { line: usize, value: String },

    /// File not found
    #[error("Matrix file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while reading a bin table
#[derive(Debug, Error)]
pub enum BinParseError {
    /// Too few columns
    #[error("Expected at least 3 fields at line {line}, found {found}")]
    TooFewFields { line: usize, found: usize },

    /// Failed to parse a numeric field
    #[error("Failed to parse {field} '{value}' at line {line}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Field is not valid UTF-8
    #[error("Invalid UTF-8 in {field} at line {line}")]
    InvalidUtf8 { line: usize, field: &'static str },

    /// Bin with start > end
    #[error("Invalid bin range at line {line}: start ({start}) > end ({end})")]
    InvalidRange { line: usize, start: u64, end: u64 },

    /// Explicit index column is not a contiguous sequence
    #[error("Non-contiguous bin index at line {line}: expected {expected}, found {found}")]
    NonContiguousIndex {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// File not found
    #[error("Bin table not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while mapping clustered points to genomic coordinates
#[derive(Debug, Error)]
pub enum MappingError {
    /// Bin index has no entry in the lookup
    #[error("Bin {index} not found in bin table ({len} bins)")]
    BinNotFound { index: usize, len: usize },

    /// Labels and points are not parallel
    #[error("Cluster assignment has {labels} labels for {points} points")]
    LabelCountMismatch { labels: usize, points: usize },
}

/// Errors raised by detection parameter validation
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    /// DBSCAN radius must be finite and positive
    #[error("eps must be a finite value > 0, got {0}")]
    InvalidEps(f64),

    /// DBSCAN minimum neighbourhood must include at least the point itself
    #[error("min_samples must be >= 1, got {0}")]
    InvalidMinSamples(usize),

    /// A NaN threshold would reject every entry silently
    #[error("z-score threshold must not be NaN")]
    NanThreshold,
}

/// Result type alias for long-range detection operations
pub type Result<T> = std::result::Result<T, LongRangeError>;

/// Result type alias for matrix parsing operations
pub type MatrixResult<T> = std::result::Result<T, MatrixParseError>;

/// Result type alias for bin table parsing operations
pub type BinResult<T> = std::result::Result<T, BinParseError>;

/// Result type alias for mapping operations
pub type MappingResult<T> = std::result::Result<T, MappingError>;
