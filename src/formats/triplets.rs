//! Sparse triplet matrix adapter
//!
//! Reads `row col value` lines (HiC-Pro `.matrix` layout). Indices refer to
//! bins of the accompanying bin table and may be 0- or 1-based. Values are
//! contact counts and must be finite and non-negative. Duplicate coordinates
//! are summed and zero values dropped; see [`SparseMatrix::from_triplets`].

use crate::core::io::{field_bounds, is_skippable, open_text_reader, ByteLineIterator};
use crate::core::{MatrixLayout, MatrixParseError, MatrixResult, SparseMatrix};
use crate::formats::bins::IndexBase;
use log::info;
use std::io::BufRead;
use std::path::Path;

/// Parse a triplet matrix of dimension `dim` from any buffered reader
///
/// The returned matrix holds the entries as stored; apply a
/// [`MatrixLayout`] to expand them.
pub fn parse_matrix_reader<R: BufRead>(
    reader: R,
    dim: usize,
    base: IndexBase,
) -> MatrixResult<SparseMatrix> {
    let mut lines = ByteLineIterator::new(reader);
    let mut triplets = Vec::new();
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line() {
        let line = line?;
        line_number += 1;
        if is_skippable(line) {
            continue;
        }

        let bounds = field_bounds(line);
        if bounds.len() < 3 {
            return Err(MatrixParseError::InvalidLine {
                line: line_number,
                message: format!("expected 3 fields (row col value), found {}", bounds.len()),
            });
        }

        let row = index_field(line, bounds[0], "row", line_number, base)?;
        let col = index_field(line, bounds[1], "col", line_number, base)?;
        let text = text_field(line, bounds[2], "value", line_number)?;
        let value: f64 = text.parse().map_err(|_| MatrixParseError::InvalidNumber {
            line: line_number,
            field: "value",
            value: text.to_string(),
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(MatrixParseError::InvalidCount {
                line: line_number,
                value: text.to_string(),
            });
        }

        triplets.push((row, col, value));
    }

    SparseMatrix::from_triplets(dim, triplets)
}

fn text_field<'a>(
    line: &'a [u8],
    (start, end): (usize, usize),
    name: &'static str,
    line_number: usize,
) -> MatrixResult<&'a str> {
    std::str::from_utf8(&line[start..end]).map_err(|_| MatrixParseError::InvalidUtf8 {
        line: line_number,
        field: name,
    })
}

fn index_field(
    line: &[u8],
    bounds: (usize, usize),
    name: &'static str,
    line_number: usize,
    base: IndexBase,
) -> MatrixResult<usize> {
    let text = text_field(line, bounds, name, line_number)?;
    let index: usize = text.parse().map_err(|_| MatrixParseError::InvalidNumber {
        line: line_number,
        field: name,
        value: text.to_string(),
    })?;
    index
        .checked_sub(base.offset())
        .ok_or(MatrixParseError::ZeroIndexInOneBased { line: line_number })
}

/// Parse a triplet matrix file (plain, gzip or bzip2) and apply `layout`
pub fn parse_matrix_file(
    path: &Path,
    dim: usize,
    base: IndexBase,
    layout: MatrixLayout,
) -> MatrixResult<SparseMatrix> {
    if !path.exists() {
        return Err(MatrixParseError::FileNotFound(path.to_path_buf()));
    }
    let stored = parse_matrix_reader(open_text_reader(path)?, dim, base)?;
    let stored_entries = stored.nnz();
    let matrix = stored.with_layout(layout);
    info!(
        "Loaded {}x{} matrix from {}: {} stored entries, {} after {:?} expansion",
        dim,
        dim,
        path.display(),
        stored_entries,
        matrix.nnz(),
        layout
    );
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zero_based() {
        let data: &[u8] = b"0\t1\t5\n1\t1\t2.5\n";
        let m = parse_matrix_reader(data, 3, IndexBase::Zero).unwrap();
        let entries: Vec<_> = m.entries().map(|e| (e.row, e.col, e.value)).collect();
        assert_eq!(entries, vec![(0, 1, 5.0), (1, 1, 2.5)]);
        assert_eq!(m.dim(), 3);
    }

    #[test]
    fn test_parse_one_based_hicpro() {
        let data: &[u8] = b"1\t1\t10\n1\t3\t4\n2\t3\t1\n";
        let m = parse_matrix_reader(data, 3, IndexBase::One).unwrap();
        let entries: Vec<_> = m.entries().map(|e| (e.row, e.col, e.value)).collect();
        assert_eq!(entries, vec![(0, 0, 10.0), (0, 2, 4.0), (1, 2, 1.0)]);
    }

    #[test]
    fn test_zero_index_in_one_based_file() {
        let data: &[u8] = b"1\t2\t1\n0\t2\t1\n";
        assert!(matches!(
            parse_matrix_reader(data, 3, IndexBase::One),
            Err(MatrixParseError::ZeroIndexInOneBased { line: 2 })
        ));
    }

    #[test]
    fn test_index_out_of_bounds() {
        let data: &[u8] = b"0\t3\t1\n";
        assert!(matches!(
            parse_matrix_reader(data, 3, IndexBase::Zero),
            Err(MatrixParseError::IndexOutOfBounds { row: 0, col: 3, dim: 3 })
        ));
    }

    #[test]
    fn test_invalid_value() {
        let data: &[u8] = b"0\t1\tmany\n";
        assert!(matches!(
            parse_matrix_reader(data, 3, IndexBase::Zero),
            Err(MatrixParseError::InvalidNumber { line: 1, field: "value", .. })
        ));
    }

    #[test]
    fn test_nan_count_rejected() {
        let data: &[u8] = b"0\t1\t5\n1\t2\t7\n2\t3\tnan\n";
        assert!(matches!(
            parse_matrix_reader(data, 4, IndexBase::Zero),
            Err(MatrixParseError::InvalidCount { line: 3, ref value }) if value == "nan"
        ));
    }

    #[test]
    fn test_infinite_count_rejected() {
        let data: &[u8] = b"0\t1\tinf\n";
        assert!(matches!(
            parse_matrix_reader(data, 4, IndexBase::Zero),
            Err(MatrixParseError::InvalidCount { line: 1, .. })
        ));
    }

    #[test]
    fn test_negative_count_rejected() {
        let data: &[u8] = b"0\t1\t5\n0\t2\t-4\n";
        assert!(matches!(
            parse_matrix_reader(data, 4, IndexBase::Zero),
            Err(MatrixParseError::InvalidCount { line: 2, ref value }) if value == "-4"
        ));
    }

    #[test]
    fn test_zero_count_accepted_and_dropped() {
        let data: &[u8] = b"0\t1\t0\n0\t2\t3\n";
        let m = parse_matrix_reader(data, 4, IndexBase::Zero).unwrap();
        assert_eq!(m.nnz(), 1);
    }

    #[test]
    fn test_short_line() {
        let data: &[u8] = b"# header\n0\t1\n";
        assert!(matches!(
            parse_matrix_reader(data, 3, IndexBase::Zero),
            Err(MatrixParseError::InvalidLine { line: 2, .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let data: &[u8] = b"";
        let m = parse_matrix_reader(data, 4, IndexBase::Zero).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.dim(), 4);
    }

    #[test]
    fn test_missing_file() {
        let result = parse_matrix_file(
            Path::new("/nonexistent/contacts.matrix"),
            3,
            IndexBase::Zero,
            MatrixLayout::Full,
        );
        assert!(matches!(result, Err(MatrixParseError::FileNotFound(_))));
    }
}
