//! Bin table adapter
//!
//! Reads BED-like bin tables: `chrom start end [index]`, one bin per line.
//! HiC-Pro `_abs.bed` files carry a 1-based index in the 4th column; when an
//! index column is present it must count up contiguously from its first value
//! (0 or 1). Without it, bins are numbered by line order from 0. A column
//! header line before the first bin (cooler bin dumps) is skipped.

use crate::core::io::{field_bounds, is_skippable, open_text_reader, ByteLineIterator};
use crate::core::{BinParseError, BinResult, BinTable, GenomicBin};
use log::{debug, info};
use std::io::BufRead;
use std::path::Path;

/// Index base of a bin table's explicit index column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBase {
    Zero,
    One,
}

impl IndexBase {
    pub fn offset(self) -> usize {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }
}

/// Parsed bin table and the index base its index column used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinFile {
    pub table: BinTable,
    /// `None` when the file has no index column
    pub index_base: Option<IndexBase>,
}

/// Parse a bin table from any buffered reader
pub fn parse_bins_reader<R: BufRead>(reader: R) -> BinResult<BinFile> {
    let mut lines = ByteLineIterator::new(reader);
    let mut table = BinTable::default();
    let mut index_base = None;
    let mut has_index = None;
    let mut line_number = 0usize;

    while let Some(line) = lines.next_line() {
        let line = line?;
        line_number += 1;
        if is_skippable(line) {
            continue;
        }

        let bounds = field_bounds(line);
        if bounds.len() < 3 {
            return Err(BinParseError::TooFewFields {
                line: line_number,
                found: bounds.len(),
            });
        }
        // Column header (`chrom start end`) allowed before the first bin
        if table.is_empty() && is_header(line, &bounds) {
            debug!("Skipping bin table header at line {}", line_number);
            continue;
        }
        let chrom = text_field(line, bounds[0], "chrom", line_number)?;
        let start = number_field(line, bounds[1], "start", line_number)?;
        let end = number_field(line, bounds[2], "end", line_number)?;
        if start > end {
            return Err(BinParseError::InvalidRange {
                line: line_number,
                start,
                end,
            });
        }

        // The first data line decides whether the 4th column is an index
        let indexed = *has_index.get_or_insert_with(|| {
            bounds.len() >= 4
                && number_field(line, bounds[3], "index", line_number).map_or(false, |i| i <= 1)
        });
        if indexed {
            if bounds.len() < 4 {
                return Err(BinParseError::TooFewFields {
                    line: line_number,
                    found: bounds.len(),
                });
            }
            let found = number_field(line, bounds[3], "index", line_number)? as usize;
            let base = *index_base.get_or_insert(if found == 0 {
                IndexBase::Zero
            } else {
                IndexBase::One
            });
            let expected = table.len() + base.offset();
            if found != expected {
                return Err(BinParseError::NonContiguousIndex {
                    line: line_number,
                    expected,
                    found,
                });
            }
        }

        table.push(GenomicBin::new(chrom, start, end));
    }

    Ok(BinFile { table, index_base })
}

fn is_header(line: &[u8], bounds: &[(usize, usize)]) -> bool {
    bounds[1..3].iter().all(|&(start, end)| {
        std::str::from_utf8(&line[start..end]).map_or(true, |text| text.parse::<u64>().is_err())
    })
}

fn text_field<'a>(
    line: &'a [u8],
    (start, end): (usize, usize),
    name: &'static str,
    line_number: usize,
) -> BinResult<&'a str> {
    std::str::from_utf8(&line[start..end]).map_err(|_| BinParseError::InvalidUtf8 {
        line: line_number,
        field: name,
    })
}

fn number_field(
    line: &[u8],
    bounds: (usize, usize),
    name: &'static str,
    line_number: usize,
) -> BinResult<u64> {
    let text = text_field(line, bounds, name, line_number)?;
    text.parse().map_err(|_| BinParseError::InvalidNumber {
        line: line_number,
        field: name,
        value: text.to_string(),
    })
}

/// Parse a bin table file (plain, gzip or bzip2)
pub fn parse_bins_file(path: &Path) -> BinResult<BinFile> {
    if !path.exists() {
        return Err(BinParseError::FileNotFound(path.to_path_buf()));
    }
    let bins = parse_bins_reader(open_text_reader(path)?)?;
    info!("Loaded {} bins from {}", bins.table.len(), path.display());
    Ok(bins)
}
