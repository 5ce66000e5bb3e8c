//! Sparse contact matrix
//!
//! Square Hi-C contact matrix in coordinate layout: three parallel arrays
//! (row, col, value) holding only the observed (nonzero) entries. Absent
//! entries are zero, never "unknown".

use crate::core::error::{MatrixParseError, MatrixResult};
use log::{debug, warn};

/// A single stored entry of the contact matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

impl Entry {
    /// Genomic distance in bins, `|row - col|`
    #[inline]
    pub fn distance(&self) -> usize {
        self.row.abs_diff(self.col)
    }
}

/// How the stored entries relate to the full symmetric matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixLayout {
    /// Only the upper triangle (row <= col) is stored and gets mirrored
    #[default]
    UpperTriangle,
    /// Entries are taken exactly as stored
    Full,
}

/// Square sparse contact matrix over `dim` genomic bins
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    dim: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<f64>,
}

impl SparseMatrix {
    /// Matrix of dimension `dim` with no observed entries
    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            rows: Vec::new(),
            cols: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from parallel arrays, keeping the given entry order
    pub fn from_parts(
        dim: usize,
        rows: Vec<usize>,
        cols: Vec<usize>,
        values: Vec<f64>,
    ) -> MatrixResult<Self> {
        if rows.len() != cols.len() || rows.len() != values.len() {
            return Err(MatrixParseError::LengthMismatch {
                rows: rows.len(),
                cols: cols.len(),
                values: values.len(),
            });
        }
        for (&row, &col) in rows.iter().zip(&cols) {
            check_bounds(row, col, dim)?;
        }
        Ok(Self {
            dim,
            rows,
            cols,
            values,
        })
    }

    /// Build a canonical matrix from `(row, col, value)` triplets
    ///
    /// Duplicate coordinates are summed in input order, zero sums are dropped
    /// and the result is sorted row-major.
    pub fn from_triplets<I>(dim: usize, triplets: I) -> MatrixResult<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut collected = Vec::new();
        for (row, col, value) in triplets {
            check_bounds(row, col, dim)?;
            collected.push((row, col, value));
        }
        Ok(Self::canonical(dim, collected))
    }

    fn canonical(dim: usize, mut triplets: Vec<(usize, usize, f64)>) -> Self {
        // Stable sort keeps duplicate summation in input order
        triplets.sort_by_key(|&(row, col, _)| (row, col));

        let mut matrix = Self::empty(dim);
        matrix.rows.reserve(triplets.len());
        matrix.cols.reserve(triplets.len());
        matrix.values.reserve(triplets.len());

        let mut merged = 0usize;
        for (row, col, value) in triplets {
            let last = matrix.rows.len().checked_sub(1);
            match last {
                Some(i) if matrix.rows[i] == row && matrix.cols[i] == col => {
                    matrix.values[i] += value;
                    merged += 1;
                }
                _ => {
                    matrix.rows.push(row);
                    matrix.cols.push(col);
                    matrix.values.push(value);
                }
            }
        }
        if merged > 0 {
            debug!("Merged {} duplicate matrix entries", merged);
        }
        matrix.drop_zeros();
        matrix
    }

    fn drop_zeros(&mut self) {
        let mut keep = 0;
        for i in 0..self.values.len() {
            if self.values[i] != 0.0 {
                self.rows[keep] = self.rows[i];
                self.cols[keep] = self.cols[i];
                self.values[keep] = self.values[i];
                keep += 1;
            }
        }
        self.rows.truncate(keep);
        self.cols.truncate(keep);
        self.values.truncate(keep);
    }

    /// Expand stored entries into the full symmetric matrix
    ///
    /// With [`MatrixLayout::UpperTriangle`], entries below the diagonal are
    /// ignored and every off-diagonal entry is mirrored. With
    /// [`MatrixLayout::Full`] the matrix is returned unchanged.
    pub fn with_layout(self, layout: MatrixLayout) -> Self {
        match layout {
            MatrixLayout::Full => self,
            MatrixLayout::UpperTriangle => self.symmetrized(),
        }
    }

    fn symmetrized(&self) -> Self {
        let mut triplets = Vec::with_capacity(self.nnz() * 2);
        let mut ignored = 0usize;
        for entry in self.entries() {
            if entry.row > entry.col {
                ignored += 1;
                continue;
            }
            triplets.push((entry.row, entry.col, entry.value));
            if entry.row != entry.col {
                triplets.push((entry.col, entry.row, entry.value));
            }
        }
        if ignored > 0 {
            warn!(
                "Ignored {} entries below the diagonal of an upper-triangle matrix",
                ignored
            );
        }
        Self::canonical(self.dim, triplets)
    }

    /// Same coordinates, new values (side-effect-free replacement)
    pub fn with_values(&self, values: Vec<f64>) -> MatrixResult<Self> {
        if values.len() != self.values.len() {
            return Err(MatrixParseError::LengthMismatch {
                rows: self.rows.len(),
                cols: self.cols.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            dim: self.dim,
            rows: self.rows.clone(),
            cols: self.cols.clone(),
            values,
        })
    }

    /// Matrix dimension N
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Entry at storage position `i`
    pub fn entry(&self, i: usize) -> Option<Entry> {
        Some(Entry {
            row: *self.rows.get(i)?,
            col: self.cols[i],
            value: self.values[i],
        })
    }

    /// Iterate stored entries in storage order
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .map(|((&row, &col), &value)| Entry { row, col, value })
    }
}

fn check_bounds(row: usize, col: usize, dim: usize) -> MatrixResult<()> {
    if row >= dim || col >= dim {
        return Err(MatrixParseError::IndexOutOfBounds { row, col, dim });
    }
    Ok(())
}
