//! Genomic bin lookup
//!
//! Resolves matrix indices to `(chromosome, start, end)` intervals.

/// A fixed genomic interval used as a matrix index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicBin {
    pub chrom: String,
    /// 0-based start
    pub start: u64,
    /// Exclusive end
    pub end: u64,
}

impl GenomicBin {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }
}

/// Index -> genomic interval resolution
pub trait BinLookup {
    /// Bin at matrix index `index`, if any
    fn bin(&self, index: usize) -> Option<&GenomicBin>;

    /// Number of bins known to the lookup
    fn bin_count(&self) -> usize;
}

/// Ordered table of bins; position in the table is the matrix index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinTable {
    bins: Vec<GenomicBin>,
}

impl BinTable {
    pub fn new(bins: Vec<GenomicBin>) -> Self {
        Self { bins }
    }

    /// Equal-width bins tiling each chromosome in order
    ///
    /// The last bin of a chromosome is truncated at the chromosome end.
    pub fn uniform(chrom_sizes: &[(&str, u64)], bin_size: u64) -> Self {
        let mut bins = Vec::new();
        if bin_size == 0 {
            return Self { bins };
        }
        for &(chrom, size) in chrom_sizes {
            let mut start = 0;
            while start < size {
                let end = (start + bin_size).min(size);
                bins.push(GenomicBin::new(chrom, start, end));
                start = end;
            }
        }
        Self { bins }
    }

    pub fn push(&mut self, bin: GenomicBin) {
        self.bins.push(bin);
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenomicBin> {
        self.bins.iter()
    }
}

impl BinLookup for BinTable {
    fn bin(&self, index: usize) -> Option<&GenomicBin> {
        self.bins.get(index)
    }

    fn bin_count(&self) -> usize {
        self.bins.len()
    }
}
