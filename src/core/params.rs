//! Detection parameters

use crate::core::error::ParameterError;

/// Default minimum z-score for a contact to be kept
pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 2.0;

/// Default DBSCAN neighbourhood radius, in bins
pub const DEFAULT_EPS: f64 = 2.0;

/// Default DBSCAN minimum neighbourhood size (point itself included)
pub const DEFAULT_MIN_SAMPLES: usize = 2;

/// Thresholding and clustering parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// Entries with `zscore >= zscore_threshold` survive
    pub zscore_threshold: f64,
    /// DBSCAN radius in (row, col) bin space
    pub eps: f64,
    /// DBSCAN core point neighbourhood size
    pub min_samples: usize,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            zscore_threshold: DEFAULT_ZSCORE_THRESHOLD,
            eps: DEFAULT_EPS,
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

impl DetectionParams {
    pub fn new(zscore_threshold: f64, eps: f64, min_samples: usize) -> Self {
        Self {
            zscore_threshold,
            eps,
            min_samples,
        }
    }

    /// Reject parameters DBSCAN cannot run with
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.zscore_threshold.is_nan() {
            return Err(ParameterError::NanThreshold);
        }
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(ParameterError::InvalidEps(self.eps));
        }
        if self.min_samples == 0 {
            return Err(ParameterError::InvalidMinSamples(self.min_samples));
        }
        Ok(())
    }
}
