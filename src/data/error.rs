use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// FormatError – fatal, aborts the import
// ---------------------------------------------------------------------------

/// The instrument text could not be turned into segments and metadata.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("file does not contain the 'Cyclic Voltammetry' experiment marker")]
    MissingExperimentMarker,

    #[error("file does not contain the 'Potential/V, Current/A' data header")]
    MissingDataHeader,

    #[error("scan rate is missing or not a number")]
    ScanRate,

    #[error("line {line}: expected two numbers, got '{content}'")]
    InvalidDataRow { line: usize, content: String },

    #[error("line {line}: data row appears before the first segment marker")]
    DataBeforeSegment { line: usize },

    #[error("segment {index} contains no samples")]
    EmptySegment { index: usize },

    #[error("found {found} segment(s), at least 2 are required for one cycle")]
    TooFewSegments { found: usize },
}

// ---------------------------------------------------------------------------
// ComputationError – per cycle, recorded on the cycle
// ---------------------------------------------------------------------------

/// Capacitance could not be derived for a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ComputationError {
    #[error("scan rate {0} V/s is not positive")]
    InvalidScanRate(f64),

    #[error("electrode area {0} cm² is not positive")]
    InvalidElectrodeArea(f64),
}

// ---------------------------------------------------------------------------
// SensitivityWarning – per cycle, collected as a warning list
// ---------------------------------------------------------------------------

/// A cycle contained at least one sample beyond the sensitivity bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensitivityWarning {
    pub cycle: usize,
    /// Largest absolute current seen in the cycle (A).
    pub peak_current: f64,
    /// `sensitivity * threshold_factor` (A).
    pub limit: f64,
}

impl fmt::Display for SensitivityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cycle {}: |I| = {:.3e} A exceeds the sensitivity limit {:.3e} A, cycle excluded",
            self.cycle, self.peak_current, self.limit
        )
    }
}
