use std::fmt;

use super::error::{ComputationError, SensitivityWarning};

// ---------------------------------------------------------------------------
// RawSample / Segment – what the parser produces
// ---------------------------------------------------------------------------

/// One instrument reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    /// Potential (V).
    pub potential: f64,
    /// Current (A).
    pub current: f64,
}

impl RawSample {
    pub fn new(potential: f64, current: f64) -> Self {
        Self { potential, current }
    }
}

/// One instrument-reported sweep, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// 1-based position of the segment in the file.
    pub index: usize,
    pub samples: Vec<RawSample>,
}

// ---------------------------------------------------------------------------
// ExperimentMetadata
// ---------------------------------------------------------------------------

/// Electrode area assumed when neither the file nor the caller supplies one (cm²).
pub const DEFAULT_ELECTRODE_AREA: f64 = 0.01;

/// Sensitivity assumed when the header has none (A/V).
pub const DEFAULT_SENSITIVITY: f64 = 1e-5;

/// Scalar experiment parameters read from the file header.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentMetadata {
    /// Scan rate (V/s).
    pub scan_rate: f64,
    /// Electrode area actually used for capacitance (cm²).
    pub electrode_area: f64,
    /// Full-scale current setting (A/V). `None` when the header has none;
    /// the saturation check then uses [`DEFAULT_SENSITIVITY`].
    pub sensitivity: Option<f64>,
    pub initial_voltage: Option<f64>,
    pub max_voltage: Option<f64>,
    pub min_voltage: Option<f64>,
    /// Segment count declared by the instrument header.
    pub declared_segments: Option<usize>,
    pub sample_interval: Option<f64>,
}

// ---------------------------------------------------------------------------
// Cycle
// ---------------------------------------------------------------------------

/// Why a cycle does not contribute to the statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Exclusion {
    /// Capacitance could not be computed.
    Computation(ComputationError),
    /// A sample exceeded the sensitivity bound.
    Sensitivity(SensitivityWarning),
    /// Removed by the z-score pass.
    Outlier { z_score: f64 },
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Computation(e) => write!(f, "computation error: {e}"),
            Exclusion::Sensitivity(w) => {
                write!(f, "sensitivity violation (|I| = {:.3e} A)", w.peak_current)
            }
            Exclusion::Outlier { z_score } => write!(f, "outlier (z = {z_score:.2})"),
        }
    }
}

/// A forward + reverse sweep pair analysed as one closed loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Cycle {
    /// 1-based, sequential.
    pub index: usize,
    pub forward: Segment,
    pub reverse: Segment,
    /// Enclosed area (C), set by the calculator.
    pub area: Option<f64>,
    /// Capacitance (mF), set by the calculator when computable.
    pub capacitance: Option<f64>,
    /// `None` while the cycle counts as valid.
    pub exclusion: Option<Exclusion>,
}

impl Cycle {
    pub fn new(index: usize, forward: Segment, reverse: Segment) -> Self {
        Self {
            index,
            forward,
            reverse,
            area: None,
            capacitance: None,
            exclusion: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.exclusion.is_none() && self.capacitance.is_some()
    }

    /// Forward samples followed by reverse samples, in original order.
    pub fn samples(&self) -> impl Iterator<Item = &RawSample> + '_ {
        self.forward.samples.iter().chain(self.reverse.samples.iter())
    }

    /// Capacitance only when the cycle is valid.
    pub fn valid_capacitance(&self) -> Option<f64> {
        if self.exclusion.is_none() {
            self.capacitance
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisResult – the terminal snapshot handed to consumers
// ---------------------------------------------------------------------------

/// Aggregate statistics over the valid cycles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CycleStatistics {
    pub valid_count: usize,
    /// Mean capacitance (mF); `None` when no cycle is valid.
    pub mean: Option<f64>,
    /// Sample standard deviation (mF); zero for a single valid cycle.
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// `std_dev / mean` in percent.
    pub coefficient_of_variation: Option<f64>,
}

/// Curve data of one cycle for plotting.
#[derive(Debug, Clone, Copy)]
pub struct CycleCurve<'a> {
    pub index: usize,
    pub forward: &'a [RawSample],
    pub reverse: &'a [RawSample],
    pub valid: bool,
}

/// Everything a single import produced. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    cycles: Vec<Cycle>,
    metadata: ExperimentMetadata,
    statistics: CycleStatistics,
}

impl AnalysisResult {
    pub(crate) fn new(
        cycles: Vec<Cycle>,
        metadata: ExperimentMetadata,
        statistics: CycleStatistics,
    ) -> Self {
        Self {
            cycles,
            metadata,
            statistics,
        }
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn metadata(&self) -> &ExperimentMetadata {
        &self.metadata
    }

    pub fn statistics(&self) -> &CycleStatistics {
        &self.statistics
    }

    /// Look up a cycle by its 1-based index.
    pub fn cycle(&self, index: usize) -> Option<&Cycle> {
        index
            .checked_sub(1)
            .and_then(|i| self.cycles.get(i))
            .filter(|c| c.index == index)
    }

    /// Sample sequences of one cycle, keyed by cycle index.
    pub fn curve(&self, index: usize) -> Option<CycleCurve<'_>> {
        self.cycle(index).map(curve_of)
    }

    pub fn curves(&self) -> impl Iterator<Item = CycleCurve<'_>> + '_ {
        self.cycles.iter().map(curve_of)
    }

    /// Non-blocking warnings for cycles dropped by the sensitivity check.
    pub fn warnings(&self) -> Vec<SensitivityWarning> {
        self.cycles
            .iter()
            .filter_map(|c| match c.exclusion {
                Some(Exclusion::Sensitivity(w)) => Some(w),
                _ => None,
            })
            .collect()
    }

    pub fn excluded_count(&self) -> usize {
        self.cycles.len() - self.statistics.valid_count
    }
}

fn curve_of(cycle: &Cycle) -> CycleCurve<'_> {
    CycleCurve {
        index: cycle.index,
        forward: &cycle.forward.samples,
        reverse: &cycle.reverse.samples,
        valid: cycle.is_valid(),
    }
}
