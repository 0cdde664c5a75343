use std::cmp::Ordering;

use super::config::AnalysisConfig;
use super::error::SensitivityWarning;
use super::model::{Cycle, Exclusion, ExperimentMetadata, DEFAULT_SENSITIVITY};

// ---------------------------------------------------------------------------
// Pass 1: sensitivity bound
// ---------------------------------------------------------------------------

/// Exclude every valid cycle holding a sample with
/// `|current| > sensitivity * threshold_factor`.
///
/// Without a sensitivity value in the header [`DEFAULT_SENSITIVITY`] applies.
pub fn apply_sensitivity(
    cycles: &mut [Cycle],
    metadata: &ExperimentMetadata,
    config: &AnalysisConfig,
) -> Vec<SensitivityWarning> {
    let sensitivity = metadata.sensitivity.unwrap_or_else(|| {
        log::debug!("No sensitivity in header, assuming {DEFAULT_SENSITIVITY:e} A/V");
        DEFAULT_SENSITIVITY
    });
    let limit = sensitivity * config.sensitivity_threshold_factor;

    let mut warnings = Vec::new();
    for cycle in cycles.iter_mut().filter(|c| c.is_valid()) {
        let peak = cycle
            .samples()
            .map(|s| s.current.abs())
            .fold(0.0_f64, f64::max);
        if peak > limit {
            let warning = SensitivityWarning {
                cycle: cycle.index,
                peak_current: peak,
                limit,
            };
            log::warn!("{warning}");
            cycle.exclusion = Some(Exclusion::Sensitivity(warning));
            warnings.push(warning);
        }
    }
    warnings
}

// ---------------------------------------------------------------------------
// Pass 2: z-score outliers
// ---------------------------------------------------------------------------

/// Exclude up to `outlier_count` valid cycles with the largest `|z|`,
/// always leaving at least one valid cycle. Ties go to the lower index.
/// Returns the indices of the excluded cycles.
pub fn apply_outliers(cycles: &mut [Cycle], config: &AnalysisConfig) -> Vec<usize> {
    let valid: Vec<(usize, f64)> = cycles
        .iter()
        .enumerate()
        .filter_map(|(pos, c)| c.valid_capacitance().map(|v| (pos, v)))
        .collect();

    let budget = config.outlier_count.min(valid.len().saturating_sub(1));
    if budget == 0 {
        return Vec::new();
    }

    let values: Vec<f64> = valid.iter().map(|&(_, v)| v).collect();
    let mean = mean(&values);
    let sd = sample_std_dev(&values, mean);
    if sd == 0.0 || !sd.is_finite() {
        return Vec::new();
    }

    let mut ranked: Vec<(usize, f64)> = valid
        .iter()
        .map(|&(pos, v)| (pos, (v - mean) / sd))
        .collect();
    ranked.sort_by(|a, b| match b.1.abs().total_cmp(&a.1.abs()) {
        Ordering::Equal => cycles[a.0].index.cmp(&cycles[b.0].index),
        other => other,
    });

    ranked
        .into_iter()
        .take(budget)
        .map(|(pos, z_score)| {
            let cycle = &mut cycles[pos];
            log::info!("Cycle {} excluded as outlier (z = {z_score:.2})", cycle.index);
            cycle.exclusion = Some(Exclusion::Outlier { z_score });
            cycle.index
        })
        .collect()
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected; zero for fewer than two values.
pub(crate) fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::ComputationError;
    use crate::data::model::{RawSample, Segment};

    fn cycle(index: usize, capacitance: f64, peak_current: f64) -> Cycle {
        let seg = |i| Segment {
            index: i,
            samples: vec![RawSample::new(0.0, 0.0), RawSample::new(0.1, peak_current)],
        };
        let mut c = Cycle::new(index, seg(2 * index - 1), seg(2 * index));
        c.area = Some(0.0);
        c.capacitance = Some(capacitance);
        c
    }

    fn metadata(sensitivity: Option<f64>) -> ExperimentMetadata {
        ExperimentMetadata {
            scan_rate: 0.05,
            electrode_area: 0.01,
            sensitivity,
            initial_voltage: None,
            max_voltage: None,
            min_voltage: None,
            declared_segments: None,
            sample_interval: None,
        }
    }

    fn config(outlier_count: usize) -> AnalysisConfig {
        AnalysisConfig {
            outlier_count,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn saturated_cycle_is_excluded_regardless_of_capacitance() {
        let mut cycles = vec![
            cycle(1, 4.0, 5e-5),
            cycle(2, 4.0, 1.01e-4),
            cycle(3, 4.0, 1e-5 * 10.0),
        ];
        let warnings = apply_sensitivity(&mut cycles, &metadata(Some(1e-5)), &config(1));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].cycle, 2);
        assert!(matches!(cycles[1].exclusion, Some(Exclusion::Sensitivity(_))));
        // exactly at the limit is allowed
        assert!(cycles[2].is_valid());
    }

    #[test]
    fn negative_currents_count_as_magnitude() {
        let mut cycles = vec![cycle(1, 4.0, -2e-4)];
        let warnings = apply_sensitivity(&mut cycles, &metadata(Some(1e-5)), &config(0));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn missing_sensitivity_uses_default() {
        // default limit = 1e-5 A/V * 10 = 1e-4 A
        let mut cycles = vec![cycle(1, 4.0, 1e-3), cycle(2, 4.0, 5e-5)];
        let warnings = apply_sensitivity(&mut cycles, &metadata(None), &config(1));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].cycle, 1);
        assert_eq!(warnings[0].limit, DEFAULT_SENSITIVITY * 10.0);
        assert!(matches!(cycles[0].exclusion, Some(Exclusion::Sensitivity(_))));
        assert!(cycles[1].is_valid());
    }

    #[test]
    fn computation_failures_are_not_reclassified() {
        let mut cycles = vec![cycle(1, 4.0, 1.0)];
        cycles[0].capacitance = None;
        cycles[0].exclusion = Some(Exclusion::Computation(ComputationError::InvalidScanRate(0.0)));
        assert!(apply_sensitivity(&mut cycles, &metadata(Some(1e-5)), &config(1)).is_empty());
    }

    #[test]
    fn removes_largest_z_score() {
        let mut cycles = vec![
            cycle(1, 4.0, 0.0),
            cycle(2, 4.1, 0.0),
            cycle(3, 9.0, 0.0),
            cycle(4, 3.9, 0.0),
        ];
        assert_eq!(apply_outliers(&mut cycles, &config(1)), vec![3]);
        assert!(matches!(cycles[2].exclusion, Some(Exclusion::Outlier { z_score }) if z_score > 0.0));
        assert_eq!(cycles.iter().filter(|c| c.is_valid()).count(), 3);
    }

    #[test]
    fn never_exceeds_budget_or_empties_set() {
        let mut cycles = vec![cycle(1, 1.0, 0.0), cycle(2, 2.0, 0.0), cycle(3, 7.0, 0.0)];
        let removed = apply_outliers(&mut cycles, &config(10));
        assert_eq!(removed.len(), 2);
        assert_eq!(cycles.iter().filter(|c| c.is_valid()).count(), 1);

        let mut single = vec![cycle(1, 1.0, 0.0)];
        assert!(apply_outliers(&mut single, &config(3)).is_empty());
        assert!(single[0].is_valid());
    }

    #[test]
    fn identical_values_exclude_nothing() {
        let mut cycles = vec![cycle(1, 4.0, 0.0), cycle(2, 4.0, 0.0), cycle(3, 4.0, 0.0)];
        assert!(apply_outliers(&mut cycles, &config(2)).is_empty());
    }

    #[test]
    fn ties_prefer_lower_index() {
        // 1.0 and 3.0 are symmetric around the mean 2.0
        let mut cycles = vec![cycle(1, 3.0, 0.0), cycle(2, 2.0, 0.0), cycle(3, 1.0, 0.0)];
        assert_eq!(apply_outliers(&mut cycles, &config(1)), vec![1]);
    }

    #[test]
    fn sensitivity_exclusions_are_ignored_by_outlier_pass() {
        let mut cycles = vec![cycle(1, 3.0, 0.0), cycle(2, 100.0, 1.0), cycle(3, 5.0, 0.0)];
        apply_sensitivity(&mut cycles, &metadata(Some(1e-5)), &config(1));
        let removed = apply_outliers(&mut cycles, &config(1));
        // only cycles 1 and 3 are ranked; equal |z|, lower index wins
        assert_eq!(removed, vec![1]);
        assert!(matches!(cycles[1].exclusion, Some(Exclusion::Sensitivity(_))));
    }
}
