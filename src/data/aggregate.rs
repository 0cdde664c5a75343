use super::filter::{mean, sample_std_dev};
use super::model::{Cycle, CycleStatistics};

/// Statistics over the cycles still marked valid.
pub fn aggregate(cycles: &[Cycle]) -> CycleStatistics {
    let values: Vec<f64> = cycles.iter().filter_map(Cycle::valid_capacitance).collect();
    if values.is_empty() {
        return CycleStatistics::default();
    }

    let mean = mean(&values);
    let std_dev = sample_std_dev(&values, mean);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let coefficient_of_variation = (mean != 0.0).then(|| std_dev / mean * 100.0);

    CycleStatistics {
        valid_count: values.len(),
        mean: Some(mean),
        std_dev: Some(std_dev),
        min: Some(min),
        max: Some(max),
        coefficient_of_variation,
    }
}
