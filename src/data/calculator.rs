use super::error::ComputationError;
use super::model::{Cycle, Exclusion, ExperimentMetadata, RawSample};

/// Signed trapezoidal integral of current over potential around a closed
/// loop. The last sample connects back to the first.
pub fn signed_loop_area<'a, I>(samples: I) -> f64
where
    I: IntoIterator<Item = &'a RawSample>,
{
    let mut iter = samples.into_iter();
    let Some(first) = iter.next() else {
        return 0.0;
    };

    let trapezoid = |a: &RawSample, b: &RawSample| {
        (b.potential - a.potential) * (a.current + b.current) / 2.0
    };

    let mut sum = 0.0;
    let mut prev = first;
    for s in iter {
        sum += trapezoid(prev, s);
        prev = s;
    }
    sum + trapezoid(prev, first)
}

/// `area / (scan_rate * electrode_area)`, scaled from F to mF.
pub fn capacitance_mf(
    area: f64,
    scan_rate: f64,
    electrode_area: f64,
) -> Result<f64, ComputationError> {
    if !(scan_rate > 0.0 && scan_rate.is_finite()) {
        return Err(ComputationError::InvalidScanRate(scan_rate));
    }
    if !(electrode_area > 0.0 && electrode_area.is_finite()) {
        return Err(ComputationError::InvalidElectrodeArea(electrode_area));
    }
    Ok(area / (scan_rate * electrode_area) * 1000.0)
}

/// Fill in area and capacitance for every cycle. A cycle whose capacitance
/// cannot be derived is marked excluded with the computation error.
pub fn compute(cycles: &mut [Cycle], metadata: &ExperimentMetadata) {
    for cycle in cycles.iter_mut() {
        let area = signed_loop_area(cycle.samples()).abs();
        cycle.area = Some(area);
        match capacitance_mf(area, metadata.scan_rate, metadata.electrode_area) {
            Ok(c) => cycle.capacitance = Some(c),
            Err(e) => {
                log::warn!("Cycle {}: {e}", cycle.index);
                cycle.capacitance = None;
                cycle.exclusion = Some(Exclusion::Computation(e));
            }
        }
    }
}
