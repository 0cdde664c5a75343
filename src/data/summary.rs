use std::fmt;

use super::model::AnalysisResult;

// ---------------------------------------------------------------------------
// Summary – fixed set of labelled values for result panels
// ---------------------------------------------------------------------------

pub const LABEL_INITIAL_VOLTAGE: &str = "Initial Voltage";
pub const LABEL_MAX_VOLTAGE: &str = "Max Voltage";
pub const LABEL_MIN_VOLTAGE: &str = "Min Voltage";
pub const LABEL_SCAN_RATE: &str = "Scan Rate";
pub const LABEL_ELECTRODE_AREA: &str = "Electrode Area";
pub const LABEL_SENSITIVITY: &str = "Sensitivity";
pub const LABEL_VALID_CYCLES: &str = "Valid Cycles";
pub const LABEL_MEAN_CAPACITANCE: &str = "Mean Capacitance";
pub const LABEL_STD_DEV: &str = "Standard Deviation";

/// Values behind the summary labels. Units: V, V/s, cm², A/V, mF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub initial_voltage: Option<f64>,
    pub max_voltage: Option<f64>,
    pub min_voltage: Option<f64>,
    pub scan_rate: f64,
    pub electrode_area: f64,
    pub sensitivity: Option<f64>,
    pub valid_cycles: usize,
    pub total_cycles: usize,
    pub mean_capacitance: Option<f64>,
    pub std_dev: Option<f64>,
}

impl Summary {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let meta = result.metadata();
        let stats = result.statistics();
        Summary {
            initial_voltage: meta.initial_voltage,
            max_voltage: meta.max_voltage,
            min_voltage: meta.min_voltage,
            scan_rate: meta.scan_rate,
            electrode_area: meta.electrode_area,
            sensitivity: meta.sensitivity,
            valid_cycles: stats.valid_count,
            total_cycles: result.cycles().len(),
            mean_capacitance: stats.mean,
            std_dev: stats.std_dev,
        }
    }

    /// `(label, formatted value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (LABEL_INITIAL_VOLTAGE, opt(self.initial_voltage, "V")),
            (LABEL_MAX_VOLTAGE, opt(self.max_voltage, "V")),
            (LABEL_MIN_VOLTAGE, opt(self.min_voltage, "V")),
            (LABEL_SCAN_RATE, format!("{} V/s", self.scan_rate)),
            (LABEL_ELECTRODE_AREA, format!("{:.4} cm²", self.electrode_area)),
            (
                LABEL_SENSITIVITY,
                self.sensitivity
                    .map(|s| format!("{s:.0e} A/V"))
                    .unwrap_or_else(|| NA.to_string()),
            ),
            (
                LABEL_VALID_CYCLES,
                format!("{} / {}", self.valid_cycles, self.total_cycles),
            ),
            (LABEL_MEAN_CAPACITANCE, opt_fixed(self.mean_capacitance, "mF")),
            (LABEL_STD_DEV, opt_fixed(self.std_dev, "mF")),
        ]
    }
}

const NA: &str = "n/a";

fn opt(v: Option<f64>, unit: &str) -> String {
    v.map(|v| format!("{v} {unit}"))
        .unwrap_or_else(|| NA.to_string())
}

fn opt_fixed(v: Option<f64>, unit: &str) -> String {
    v.map(|v| format!("{v:.6} {unit}"))
        .unwrap_or_else(|| NA.to_string())
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.entries() {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Display unit for capacitance tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacitanceUnit {
    NanoFarad,
    MicroFarad,
    MilliFarad,
}

impl CapacitanceUnit {
    /// Pick the unit from the smallest capacitance (given in mF).
    pub fn for_values(values_mf: impl IntoIterator<Item = f64>) -> Self {
        let min = values_mf.into_iter().fold(f64::INFINITY, f64::min);
        if !min.is_finite() {
            return CapacitanceUnit::NanoFarad;
        }
        let min_nf = min * 1e6;
        if min_nf > 1e6 {
            CapacitanceUnit::MilliFarad
        } else if min_nf > 1e3 {
            CapacitanceUnit::MicroFarad
        } else {
            CapacitanceUnit::NanoFarad
        }
    }

    /// Multiply a value in mF by this to get the display unit.
    pub fn factor_from_mf(self) -> f64 {
        match self {
            CapacitanceUnit::NanoFarad => 1e6,
            CapacitanceUnit::MicroFarad => 1e3,
            CapacitanceUnit::MilliFarad => 1.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CapacitanceUnit::NanoFarad => "nF",
            CapacitanceUnit::MicroFarad => "µF",
            CapacitanceUnit::MilliFarad => "mF",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_follows_smallest_value() {
        assert_eq!(CapacitanceUnit::for_values([4.0, 4.4]), CapacitanceUnit::MilliFarad);
        assert_eq!(CapacitanceUnit::for_values([0.5, 4.4]), CapacitanceUnit::MicroFarad);
        assert_eq!(CapacitanceUnit::for_values([0.0005]), CapacitanceUnit::NanoFarad);
        assert_eq!(CapacitanceUnit::for_values([]), CapacitanceUnit::NanoFarad);
    }

    #[test]
    fn display_lists_every_label() {
        let summary = Summary {
            initial_voltage: Some(0.0),
            max_voltage: Some(0.8),
            min_voltage: None,
            scan_rate: 0.05,
            electrode_area: 0.01,
            sensitivity: Some(1e-5),
            valid_cycles: 2,
            total_cycles: 3,
            mean_capacitance: Some(4.2),
            std_dev: None,
        };
        let text = summary.to_string();
        for label in [
            LABEL_INITIAL_VOLTAGE,
            LABEL_MAX_VOLTAGE,
            LABEL_MIN_VOLTAGE,
            LABEL_SCAN_RATE,
            LABEL_ELECTRODE_AREA,
            LABEL_SENSITIVITY,
            LABEL_VALID_CYCLES,
            LABEL_MEAN_CAPACITANCE,
            LABEL_STD_DEV,
        ] {
            assert!(text.contains(&format!("{label}: ")), "missing {label}");
        }
        assert!(text.contains("Min Voltage: n/a"));
        assert!(text.contains("Valid Cycles: 2 / 3"));
        assert!(text.contains("Mean Capacitance: 4.200000 mF"));
    }
}
