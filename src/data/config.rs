use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Analysis parameters supplied by the host application
// ---------------------------------------------------------------------------

pub const DEFAULT_OUTLIER_COUNT: usize = 1;
pub const DEFAULT_SENSITIVITY_THRESHOLD_FACTOR: f64 = 10.0;

/// Caller overrides for one analysis run. Absent fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Electrode area (cm²). Overrides the value found in the file.
    pub electrode_area: Option<f64>,
    /// Maximum number of cycles the z-score pass may exclude.
    pub outlier_count: usize,
    /// Currents above `sensitivity * factor` invalidate the cycle.
    pub sensitivity_threshold_factor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            electrode_area: None,
            outlier_count: DEFAULT_OUTLIER_COUNT,
            sensitivity_threshold_factor: DEFAULT_SENSITIVITY_THRESHOLD_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: AnalysisConfig = serde_json::from_str(r#"{ "outlier_count": 0 }"#).unwrap();
        assert_eq!(cfg.outlier_count, 0);
        assert_eq!(cfg.electrode_area, None);
        assert_eq!(cfg.sensitivity_threshold_factor, 10.0);
    }

    #[test]
    fn electrode_area_override_is_read() {
        let cfg: AnalysisConfig = serde_json::from_str(r#"{ "electrode_area": 0.5 }"#).unwrap();
        assert_eq!(cfg.electrode_area, Some(0.5));
        assert_eq!(cfg.outlier_count, DEFAULT_OUTLIER_COUNT);
    }
}
