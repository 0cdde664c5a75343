use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::AnalysisResult;

/// One row of the per-cycle CSV export.
#[derive(Debug, Serialize)]
struct CycleRow {
    cycle: usize,
    area_c: Option<f64>,
    capacitance_mf: Option<f64>,
    valid: bool,
    exclusion: String,
}

/// Write per-cycle results as CSV with columns
/// `cycle, area_c, capacitance_mf, valid, exclusion`.
pub fn write_cycles_csv<W: Write>(result: &AnalysisResult, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for c in result.cycles() {
        writer
            .serialize(CycleRow {
                cycle: c.index,
                area_c: c.area,
                capacitance_mf: c.capacitance,
                valid: c.is_valid(),
                exclusion: c.exclusion.map(|e| e.to_string()).unwrap_or_default(),
            })
            .with_context(|| format!("writing cycle {}", c.index))?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

pub fn save_cycles_csv(result: &AnalysisResult, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_cycles_csv(result, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::analyze;
    use crate::data::config::AnalysisConfig;

    const EXPORT: &str = "Cyclic Voltammetry\n\
Scan Rate (V/s) = 0.05\n\
Sensitivity (A/V) = 1e-6\n\
Potential/V, Current/A\n\
Segment 1:\n0.0, 0.0\n0.2, 0.0\n\
Segment 2:\n0.1, 1e-6\n0.0, 2e-6\n\
Segment 3:\n0.0, 0.0\n0.2, 0.0\n\
Segment 4:\n0.1, 1e-3\n0.0, 2e-3\n";

    #[test]
    fn writes_one_row_per_cycle() {
        let result = analyze(EXPORT, &AnalysisConfig::default()).unwrap();
        let mut buf = Vec::new();
        write_cycles_csv(&result, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "cycle,area_c,capacitance_mf,valid,exclusion");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,"));
        assert!(lines[1].ends_with(",true,"));
        assert!(lines[2].contains("sensitivity violation"));
    }

    #[test]
    fn saves_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cycles.csv");
        let result = analyze(EXPORT, &AnalysisConfig::default()).unwrap();
        save_cycles_csv(&result, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("cycle,"));
    }
}
