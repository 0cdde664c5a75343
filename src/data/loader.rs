use std::path::Path;

use anyhow::{bail, Context, Result};

use super::config::AnalysisConfig;
use super::model::AnalysisResult;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read an instrument export and analyse it. Dispatch by extension.
///
/// Supported formats:
/// * `.txt` – text export of the electrochemical workstation
/// * `.csv` – the same export saved with a `.csv` extension
/// * no extension – treated as text
pub fn load_file(path: &Path, config: &AnalysisConfig) -> Result<AnalysisResult> {
    let text = read_export(path)?;
    let result = super::analyze(&text, config)
        .with_context(|| format!("analysing {}", path.display()))?;
    Ok(result)
}

/// Read the raw export text, for callers that re-analyse with other settings.
pub fn read_export(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "txt" | "csv" | "" => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::error::FormatError;

    const EXPORT: &str = "Cyclic Voltammetry\n\
Scan Rate (V/s) = 0.1\n\
Potential/V, Current/A\n\
Segment 1:\n\
0.0, 0.0\n\
0.1, 0.0\n\
Segment 2:\n\
0.1, 1e-6\n\
0.0, 1e-6\n";

    #[test]
    fn loads_text_export() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();
        let result = load_file(file.path(), &AnalysisConfig::default()).unwrap();
        assert_eq!(result.cycles().len(), 1);
        assert_eq!(result.metadata().scan_rate, 0.1);
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let err = load_file(file.path(), &AnalysisConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn format_error_is_preserved_in_chain() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"Cyclic Voltammetry\nScan Rate (V/s) = 0.1\n").unwrap();
        let err = load_file(file.path(), &AnalysisConfig::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FormatError>(),
            Some(&FormatError::MissingDataHeader)
        );
    }

    #[test]
    fn missing_file_has_context() {
        let err = read_export(Path::new("/nonexistent/run.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("reading /nonexistent/run.txt"));
    }
}
