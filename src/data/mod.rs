//! Analysis core: parsing, cycle building, integration and filtering.
//!
//! Architecture:
//! ```text
//!  instrument .txt export
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  parser   │  text → metadata + Vec<Segment>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  cycles   │  pair segments (1,2), (3,4), … → Vec<Cycle>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ calculator  │  loop area → capacitance (mF)
//!   └────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  sensitivity pass, then z-score outlier pass
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  mean / std-dev over valid cycles → AnalysisResult
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod calculator;
pub mod config;
pub mod cycles;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parser;
pub mod summary;

use config::AnalysisConfig;
use error::FormatError;
use model::AnalysisResult;

/// Run the whole pipeline on the text of one instrument export.
///
/// Only format problems fail the call; per-cycle problems are recorded on
/// the cycles of the returned result.
pub fn analyze(text: &str, config: &AnalysisConfig) -> Result<AnalysisResult, FormatError> {
    let parser::ParsedExport {
        mut metadata,
        segments,
    } = parser::parse(text)?;
    if let Some(area) = config.electrode_area {
        metadata.electrode_area = area;
    }

    let mut cycles = cycles::build_cycles(segments);
    calculator::compute(&mut cycles, &metadata);
    let warnings = filter::apply_sensitivity(&mut cycles, &metadata, config);
    let outliers = filter::apply_outliers(&mut cycles, config);
    log::debug!(
        "{} cycle(s) over the sensitivity limit, outliers removed: {outliers:?}",
        warnings.len()
    );
    let statistics = aggregate::aggregate(&cycles);

    log::info!(
        "Analysed {} cycles, {} valid, mean {:?} mF",
        cycles.len(),
        statistics.valid_count,
        statistics.mean
    );
    Ok(AnalysisResult::new(cycles, metadata, statistics))
}
