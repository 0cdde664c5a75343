use super::error::FormatError;
use super::model::{ExperimentMetadata, RawSample, Segment, DEFAULT_ELECTRODE_AREA};

pub const EXPERIMENT_MARKER: &str = "Cyclic Voltammetry";
pub const DATA_HEADER: &str = "Potential/V, Current/A";
pub const SEGMENT_MARKER: &str = "Segment";

/// Parser output: header metadata plus the segments in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExport {
    pub metadata: ExperimentMetadata,
    pub segments: Vec<Segment>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse the text export of a cyclic voltammetry run.
///
/// Expected layout:
///
/// ```text
/// Cyclic Voltammetry
/// Init E (V) = 0
/// High E (V) = 0.2
/// Low E (V) = 0
/// Scan Rate (V/s) = 0.05
/// Segment = 4
/// Sensitivity (A/V) = 1e-5
///
/// Potential/V, Current/A
/// Segment 1:
/// 0.000, 1.0e-6
/// 0.001, 1.1e-6
/// Segment 2:
/// ...
/// ```
///
/// Header fields are `label = value` lines before the data header. Each
/// `Segment <n>` line after the data header starts a new segment.
pub fn parse(text: &str) -> Result<ParsedExport, FormatError> {
    if !text.contains(EXPERIMENT_MARKER) {
        return Err(FormatError::MissingExperimentMarker);
    }

    let lines: Vec<&str> = text.lines().collect();
    let header_idx = lines
        .iter()
        .position(|l| l.contains(DATA_HEADER))
        .ok_or(FormatError::MissingDataHeader)?;

    let metadata = parse_metadata(&lines[..header_idx])?;
    let segments = parse_segments(&lines, header_idx + 1)?;

    if segments.len() < 2 {
        return Err(FormatError::TooFewSegments {
            found: segments.len(),
        });
    }

    if let Some(declared) = metadata.declared_segments {
        if declared != segments.len() {
            log::warn!(
                "Header declares {declared} segments but {} were found",
                segments.len()
            );
        }
    }
    log::debug!(
        "Parsed {} segments, {} samples",
        segments.len(),
        segments.iter().map(|s| s.samples.len()).sum::<usize>()
    );

    Ok(ParsedExport { metadata, segments })
}

// ---------------------------------------------------------------------------
// Header metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Field {
    InitialVoltage,
    MaxVoltage,
    MinVoltage,
    ScanRate,
    Sensitivity,
    ElectrodeArea,
    Segments,
    SampleInterval,
}

const LABELS: &[(&str, Field)] = &[
    ("Init E (V)", Field::InitialVoltage),
    ("High E (V)", Field::MaxVoltage),
    ("Low E (V)", Field::MinVoltage),
    ("Scan Rate (V/s)", Field::ScanRate),
    ("Sensitivity (A/V)", Field::Sensitivity),
    ("Electrode Area (cm2)", Field::ElectrodeArea),
    ("Electrode Area (cm^2)", Field::ElectrodeArea),
    ("Electrode Area (cm²)", Field::ElectrodeArea),
    ("Segment", Field::Segments),
    ("Sample Interval (V)", Field::SampleInterval),
];

fn parse_metadata(lines: &[&str]) -> Result<ExperimentMetadata, FormatError> {
    let mut scan_rate: Option<Result<f64, ()>> = None;
    let mut meta = ExperimentMetadata {
        scan_rate: 0.0,
        electrode_area: DEFAULT_ELECTRODE_AREA,
        sensitivity: None,
        initial_voltage: None,
        max_voltage: None,
        min_voltage: None,
        declared_segments: None,
        sample_interval: None,
    };

    for (i, line) in lines.iter().enumerate() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        let Some(&(label, field)) = LABELS.iter().find(|(l, _)| *l == key) else {
            continue;
        };

        if let Field::ScanRate = field {
            scan_rate = Some(value.parse::<f64>().map_err(|_| ()));
            continue;
        }
        if let Field::Segments = field {
            match value.parse::<usize>() {
                Ok(n) => meta.declared_segments = Some(n),
                Err(_) => log::warn!("Line {}: ignoring invalid '{label}' value '{value}'", i + 1),
            }
            continue;
        }
        let Some(v) = value.parse::<f64>().ok().filter(|v| v.is_finite()) else {
            log::warn!("Line {}: ignoring invalid '{label}' value '{value}'", i + 1);
            continue;
        };
        match field {
            Field::InitialVoltage => meta.initial_voltage = Some(v),
            Field::MaxVoltage => meta.max_voltage = Some(v),
            Field::MinVoltage => meta.min_voltage = Some(v),
            Field::Sensitivity => meta.sensitivity = Some(v),
            Field::ElectrodeArea => meta.electrode_area = v,
            Field::SampleInterval => meta.sample_interval = Some(v),
            Field::ScanRate | Field::Segments => {}
        }
    }

    meta.scan_rate = match scan_rate {
        Some(Ok(v)) if v.is_finite() => v,
        _ => return Err(FormatError::ScanRate),
    };
    Ok(meta)
}

// ---------------------------------------------------------------------------
// Data block
// ---------------------------------------------------------------------------

fn parse_segments(lines: &[&str], start: usize) -> Result<Vec<Segment>, FormatError> {
    let mut segments: Vec<Segment> = Vec::new();

    for (offset, raw) in lines[start..].iter().enumerate() {
        let line_no = start + offset + 1;
        let line = raw.trim();
        if line.is_empty() || line.contains(DATA_HEADER) {
            continue;
        }

        if let Some(reported) = segment_marker(line) {
            close_segment(&segments)?;
            let index = segments.len() + 1;
            if reported != index {
                log::debug!("Segment marker {reported} is segment {index} in file order");
            }
            segments.push(Segment {
                index,
                samples: Vec::new(),
            });
            continue;
        }

        let sample = parse_row(line).ok_or_else(|| FormatError::InvalidDataRow {
            line: line_no,
            content: line.to_string(),
        })?;
        match segments.last_mut() {
            Some(seg) => seg.samples.push(sample),
            None => return Err(FormatError::DataBeforeSegment { line: line_no }),
        }
    }
    close_segment(&segments)?;

    Ok(segments)
}

/// Reject a finished segment that never received a sample.
fn close_segment(segments: &[Segment]) -> Result<(), FormatError> {
    match segments.last() {
        Some(seg) if seg.samples.is_empty() => {
            Err(FormatError::EmptySegment { index: seg.index })
        }
        _ => Ok(()),
    }
}

/// `Segment 3` or `Segment 3:` → `Some(3)`.
fn segment_marker(line: &str) -> Option<usize> {
    let rest = line.strip_prefix(SEGMENT_MARKER)?;
    rest.trim().trim_end_matches(':').trim().parse().ok()
}

/// Two finite floats separated by a comma and/or whitespace.
fn parse_row(line: &str) -> Option<RawSample> {
    let mut tokens = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    let potential = tokens.next()?.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let current = tokens.next()?.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if tokens.next().is_some() {
        return None;
    }
    Some(RawSample::new(potential, current))
}
