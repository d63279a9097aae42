//! CSV export of lap matching results.

use crate::{MatchedLap, Result};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    lap_index: usize,
    step_index: Option<usize>,
    step_label: String,
    step_kind: Option<String>,
    matched: bool,
    confidence: u8,
    variance_percent: f64,
}

impl From<&MatchedLap> for CsvRow {
    fn from(lap: &MatchedLap) -> Self {
        CsvRow {
            lap_index: lap.lap_index,
            step_index: lap.step_index,
            step_label: lap.step_label.clone(),
            step_kind: lap.step_kind.map(|k| k.to_string().to_lowercase()),
            matched: lap.matched,
            confidence: lap.confidence,
            variance_percent: lap.variance_percent,
        }
    }
}

/// Write matched laps to a CSV file (replacing any existing file)
///
/// Returns the number of rows written.
pub fn export_matched_laps_csv(laps: &[MatchedLap], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    for lap in laps {
        writer.serialize(CsvRow::from(lap))?;
    }

    writer.flush()?;
    tracing::info!("Exported {} matched laps to {:?}", laps.len(), path);
    Ok(laps.len())
}
