//! Loading plans, activities and laps from files.
//!
//! These sit at the edge of the engine: the persistence layer (or a user at
//! the command line) hands over files, the engine only sees in-memory data.

use crate::{Error, Lap, RecordedActivity, Result, WorkoutPlan};
use serde::Deserialize;
use std::path::Path;

/// Load a plan from a `.json` or `.toml` file
pub fn load_plan(path: &Path) -> Result<WorkoutPlan> {
    let contents = std::fs::read_to_string(path)?;

    let plan: WorkoutPlan = match extension(path).as_deref() {
        Some("toml") => toml::from_str(&contents)?,
        Some("json") | None => serde_json::from_str(&contents)?,
        Some(other) => {
            return Err(Error::Other(format!(
                "Unsupported plan file extension '.{}' for {:?}",
                other, path
            )))
        }
    };

    tracing::info!(
        "Loaded plan {} ({} blocks) from {:?}",
        plan.id,
        plan.blocks.len(),
        path
    );
    Ok(plan)
}

/// Load recorded activities from a JSON array
pub fn load_activities(path: &Path) -> Result<Vec<RecordedActivity>> {
    let contents = std::fs::read_to_string(path)?;
    let activities: Vec<RecordedActivity> = serde_json::from_str(&contents)?;

    for activity in &activities {
        if activity.total_distance_meters < 0.0 || activity.total_duration_seconds < 0.0 {
            return Err(Error::Activity(format!(
                "Activity {} has negative totals",
                activity.id
            )));
        }
    }

    tracing::info!("Loaded {} activities from {:?}", activities.len(), path);
    Ok(activities)
}

/// CSV row format for lap exports
#[derive(Debug, Deserialize)]
struct LapRow {
    distance_meters: f64,
    elapsed_seconds: Option<f64>,
    moving_seconds: Option<f64>,
}

impl From<LapRow> for Lap {
    fn from(row: LapRow) -> Self {
        Lap {
            distance_meters: row.distance_meters,
            elapsed_seconds: row.elapsed_seconds,
            moving_seconds: row.moving_seconds,
        }
    }
}

/// Load laps, in recorded order, from a CSV file with headers
/// `distance_meters,elapsed_seconds,moving_seconds` (time columns may be blank)
pub fn load_laps_csv(path: &Path) -> Result<Vec<Lap>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut laps = Vec::new();
    for row in reader.deserialize::<LapRow>() {
        laps.push(Lap::from(row?));
    }

    tracing::info!("Loaded {} laps from {:?}", laps.len(), path);
    Ok(laps)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
