//! Core domain types for the workout matching engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout plans and their blocks (with repeat-group membership)
//! - Flattened steps derived from a plan
//! - Recorded activities and laps
//! - Computed results (planned metrics, match quality, matched laps)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Plan Types
// ============================================================================

/// Kind of step within a workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Warmup,
    Interval,
    Recovery,
    Cooldown,
    Other,
}

impl StepKind {
    /// Warmup and cooldown steps are executed loosely and get the wider band
    pub fn is_easy_bookend(self) -> bool {
        matches!(self, StepKind::Warmup | StepKind::Cooldown)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Warmup => "Warmup",
            StepKind::Interval => "Interval",
            StepKind::Recovery => "Recovery",
            StepKind::Cooldown => "Cooldown",
            StepKind::Other => "Other",
        };
        f.write_str(name)
    }
}

/// How long a block lasts: a distance to cover or a time to run for
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepDuration {
    Distance { meters: f64 },
    Time { seconds: f64 },
}

impl StepDuration {
    pub fn target_type(&self) -> TargetType {
        match self {
            StepDuration::Distance { .. } => TargetType::Distance,
            StepDuration::Time { .. } => TargetType::Duration,
        }
    }

    /// The raw target value (meters or seconds)
    pub fn value(&self) -> f64 {
        match self {
            StepDuration::Distance { meters } => *meters,
            StepDuration::Time { seconds } => *seconds,
        }
    }
}

/// Optional intensity target attached to a block
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntensityTarget {
    /// Pace range as "mm:ss" per km strings
    Pace {
        #[serde(default)]
        min: Option<String>,
        #[serde(default)]
        max: Option<String>,
    },
    /// Heart rate range in bpm
    HeartRate {
        #[serde(default)]
        min: Option<u16>,
        #[serde(default)]
        max: Option<u16>,
    },
    /// Rate of perceived exertion (1-10)
    Rpe { value: u8 },
}

/// Repeat-group membership of a block
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepeatGroup {
    pub group_id: String,
    pub repeat_count: u32,
}

/// One planned instruction in a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutBlock {
    pub id: String,
    pub step_kind: StepKind,
    #[serde(default)]
    pub label: Option<String>,
    pub duration: StepDuration,
    #[serde(default)]
    pub target: Option<IntensityTarget>,
    #[serde(default)]
    pub group: Option<RepeatGroup>,
}

impl WorkoutBlock {
    /// Display name: the explicit label, or the step kind when absent
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) if !label.trim().is_empty() => label.clone(),
            _ => self.step_kind.to_string(),
        }
    }

    pub fn group_id(&self) -> Option<&str> {
        self.group.as_ref().map(|g| g.group_id.as_str())
    }
}

/// An ordered workout plan; block order is execution order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub blocks: Vec<WorkoutBlock>,
}

// ============================================================================
// Flattened Steps
// ============================================================================

/// Which lap metric a step is compared on
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Distance,
    Duration,
}

/// One atomic step after repeat groups have been expanded
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FlatStep {
    pub step_index: usize,
    pub source_block_id: String,
    pub source_block_label: String,
    /// Generated display label ("Interval 2/6 @ RPE 8")
    pub label: String,
    pub target_type: TargetType,
    pub target_value: f64,
    pub step_kind: StepKind,
    pub intensity: Option<IntensityTarget>,
    pub repeat_index: Option<u32>,
    pub total_repeats: Option<u32>,
}

// ============================================================================
// Recorded Activity Types
// ============================================================================

/// One recorded lap of an activity
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Lap {
    pub distance_meters: f64,
    #[serde(default)]
    pub elapsed_seconds: Option<f64>,
    #[serde(default)]
    pub moving_seconds: Option<f64>,
}

impl Lap {
    /// Elapsed time, falling back to moving time
    pub fn duration_seconds(&self) -> f64 {
        self.elapsed_seconds.or(self.moving_seconds).unwrap_or(0.0)
    }
}

/// A recorded activity as supplied by the activity store
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecordedActivity {
    pub id: String,
    pub start: DateTime<Utc>,
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
    #[serde(default)]
    pub laps: Vec<Lap>,
}

// ============================================================================
// Computed Results
// ============================================================================

/// Planned totals derived from a plan's block structure
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct PlannedMetrics {
    pub planned_distance_meters: f64,
    pub planned_duration_seconds: f64,
}

/// The dimension a workout is primarily about
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveType {
    Distance,
    Duration,
}

/// Planned vs. actual comparison for one plan/activity pair
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchQualityResult {
    pub overall_score: u8,
    pub objective_type: ObjectiveType,
    pub objective_match_score: u8,
    pub distance_percent_delta: f64,
    pub duration_percent_delta: f64,
    pub planned_distance: i64,
    pub planned_duration: i64,
    pub actual_distance: i64,
    pub actual_duration: i64,
}

/// Attribution of one recorded lap to a planned step
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchedLap {
    pub lap_index: usize,
    pub step_index: Option<usize>,
    pub step_label: String,
    pub step_kind: Option<StepKind>,
    pub confidence: u8,
    pub variance_percent: f64,
    pub matched: bool,
}

/// Round to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
