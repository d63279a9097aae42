//! Planned metrics calculation.
//!
//! Derives total planned distance and duration straight from a plan's raw
//! block structure (no flattening needed). Repeat groups are collected by a
//! full scan over the plan, so members of a group count even if they are not
//! contiguous.
//!
//! Time-based blocks contribute no distance: distance can't be inferred from
//! time without a pace assumption, and none is made.

use crate::config::MetricsConfig;
use crate::pace::parse_pace;
use crate::{
    IntensityTarget, ObjectiveType, PlannedMetrics, StepDuration, WorkoutBlock, WorkoutPlan,
};
use std::collections::HashSet;

/// Calculate planned distance/duration using the default 5:00/km pace
pub fn calculate_planned_metrics(blocks: &[WorkoutBlock]) -> PlannedMetrics {
    calculate_planned_metrics_with(blocks, &MetricsConfig::default())
}

/// Calculate planned distance/duration with an explicit fallback pace
pub fn calculate_planned_metrics_with(
    blocks: &[WorkoutBlock],
    config: &MetricsConfig,
) -> PlannedMetrics {
    let mut totals = PlannedMetrics::default();
    let mut processed_group_ids: HashSet<&str> = HashSet::new();

    for block in blocks {
        let Some(group) = &block.group else {
            let (distance, duration) = block_contribution(block, config);
            totals.planned_distance_meters += distance;
            totals.planned_duration_seconds += duration;
            continue;
        };

        if !processed_group_ids.insert(group.group_id.as_str()) {
            continue;
        }

        let (distance, duration) = blocks
            .iter()
            .filter(|b| b.group_id() == Some(group.group_id.as_str()))
            .map(|b| block_contribution(b, config))
            .fold((0.0, 0.0), |(d, t), (bd, bt)| (d + bd, t + bt));

        let repeats = f64::from(group.repeat_count);
        totals.planned_distance_meters += distance * repeats;
        totals.planned_duration_seconds += duration * repeats;

        tracing::debug!(
            "Group {}: {:.0}m / {:.0}s per repeat x {}",
            group.group_id,
            distance,
            duration,
            group.repeat_count
        );
    }

    totals
}

/// Distance and (estimated) duration of a single block, before repeats
fn block_contribution(block: &WorkoutBlock, config: &MetricsConfig) -> (f64, f64) {
    match block.duration {
        StepDuration::Distance { meters } => {
            let pace = match &block.target {
                Some(IntensityTarget::Pace { min: Some(min), .. }) => parse_pace(min),
                _ => config.default_pace_seconds_per_km,
            };
            (meters, meters / 1000.0 * f64::from(pace))
        }
        StepDuration::Time { seconds } => (0.0, seconds),
    }
}

/// Whether a plan is primarily about distance or duration
///
/// Distance if any block is distance-based, otherwise duration.
pub fn objective_type(plan: &WorkoutPlan) -> ObjectiveType {
    let any_distance = plan
        .blocks
        .iter()
        .any(|b| matches!(b.duration, StepDuration::Distance { .. }));

    if any_distance {
        ObjectiveType::Distance
    } else {
        ObjectiveType::Duration
    }
}
