//! Match quality scoring.
//!
//! Compares planned against actual aggregates. The workout's primary
//! objective (distance or duration) carries 70% of the grade; the other
//! dimension carries 30% and is half as sensitive to deviation.

use crate::config::ScoringConfig;
use crate::types::round1;
use crate::{MatchQualityResult, ObjectiveType, PlannedMetrics, RecordedActivity};

/// Score an activity against planned metrics with the default 70/30 weighting
pub fn score_match_quality(
    planned: &PlannedMetrics,
    activity: &RecordedActivity,
    objective: ObjectiveType,
) -> MatchQualityResult {
    score_match_quality_with(planned, activity, objective, &ScoringConfig::default())
}

/// Score an activity against planned metrics with an explicit weighting
pub fn score_match_quality_with(
    planned: &PlannedMetrics,
    activity: &RecordedActivity,
    objective: ObjectiveType,
    config: &ScoringConfig,
) -> MatchQualityResult {
    let distance_delta = percent_delta(
        activity.total_distance_meters,
        planned.planned_distance_meters,
    );
    let duration_delta = percent_delta(
        activity.total_duration_seconds,
        planned.planned_duration_seconds,
    );

    let (primary_delta, secondary_delta) = match objective {
        ObjectiveType::Distance => (distance_delta, duration_delta),
        ObjectiveType::Duration => (duration_delta, distance_delta),
    };

    let objective_match = (100.0 - primary_delta.abs()).max(0.0);
    let secondary_match = (100.0 - secondary_delta.abs() / 2.0).max(0.0);
    let overall = config.objective_weight * objective_match
        + (1.0 - config.objective_weight) * secondary_match;

    tracing::debug!(
        "Quality for {}: objective {:.1}, secondary {:.1}, overall {:.1}",
        activity.id,
        objective_match,
        secondary_match,
        overall
    );

    MatchQualityResult {
        overall_score: to_score(overall),
        objective_type: objective,
        objective_match_score: to_score(objective_match),
        distance_percent_delta: round1(distance_delta),
        duration_percent_delta: round1(duration_delta),
        planned_distance: planned.planned_distance_meters.round() as i64,
        planned_duration: planned.planned_duration_seconds.round() as i64,
        actual_distance: activity.total_distance_meters.round() as i64,
        actual_duration: activity.total_duration_seconds.round() as i64,
    }
}

/// Signed deviation of `actual` from `planned` in percent; 0 when nothing was planned
fn percent_delta(actual: f64, planned: f64) -> f64 {
    if planned == 0.0 {
        0.0
    } else {
        (actual - planned) / planned * 100.0
    }
}

fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
