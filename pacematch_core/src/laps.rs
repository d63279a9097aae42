//! Lap-to-step matching.
//!
//! Greedy single pass over the recorded laps with one cursor into the
//! flattened steps. The cursor only advances when a lap lands inside the
//! current step's tolerance band, so stray laps (an accidental lap-button
//! press) are reported as unmatched without desynchronizing the rest. Once
//! the cursor passes the last step every remaining lap is "Extra".

use crate::config::MatchingConfig;
use crate::types::round1;
use crate::{FlatStep, Lap, MatchedLap, StepKind, TargetType};

/// Label given to laps recorded after every step was consumed
pub const EXTRA_LAP_LABEL: &str = "Extra";

/// Label given to laps that missed the current step's tolerance band
pub const UNMATCHED_LAP_LABEL: &str = "Unmatched";

/// Match laps to steps using the default 10% / 20% tolerance bands
pub fn match_laps(laps: &[Lap], steps: &[FlatStep]) -> Vec<MatchedLap> {
    match_laps_with(laps, steps, &MatchingConfig::default())
}

/// Match laps to steps with explicit tolerance bands
///
/// Returns exactly one [`MatchedLap`] per input lap, in lap order.
pub fn match_laps_with(
    laps: &[Lap],
    steps: &[FlatStep],
    config: &MatchingConfig,
) -> Vec<MatchedLap> {
    let mut cursor = 0;
    let mut matched = Vec::with_capacity(laps.len());

    for (lap_index, lap) in laps.iter().enumerate() {
        let Some(step) = steps.get(cursor) else {
            tracing::debug!("Lap {} recorded after the last step", lap_index);
            matched.push(MatchedLap {
                lap_index,
                step_index: None,
                step_label: EXTRA_LAP_LABEL.to_string(),
                step_kind: None,
                confidence: 0,
                variance_percent: 0.0,
                matched: false,
            });
            continue;
        };

        let lap_value = match step.target_type {
            TargetType::Distance => lap.distance_meters,
            TargetType::Duration => lap.duration_seconds(),
        };
        let variance = variance_percent(lap_value, step.target_value);
        let tolerance = tolerance_percent(step.step_kind, config);

        if variance.abs() <= tolerance {
            let confidence = (100.0 - variance.abs() / (tolerance / 100.0)).max(0.0);

            tracing::debug!(
                "Lap {} matched step {} ({}) at {:.1}% variance",
                lap_index,
                step.step_index,
                step.label,
                variance
            );

            matched.push(MatchedLap {
                lap_index,
                step_index: Some(step.step_index),
                step_label: step.label.clone(),
                step_kind: Some(step.step_kind),
                confidence: confidence.round().min(100.0) as u8,
                variance_percent: round1(variance),
                matched: true,
            });
            cursor += 1;
        } else {
            tracing::debug!(
                "Lap {} outside {:.0}% band of step {} ({:.1}%)",
                lap_index,
                tolerance,
                step.step_index,
                variance
            );

            matched.push(MatchedLap {
                lap_index,
                step_index: None,
                step_label: UNMATCHED_LAP_LABEL.to_string(),
                step_kind: None,
                confidence: 0,
                variance_percent: round1(variance),
                matched: false,
            });
        }
    }

    matched
}

/// Allowed deviation in percent for a step kind
pub fn tolerance_percent(kind: StepKind, config: &MatchingConfig) -> f64 {
    if kind.is_easy_bookend() {
        config.warmup_cooldown_tolerance_percent
    } else {
        config.default_tolerance_percent
    }
}

fn variance_percent(actual: f64, target: f64) -> f64 {
    if target == 0.0 {
        0.0
    } else {
        (actual - target) / target * 100.0
    }
}
