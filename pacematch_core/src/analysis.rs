//! End-to-end workout analysis.
//!
//! Runs the full pipeline for one scheduled plan:
//! 1. Planned metrics from the raw block structure
//! 2. Activity resolution among the candidates (or the manual link)
//! 3. Match quality scoring against the chosen activity
//! 4. Flattening + lap-to-step matching when the activity has laps

use crate::config::Config;
use crate::flatten::flatten_workout;
use crate::laps::match_laps_with;
use crate::metrics::{calculate_planned_metrics_with, objective_type};
use crate::resolver::{select_activity, ActivitySelection};
use crate::scoring::score_match_quality_with;
use crate::types::round1;
use crate::{
    FlatStep, MatchQualityResult, MatchedLap, ObjectiveType, PlannedMetrics, RecordedActivity,
    WorkoutPlan,
};
use serde::{Deserialize, Serialize};

/// Everything computed for one plan/activity pairing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutAnalysis {
    pub plan_id: String,
    pub objective_type: ObjectiveType,
    pub planned: PlannedMetrics,
    pub activity_id: Option<String>,
    pub quality: Option<MatchQualityResult>,
    pub steps: Vec<FlatStep>,
    pub laps: Vec<MatchedLap>,
    pub lap_summary: Option<LapMatchSummary>,
}

/// Roll-up of a lap matching pass
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LapMatchSummary {
    pub matched_steps: usize,
    pub total_steps: usize,
    pub unmatched_laps: usize,
    pub extra_laps: usize,
    pub mean_confidence: f64,
    pub completion_percent: f64,
}

impl LapMatchSummary {
    pub fn from_matches(matches: &[MatchedLap], total_steps: usize) -> Self {
        let matched: Vec<&MatchedLap> = matches.iter().filter(|m| m.matched).collect();
        let extra_laps = matches
            .iter()
            .filter(|m| !m.matched && m.step_label == crate::laps::EXTRA_LAP_LABEL)
            .count();
        let unmatched_laps = matches.len() - matched.len() - extra_laps;

        let mean_confidence = if matched.is_empty() {
            0.0
        } else {
            let total: f64 = matched.iter().map(|m| f64::from(m.confidence)).sum();
            round1(total / matched.len() as f64)
        };

        let completion_percent = if total_steps == 0 {
            0.0
        } else {
            round1(matched.len() as f64 / total_steps as f64 * 100.0)
        };

        Self {
            matched_steps: matched.len(),
            total_steps,
            unmatched_laps,
            extra_laps,
            mean_confidence,
            completion_percent,
        }
    }
}

/// Analyze a plan against candidate activities with default settings
pub fn analyze_workout(
    plan: &WorkoutPlan,
    candidates: &[RecordedActivity],
    selection: &ActivitySelection,
) -> WorkoutAnalysis {
    analyze_workout_with(plan, candidates, selection, &Config::default())
}

/// Analyze a plan against candidate activities
pub fn analyze_workout_with(
    plan: &WorkoutPlan,
    candidates: &[RecordedActivity],
    selection: &ActivitySelection,
    config: &Config,
) -> WorkoutAnalysis {
    let planned = calculate_planned_metrics_with(&plan.blocks, &config.metrics);
    let objective = objective_type(plan);
    let steps = flatten_workout(&plan.blocks);

    tracing::info!(
        "Analyzing plan {}: {} steps, {:.0}m / {:.0}s planned, {} candidates",
        plan.id,
        steps.len(),
        planned.planned_distance_meters,
        planned.planned_duration_seconds,
        candidates.len()
    );

    let activity = select_activity(candidates, &planned, selection);

    let Some(activity) = activity else {
        tracing::info!("No activity matched plan {}", plan.id);
        return WorkoutAnalysis {
            plan_id: plan.id.clone(),
            objective_type: objective,
            planned,
            activity_id: None,
            quality: None,
            steps,
            laps: Vec::new(),
            lap_summary: None,
        };
    };

    tracing::info!("Plan {} matched to activity {}", plan.id, activity.id);

    let quality = score_match_quality_with(&planned, activity, objective, &config.scoring);

    let (laps, lap_summary) = if activity.laps.is_empty() {
        (Vec::new(), None)
    } else {
        let laps = match_laps_with(&activity.laps, &steps, &config.matching);
        let summary = LapMatchSummary::from_matches(&laps, steps.len());
        (laps, Some(summary))
    };

    WorkoutAnalysis {
        plan_id: plan.id.clone(),
        objective_type: objective,
        planned,
        activity_id: Some(activity.id.clone()),
        quality: Some(quality),
        steps,
        laps,
        lap_summary,
    }
}
