//! Candidate activity resolution.
//!
//! Picks which recorded activity corresponds to a scheduled plan:
//! - No candidates → no match
//! - One candidate → that one
//! - Several → the one closest to the planned metrics (relative distance
//!   error + relative duration error), first one wins on ties
//!
//! A manual selection by activity id bypasses the heuristic entirely.

use crate::{PlannedMetrics, RecordedActivity};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// How the activity for an assignment is chosen
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivitySelection {
    /// Similarity heuristic over the candidates
    #[default]
    Auto,
    /// Caller-linked activity id, taken as authoritative
    Manual(String),
}

/// Auto-select the candidate that best matches the planned metrics
pub fn resolve_activity<'a>(
    candidates: &'a [RecordedActivity],
    planned: &PlannedMetrics,
) -> Option<&'a RecordedActivity> {
    match candidates {
        [] => None,
        [only] => Some(only),
        _ => {
            let mut best: Option<(&RecordedActivity, f64)> = None;

            for candidate in candidates {
                let score = similarity_score(candidate, planned);
                tracing::debug!("Candidate {} scored {:.4}", candidate.id, score);

                // strict comparison keeps the earliest candidate on ties
                if best.map_or(true, |(_, best_score)| score < best_score) {
                    best = Some((candidate, score));
                }
            }

            best.map(|(activity, _)| activity)
        }
    }
}

/// Resolve an activity honouring a manual selection if one was made
///
/// A manual id that isn't among the candidates yields no match.
pub fn select_activity<'a>(
    candidates: &'a [RecordedActivity],
    planned: &PlannedMetrics,
    selection: &ActivitySelection,
) -> Option<&'a RecordedActivity> {
    match selection {
        ActivitySelection::Auto => resolve_activity(candidates, planned),
        ActivitySelection::Manual(id) => {
            let found = candidates.iter().find(|a| &a.id == id);
            if found.is_none() {
                tracing::warn!("Manually selected activity {} not among candidates", id);
            }
            found
        }
    }
}

/// Distance of an activity from the plan; lower is better
pub fn similarity_score(activity: &RecordedActivity, planned: &PlannedMetrics) -> f64 {
    let distance_error = (activity.total_distance_meters - planned.planned_distance_meters).abs()
        / planned.planned_distance_meters.max(1.0);
    let duration_error = (activity.total_duration_seconds - planned.planned_duration_seconds)
        .abs()
        / planned.planned_duration_seconds.max(1.0);
    distance_error + duration_error
}

/// Activities that started within `window_days` of the scheduled date (UTC)
///
/// A window of 0 means the same calendar day. Input order is preserved.
/// Windows reaching past the representable calendar are clamped to it.
pub fn activities_in_window(
    activities: &[RecordedActivity],
    scheduled: NaiveDate,
    window_days: u32,
) -> Vec<RecordedActivity> {
    let window = Days::new(u64::from(window_days));
    let first = scheduled.checked_sub_days(window).unwrap_or(NaiveDate::MIN);
    let last = scheduled.checked_add_days(window).unwrap_or(NaiveDate::MAX);

    activities
        .iter()
        .filter(|a| {
            let day = a.start.date_naive();
            day >= first && day <= last
        })
        .cloned()
        .collect()
}
