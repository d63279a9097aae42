//! Structural validation of workout plans.
//!
//! The engine trusts its input; callers run this first and refuse plans
//! that report any errors.

use crate::pace::try_parse_pace;
use crate::{IntensityTarget, StepDuration, WorkoutPlan};
use std::collections::{HashMap, HashSet};

/// Validate a plan, returning one message per problem found
pub fn validate_plan(plan: &WorkoutPlan) -> Vec<String> {
    let mut errors = Vec::new();

    if plan.id.is_empty() {
        errors.push("Plan has empty ID".to_string());
    }
    if plan.blocks.is_empty() {
        errors.push(format!("Plan '{}' has no blocks", plan.id));
    }

    let mut seen_ids = HashSet::new();
    let mut repeat_counts: HashMap<&str, u32> = HashMap::new();
    let mut closed_groups: HashSet<&str> = HashSet::new();
    let mut previous_group: Option<&str> = None;

    for (index, block) in plan.blocks.iter().enumerate() {
        if block.id.is_empty() {
            errors.push(format!("Block {} has empty ID", index));
        } else if !seen_ids.insert(block.id.as_str()) {
            errors.push(format!("Duplicate block ID '{}'", block.id));
        }

        let (name, value) = match block.duration {
            StepDuration::Distance { meters } => ("distance", meters),
            StepDuration::Time { seconds } => ("time", seconds),
        };
        if !value.is_finite() || value < 0.0 {
            errors.push(format!(
                "Block '{}': {} {} must be a non-negative number",
                block.id, name, value
            ));
        }

        match &block.target {
            Some(IntensityTarget::Pace { min, max }) => {
                for pace in [min, max].into_iter().flatten() {
                    if try_parse_pace(pace).is_none() {
                        errors.push(format!(
                            "Block '{}': pace '{}' is not in mm:ss form",
                            block.id, pace
                        ));
                    }
                }
            }
            Some(IntensityTarget::HeartRate {
                min: Some(min),
                max: Some(max),
            }) if min > max => {
                errors.push(format!(
                    "Block '{}': heart rate min {} > max {}",
                    block.id, min, max
                ));
            }
            Some(IntensityTarget::Rpe { value }) if !(1..=10).contains(value) => {
                errors.push(format!(
                    "Block '{}': RPE {} outside 1-10",
                    block.id, value
                ));
            }
            _ => {}
        }

        let group_id = block.group_id();
        if let Some(group) = &block.group {
            if group.repeat_count == 0 {
                errors.push(format!(
                    "Block '{}': group '{}' has repeat count 0",
                    block.id, group.group_id
                ));
            }

            let first = *repeat_counts
                .entry(group.group_id.as_str())
                .or_insert(group.repeat_count);
            if first != group.repeat_count {
                errors.push(format!(
                    "Block '{}': group '{}' repeat count {} differs from {}",
                    block.id, group.group_id, group.repeat_count, first
                ));
            }

            if previous_group != group_id && closed_groups.contains(group.group_id.as_str()) {
                errors.push(format!(
                    "Block '{}': group '{}' is not contiguous",
                    block.id, group.group_id
                ));
            }
        }

        if previous_group != group_id {
            if let Some(ended) = previous_group {
                closed_groups.insert(ended);
            }
        }
        previous_group = group_id;
    }

    errors
}
