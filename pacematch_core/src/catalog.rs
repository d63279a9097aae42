//! Built-in catalog of workout plan templates.
//!
//! Common coach sessions that can be analyzed without authoring a plan file.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Cached template catalog - built once and reused
static TEMPLATES: Lazy<BTreeMap<String, WorkoutPlan>> = Lazy::new(build_templates);

/// Look up a built-in template by id
pub fn get_template(id: &str) -> Option<&'static WorkoutPlan> {
    TEMPLATES.get(id)
}

/// All template ids, sorted
pub fn template_ids() -> Vec<&'static str> {
    TEMPLATES.keys().map(String::as_str).collect()
}

/// Iterate over all templates in id order
pub fn templates() -> impl Iterator<Item = &'static WorkoutPlan> {
    TEMPLATES.values()
}

fn block(id: &str, kind: StepKind, duration: StepDuration) -> WorkoutBlock {
    WorkoutBlock {
        id: id.into(),
        step_kind: kind,
        label: None,
        duration,
        target: None,
        group: None,
    }
}

fn meters(m: f64) -> StepDuration {
    StepDuration::Distance { meters: m }
}

fn minutes(m: f64) -> StepDuration {
    StepDuration::Time { seconds: m * 60.0 }
}

fn pace(min: &str, max: &str) -> Option<IntensityTarget> {
    Some(IntensityTarget::Pace {
        min: Some(min.into()),
        max: Some(max.into()),
    })
}

fn repeat(mut b: WorkoutBlock, group_id: &str, repeat_count: u32) -> WorkoutBlock {
    b.group = Some(RepeatGroup {
        group_id: group_id.into(),
        repeat_count,
    });
    b
}

fn build_templates() -> BTreeMap<String, WorkoutPlan> {
    let mut plans = Vec::new();

    // ========================================================================
    // Track sessions
    // ========================================================================

    plans.push(WorkoutPlan {
        id: "track_6x400".into(),
        name: "6 x 400m with 200m jog".into(),
        blocks: vec![
            block("wu", StepKind::Warmup, minutes(15.0)),
            repeat(
                WorkoutBlock {
                    target: pace("3:40", "3:50"),
                    ..block("rep", StepKind::Interval, meters(400.0))
                },
                "main",
                6,
            ),
            repeat(block("jog", StepKind::Recovery, meters(200.0)), "main", 6),
            block("cd", StepKind::Cooldown, minutes(10.0)),
        ],
    });

    plans.push(WorkoutPlan {
        id: "sets_2x5x200".into(),
        name: "2 sets of 5 x 200m".into(),
        blocks: vec![
            block("wu", StepKind::Warmup, minutes(15.0)),
            repeat(
                WorkoutBlock {
                    target: Some(IntensityTarget::Rpe { value: 9 }),
                    ..block("s1_rep", StepKind::Interval, meters(200.0))
                },
                "set1",
                5,
            ),
            repeat(block("s1_jog", StepKind::Recovery, meters(200.0)), "set1", 5),
            WorkoutBlock {
                label: Some("Set break".into()),
                ..block("break", StepKind::Recovery, minutes(4.0))
            },
            repeat(
                WorkoutBlock {
                    target: Some(IntensityTarget::Rpe { value: 9 }),
                    ..block("s2_rep", StepKind::Interval, meters(200.0))
                },
                "set2",
                5,
            ),
            repeat(block("s2_jog", StepKind::Recovery, meters(200.0)), "set2", 5),
            block("cd", StepKind::Cooldown, minutes(10.0)),
        ],
    });

    // ========================================================================
    // Threshold
    // ========================================================================

    plans.push(WorkoutPlan {
        id: "cruise_3x1k".into(),
        name: "3 x 1km cruise intervals".into(),
        blocks: vec![
            block("wu", StepKind::Warmup, minutes(15.0)),
            repeat(
                WorkoutBlock {
                    target: pace("4:10", "4:20"),
                    ..block("rep", StepKind::Interval, meters(1000.0))
                },
                "main",
                3,
            ),
            repeat(block("float", StepKind::Recovery, minutes(1.0)), "main", 3),
            block("cd", StepKind::Cooldown, minutes(10.0)),
        ],
    });

    // ========================================================================
    // Easy
    // ========================================================================

    plans.push(WorkoutPlan {
        id: "easy_30min".into(),
        name: "Easy 30 minutes".into(),
        blocks: vec![WorkoutBlock {
            label: Some("Easy run".into()),
            target: Some(IntensityTarget::HeartRate {
                min: Some(130),
                max: Some(150),
            }),
            ..block("easy", StepKind::Other, minutes(30.0))
        }],
    });

    plans.push(WorkoutPlan {
        id: "long_16k".into(),
        name: "Long run 16km".into(),
        blocks: vec![WorkoutBlock {
            label: Some("Long run".into()),
            target: pace("5:30", "6:00"),
            ..block("long", StepKind::Other, meters(16000.0))
        }],
    });

    plans.into_iter().map(|p| (p.id.clone(), p)).collect()
}
