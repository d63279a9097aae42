//! Builders shared by unit tests.

use crate::{
    IntensityTarget, Lap, RecordedActivity, RepeatGroup, StepDuration, StepKind, WorkoutBlock,
    WorkoutPlan,
};
use chrono::{TimeZone, Utc};

pub fn distance_block(id: &str, kind: StepKind, meters: f64) -> WorkoutBlock {
    WorkoutBlock {
        id: id.into(),
        step_kind: kind,
        label: None,
        duration: StepDuration::Distance { meters },
        target: None,
        group: None,
    }
}

pub fn time_block(id: &str, kind: StepKind, seconds: f64) -> WorkoutBlock {
    WorkoutBlock {
        id: id.into(),
        step_kind: kind,
        label: None,
        duration: StepDuration::Time { seconds },
        target: None,
        group: None,
    }
}

pub fn grouped(mut block: WorkoutBlock, group_id: &str, repeat_count: u32) -> WorkoutBlock {
    block.group = Some(RepeatGroup {
        group_id: group_id.into(),
        repeat_count,
    });
    block
}

pub fn with_pace(mut block: WorkoutBlock, min: &str) -> WorkoutBlock {
    block.target = Some(IntensityTarget::Pace {
        min: Some(min.into()),
        max: None,
    });
    block
}

pub fn plan(blocks: Vec<WorkoutBlock>) -> WorkoutPlan {
    WorkoutPlan {
        id: "plan".into(),
        name: "Test plan".into(),
        blocks,
    }
}

/// warmup 600s, 2 x (400m @ 1:30/400m, 200m), cooldown 300s
pub fn track_session() -> WorkoutPlan {
    plan(vec![
        time_block("warmup", StepKind::Warmup, 600.0),
        grouped(
            with_pace(distance_block("rep", StepKind::Interval, 400.0), "3:45"),
            "reps",
            2,
        ),
        grouped(distance_block("jog", StepKind::Recovery, 200.0), "reps", 2),
        time_block("cooldown", StepKind::Cooldown, 300.0),
    ])
}

pub fn distance_lap(meters: f64) -> Lap {
    Lap {
        distance_meters: meters,
        elapsed_seconds: None,
        moving_seconds: None,
    }
}

pub fn timed_lap(seconds: f64) -> Lap {
    Lap {
        distance_meters: 0.0,
        elapsed_seconds: Some(seconds),
        moving_seconds: None,
    }
}

pub fn activity(id: &str, distance: f64, duration: f64) -> RecordedActivity {
    RecordedActivity {
        id: id.into(),
        start: Utc.with_ymd_and_hms(2026, 3, 14, 7, 30, 0).unwrap(),
        total_distance_meters: distance,
        total_duration_seconds: duration,
        laps: vec![],
    }
}
