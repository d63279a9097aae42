//! Workout flattening.
//!
//! Expands a plan's repeat groups into the literal sequence of steps the
//! athlete performs. Groups are detected as contiguous runs of blocks that
//! share a `group_id`; the run ends at the first block with a different (or
//! no) group id.

use crate::{FlatStep, IntensityTarget, StepKind, WorkoutBlock};

/// Flatten a block sequence into an ordered, fully materialized step list
///
/// `step_index` counts emitted steps (0..N, shared across groups and
/// standalone blocks). Each source block is visited once; expansion only
/// happens in the output.
pub fn flatten_workout(blocks: &[WorkoutBlock]) -> Vec<FlatStep> {
    let mut steps = Vec::new();
    let mut i = 0;

    while i < blocks.len() {
        let block = &blocks[i];

        let Some(group) = &block.group else {
            push_step(&mut steps, block, None);
            i += 1;
            continue;
        };

        let run_len = blocks[i..]
            .iter()
            .take_while(|b| b.group_id() == Some(group.group_id.as_str()))
            .count();
        let run = &blocks[i..i + run_len];

        tracing::debug!(
            "Expanding group {} ({} blocks x {})",
            group.group_id,
            run_len,
            group.repeat_count
        );

        for repeat in 1..=group.repeat_count {
            for member in run {
                push_step(&mut steps, member, Some((repeat, group.repeat_count)));
            }
        }

        i += run_len;
    }

    steps
}

fn push_step(steps: &mut Vec<FlatStep>, block: &WorkoutBlock, repeat: Option<(u32, u32)>) {
    let (repeat_index, total_repeats) = match repeat {
        Some((r, total)) => (Some(r), Some(total)),
        None => (None, None),
    };

    steps.push(FlatStep {
        step_index: steps.len(),
        source_block_id: block.id.clone(),
        source_block_label: block.display_label(),
        label: step_label(block, repeat),
        target_type: block.duration.target_type(),
        target_value: block.duration.value(),
        step_kind: block.step_kind,
        intensity: block.target.clone(),
        repeat_index,
        total_repeats,
    });
}

/// Generate the display label for one emitted step
///
/// Repeated intervals and recoveries are numbered ("Interval 2/6"); anything
/// else uses the block's own label or its capitalized step kind. An RPE
/// target is appended as " @ RPE v".
pub fn step_label(block: &WorkoutBlock, repeat: Option<(u32, u32)>) -> String {
    let mut label = match (repeat, block.step_kind) {
        (Some((r, total)), StepKind::Interval) => format!("Interval {}/{}", r, total),
        (Some((r, total)), StepKind::Recovery) => format!("Recovery {}/{}", r, total),
        _ => block.display_label(),
    };

    if let Some(IntensityTarget::Rpe { value }) = block.target {
        label.push_str(&format!(" @ RPE {}", value));
    }

    label
}
