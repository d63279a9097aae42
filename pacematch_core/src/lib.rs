#![forbid(unsafe_code)]

//! Workout plan matching and analysis engine.
//!
//! This crate provides:
//! - Domain types (plans, blocks, repeat groups, activities, laps)
//! - Workout flattening and planned metrics
//! - Candidate activity resolution
//! - Match quality scoring and lap-to-step matching
//! - File loaders, report log and CSV export around the pure engine

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod pace;
pub mod flatten;
pub mod metrics;
pub mod resolver;
pub mod scoring;
pub mod laps;
pub mod validate;
pub mod analysis;
pub mod catalog;
pub mod loader;
pub mod report_log;
pub mod export;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use pace::{format_pace, parse_pace};
pub use flatten::flatten_workout;
pub use metrics::{calculate_planned_metrics, objective_type};
pub use resolver::{resolve_activity, select_activity, ActivitySelection};
pub use scoring::score_match_quality;
pub use laps::match_laps;
pub use validate::validate_plan;
pub use analysis::{analyze_workout, LapMatchSummary, WorkoutAnalysis};
pub use catalog::get_template;
pub use loader::{load_activities, load_laps_csv, load_plan};
pub use report_log::{AnalysisReport, JsonlReportSink, ReportSink};
pub use export::export_matched_laps_csv;
