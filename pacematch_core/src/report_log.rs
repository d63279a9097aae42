//! Append-only log of analysis reports.
//!
//! Reports are appended to a JSONL (JSON Lines) file with file locking so
//! several CLI invocations can log concurrently.

use crate::analysis::WorkoutAnalysis;
use crate::Result;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One logged analysis
///
/// `plan_id` and `activity_id` are copied out of the analysis so the log can
/// be scanned without decoding the full result.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub plan_id: String,
    pub activity_id: Option<String>,
    pub analysis: WorkoutAnalysis,
}

impl AnalysisReport {
    pub fn new(analysis: WorkoutAnalysis) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            plan_id: analysis.plan_id.clone(),
            activity_id: analysis.activity_id.clone(),
            analysis,
        }
    }
}

/// Report sink trait for persisting analyses
pub trait ReportSink {
    fn append(&mut self, report: &AnalysisReport) -> Result<()>;
}

/// JSONL-based report sink with file locking
pub struct JsonlReportSink {
    path: PathBuf,
}

impl JsonlReportSink {
    /// Create a new JSONL sink for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl ReportSink for JsonlReportSink {
    fn append(&mut self, report: &AnalysisReport) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(report)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended report {} to {:?}", report.id, self.path);
        Ok(())
    }
}

/// Read all reports from a log file, skipping lines that don't parse
pub fn read_reports(path: &Path) -> Result<Vec<AnalysisReport>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut reports = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<AnalysisReport>(&line) {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::warn!("Failed to parse report at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} reports from {:?}", reports.len(), path);
    Ok(reports)
}
