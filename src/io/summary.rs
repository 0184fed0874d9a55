//! Read/write the run summary JSON.
//!
//! The summary is the portable description of a generation run: years,
//! preset, mode/seed, locale and headline stats. Ingest reads it back to
//! recover table metadata for an exported dataset.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::domain::{DatasetStats, EnrichedLoadTable, RunSummary};
use crate::error::AppError;

pub fn build_run_summary(
    table: &EnrichedLoadTable,
    stats: &DatasetStats,
    anomalies: Option<usize>,
    generated_at: NaiveDateTime,
) -> RunSummary {
    let meta = table.meta();
    RunSummary {
        tool: "gridload".to_string(),
        generated_at,
        start_year: meta.start_year,
        end_year: meta.end_year,
        preset: meta.preset,
        mode: meta.mode(),
        seed: meta.seed,
        locale: table.locale(),
        rows: table.len(),
        anomalies,
        stats: stats.clone(),
    }
}

pub fn write_run_summary(path: &Path, summary: &RunSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create run summary '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write run summary JSON: {e}")))?;
    Ok(())
}

pub fn read_run_summary(path: &Path) -> Result<RunSummary, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open run summary '{}': {e}", path.display())))?;
    let summary: RunSummary =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid run summary JSON: {e}")))?;
    Ok(summary)
}
