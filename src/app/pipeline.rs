//! Shared pipeline logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! generate -> enrich -> summary stats (or: ingest -> enrich -> summary stats)
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;

use chrono::NaiveDateTime;
use tracing::info;

use crate::data::{Progress, enrich, generate_detailed};
use crate::domain::{DatasetStats, EnrichedLoadTable, GenerationConfig, Locale, RunSummary};
use crate::error::{AppError, GenerateError};
use crate::io::{build_run_summary, load_dataset};
use crate::report::summary_stats;

/// Everything needed for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub generation: GenerationConfig,
    pub locale: Locale,
}

/// Where a table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Generated,
    File(PathBuf),
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: EnrichedLoadTable,
    pub stats: DatasetStats,
    /// Known for fresh runs, and for files with a run summary.
    pub anomalies: Option<usize>,
    pub source: DataSource,
}

impl RunOutput {
    pub fn summary(&self, generated_at: NaiveDateTime) -> RunSummary {
        build_run_summary(&self.table, &self.stats, self.anomalies, generated_at)
    }
}

/// Generate, enrich and summarize.
pub fn run_pipeline(
    config: &RunConfig,
    progress: &mut dyn Progress,
    cancel: Option<&AtomicBool>,
) -> Result<RunOutput, GenerateError> {
    let generated = generate_detailed(&config.generation, progress, cancel)?;
    let table = enrich(&generated.table, config.locale);
    let stats = summary_stats(&table).unwrap_or_default();
    info!(rows = stats.n_rows, load_mean = stats.load_mean, "pipeline finished");

    Ok(RunOutput {
        table,
        stats,
        anomalies: Some(generated.anomalies),
        source: DataSource::Generated,
    })
}

/// Ingest an exported dataset, enrich and summarize.
pub fn load_pipeline(path: &Path, locale: Option<Locale>) -> Result<RunOutput, AppError> {
    let ingested = load_dataset(path, locale)?;
    let stats = summary_stats(&ingested.table).unwrap_or_default();
    Ok(RunOutput {
        anomalies: ingested.summary.as_ref().and_then(|s| s.anomalies),
        table: ingested.table,
        stats,
        source: DataSource::File(path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NoProgress;

    #[test]
    fn pipeline_produces_enriched_table_and_stats() {
        let config = RunConfig {
            generation: GenerationConfig::reproducible(2023, 2023, 5),
            locale: Locale::En,
        };
        let out = run_pipeline(&config, &mut NoProgress, None).unwrap();
        assert_eq!(out.table.len(), 8760);
        assert_eq!(out.stats.n_rows, 8760);
        assert_eq!(out.stats.holiday_hours, 9 * 24);
        assert_eq!(out.anomalies, Some(0));
        assert_eq!(out.source, DataSource::Generated);
        assert_eq!(out.table.locale(), Locale::En);
    }

    #[test]
    fn invalid_range_fails_before_work() {
        let config = RunConfig {
            generation: GenerationConfig::reproducible(2025, 2024, 5),
            locale: Locale::Uk,
        };
        let err = run_pipeline(&config, &mut NoProgress, None).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidRange { .. }));
    }
}
