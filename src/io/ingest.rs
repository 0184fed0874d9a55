//! CSV ingest of a previously exported dataset.
//!
//! This module turns a `power_load_data.csv` file back into an enriched table
//! so reports, plots and the TUI can run without regenerating.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** via `LoadTable::from_rows` (first bad row aborts)
//! - **Metadata recovery** from `run_summary.json` next to the CSV, if present
//!
//! Derived columns (month names, day type, ...) are ignored on read and
//! recomputed by enrichment.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{info, warn};

use crate::data::enrich;
use crate::domain::{EnrichedLoadTable, LoadRow, LoadTable, Locale, RunSummary};
use crate::error::{AppError, GenerateError};
use crate::io::export::SUMMARY_FILE;
use crate::io::summary::read_run_summary;

const REQUIRED_COLUMNS: [&str; 6] = [
    "timestamp",
    "load_mw",
    "temperature_c",
    "wind_mps",
    "is_holiday",
    "capacity_mw",
];

/// Ingest output: the validated, enriched table plus what we learned on the way.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub table: EnrichedLoadTable,
    pub summary: Option<RunSummary>,
}

/// Load a dataset CSV and enrich it with `locale` (or the summary's locale when
/// `locale` is `None` and a summary exists).
///
/// A summary whose row count or years disagree with the CSV is dropped.
pub fn load_dataset(path: &Path, locale: Option<Locale>) -> Result<IngestedData, AppError> {
    let rows = read_load_rows(path)?;
    let table = LoadTable::from_rows(&rows, None)?;
    let summary = read_sibling_summary(path).filter(|s| summary_matches(s, &table));
    let locale = locale
        .or_else(|| summary.as_ref().map(|s| s.locale))
        .unwrap_or_default();

    let table = match &summary {
        Some(s) => table.with_meta(s.table_meta()),
        None => table,
    };
    let table = enrich(&table, locale);
    info!(path = %path.display(), rows = table.len(), "dataset loaded");

    Ok(IngestedData {
        table,
        summary,
    })
}

/// Read raw rows; no semantic validation beyond per-cell parsing.
pub fn read_load_rows(path: &Path) -> Result<Vec<LoadRow>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row_no = idx + 1;
        let record = result.map_err(|e| AppError::new(2, format!("CSV parse error at data row {row_no}: {e}")))?;
        rows.push(parse_row(row_no, &record, &header_map)?);
    }
    Ok(rows)
}

fn summary_matches(summary: &RunSummary, table: &LoadTable) -> bool {
    let meta = table.meta();
    let matches = summary.rows == table.len()
        && summary.start_year == meta.start_year
        && summary.end_year == meta.end_year;
    if !matches {
        warn!(
            summary_rows = summary.rows,
            csv_rows = table.len(),
            summary_years = %format!("{}..={}", summary.start_year, summary.end_year),
            csv_years = %format!("{}..={}", meta.start_year, meta.end_year),
            "ignoring run summary that does not describe this CSV"
        );
    }
    matches
}

/// `run_summary.json` in the same directory, if it exists and parses.
fn read_sibling_summary(csv_path: &Path) -> Option<RunSummary> {
    let path = summary_path_for(csv_path);
    if !path.exists() {
        return None;
    }
    match read_run_summary(&path) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable run summary");
            None
        }
    }
}

pub fn summary_path_for(csv_path: &Path) -> PathBuf {
    csv_path.with_file_name(SUMMARY_FILE)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet tools sometimes re-save UTF-8 CSVs with a BOM on the first
    // header; strip it or `timestamp` goes missing.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !header_map.contains_key(*c))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::new(2, format!("Missing required column(s): {}", missing.join(", "))))
    }
}

fn parse_row(row_no: usize, record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<LoadRow, AppError> {
    let cell = |name: &str| -> Option<&str> {
        header_map
            .get(name)
            .and_then(|&i| record.get(i))
            .filter(|s| !s.is_empty())
    };
    let number = |name: &str| -> Result<Option<f64>, GenerateError> {
        cell(name)
            .map(|s| {
                s.parse::<f64>()
                    .map_err(|_| GenerateError::malformed(row_no, format!("invalid {name} '{s}'")))
            })
            .transpose()
    };

    let is_holiday = cell("is_holiday")
        .map(|s| match s {
            "0" | "false" | "False" => Ok(0),
            "1" | "true" | "True" => Ok(1),
            other => Err(GenerateError::malformed(row_no, format!("invalid is_holiday '{other}'"))),
        })
        .transpose()?;
    let year = cell("year")
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| GenerateError::malformed(row_no, format!("invalid year '{s}'")))
        })
        .transpose()?;

    Ok(LoadRow {
        timestamp: cell("timestamp").map(str::to_string),
        load_mw: number("load_mw")?,
        temperature_c: number("temperature_c")?,
        wind_mps: number("wind_mps")?,
        is_holiday,
        capacity_mw: number("capacity_mw")?,
        year,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::domain::Preset;

    const HEADER: &str = "timestamp,load_mw,temperature_c,wind_mps,is_holiday,capacity_mw,year";

    fn write_csv(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("power_load_data.csv");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn loads_minimal_dataset_without_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            &format!(
                "\u{feff}{HEADER}\n2024-01-01 00:00:00,4000.5,-3.2,2.1,1,4800.0,2024\n2024-01-01 01:00:00,3900.0,-3.5,2.4,1,4700.0,2024\n"
            ),
        );
        let data = load_dataset(&path, Some(Locale::En)).unwrap();
        assert!(data.summary.is_none());
        assert_eq!(data.table.len(), 2);
        assert_eq!(data.table.rows()[0].record.load_mw, 4000.5);
        assert_eq!(data.table.rows()[0].month_name, "January");
        assert_eq!(data.table.meta().seed, None);
    }

    #[test]
    fn missing_columns_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "timestamp,load_mw\n2024-01-01 00:00:00,1\n");
        let err = load_dataset(&path, None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("temperature_c"), "{}", err.message());
    }

    #[test]
    fn bad_cells_name_the_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            &format!("{HEADER}\n2024-01-01 00:00:00,4000,1,1,0,5000,2024\n2024-01-01 01:00:00,abc,1,1,0,5000,2024\n"),
        );
        let err = load_dataset(&path, None).unwrap_err();
        assert!(err.message().contains("row 2"), "{}", err.message());

        let path = write_csv(dir.path(), &format!("{HEADER}\n,4000,1,1,0,5000,2024\n"));
        let err = load_dataset(&path, None).unwrap_err();
        assert!(err.message().contains("missing timestamp"), "{}", err.message());
    }

    fn summary(rows: usize, start_year: i32, end_year: i32) -> RunSummary {
        use crate::domain::{DatasetStats, GenerationMode};
        RunSummary {
            tool: "gridload".to_string(),
            generated_at: chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            start_year,
            end_year,
            preset: Preset::Extended,
            mode: GenerationMode::Reproducible,
            seed: Some(7),
            locale: Locale::En,
            rows,
            anomalies: Some(3),
            stats: DatasetStats::default(),
        }
    }

    const TWO_ROWS: &str = "2024-01-01 00:00:00,4000,1,1,1,5000,2024\n2024-01-01 01:00:00,4010,1,1,1,5000,2024\n";

    #[test]
    fn matching_summary_supplies_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), &format!("{HEADER}\n{TWO_ROWS}"));
        crate::io::write_run_summary(&summary_path_for(&path), &summary(2, 2024, 2024)).unwrap();

        let data = load_dataset(&path, None).unwrap();
        assert_eq!(data.summary.as_ref().and_then(|s| s.anomalies), Some(3));
        assert_eq!(data.table.meta().seed, Some(7));
        assert_eq!(data.table.meta().preset, Preset::Extended);
        assert_eq!(data.table.locale(), Locale::En);
    }

    #[test]
    fn stale_summary_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), &format!("{HEADER}\n{TWO_ROWS}"));

        for stale in [summary(8784, 2024, 2024), summary(2, 2023, 2023)] {
            crate::io::write_run_summary(&summary_path_for(&path), &stale).unwrap();
            let data = load_dataset(&path, None).unwrap();
            assert!(data.summary.is_none());
            assert_eq!(data.table.meta().seed, None);
            assert_eq!(data.table.meta().preset, Preset::Basic);
            assert_eq!(data.table.locale(), Locale::Uk);
        }
    }

    #[test]
    fn unreadable_summary_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), &format!("{HEADER}\n2024-01-01 00:00:00,4000,1,1,0,5000,2024\n"));
        fs::write(summary_path_for(&path), "garbage").unwrap();
        let data = load_dataset(&path, None).unwrap();
        assert!(data.summary.is_none());
        assert_eq!(data.table.locale(), Locale::Uk);
    }
}
