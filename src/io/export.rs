//! Export the dataset, pivots and text report.
//!
//! The files are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use crate::data::locale::day_type_label;
use crate::domain::{DatasetStats, DayType, EnrichedLoadTable, Locale, RunSummary};
use crate::error::AppError;
use crate::io::summary::write_run_summary;
use crate::report::{daily_pivot, format_text_report, monthly_pivot, DailyPivot, MonthlyPivot};

pub const DATASET_FILE: &str = "power_load_data.csv";
pub const DAILY_PIVOT_FILE: &str = "daily_load_analysis.csv";
pub const MONTHLY_PIVOT_FILE: &str = "monthly_load_analysis.csv";
pub const REPORT_FILE: &str = "power_load_analysis_report.txt";
pub const SUMMARY_FILE: &str = "run_summary.json";

/// Timestamp layout used in the dataset CSV.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DATASET_HEADER: [&str; 15] = [
    "timestamp",
    "load_mw",
    "temperature_c",
    "wind_mps",
    "is_holiday",
    "capacity_mw",
    "year",
    "date",
    "month",
    "month_name",
    "month_order",
    "quarter",
    "hour",
    "day_type",
    "day_of_week",
];

/// Paths of everything `export_all` wrote.
#[derive(Debug, Clone)]
pub struct ExportedFiles {
    pub dataset: PathBuf,
    pub daily_pivot: PathBuf,
    pub monthly_pivot: PathBuf,
    pub report: PathBuf,
    pub summary: PathBuf,
}

impl ExportedFiles {
    pub fn all(&self) -> [&Path; 5] {
        [
            &self.dataset,
            &self.daily_pivot,
            &self.monthly_pivot,
            &self.report,
            &self.summary,
        ]
    }
}

/// Write every export file into `dir`, creating it if needed.
pub fn export_all(
    dir: &Path,
    table: &EnrichedLoadTable,
    stats: &DatasetStats,
    summary: &RunSummary,
) -> Result<ExportedFiles, AppError> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create output directory '{}': {e}", dir.display())))?;

    let files = ExportedFiles {
        dataset: dir.join(DATASET_FILE),
        daily_pivot: dir.join(DAILY_PIVOT_FILE),
        monthly_pivot: dir.join(MONTHLY_PIVOT_FILE),
        report: dir.join(REPORT_FILE),
        summary: dir.join(SUMMARY_FILE),
    };

    write_dataset_csv(&files.dataset, table)?;
    write_daily_pivot_csv(&files.daily_pivot, &daily_pivot(table), table)?;
    write_monthly_pivot_csv(&files.monthly_pivot, &monthly_pivot(table))?;
    write_text_report(&files.report, table, stats, summary.generated_at)?;
    write_run_summary(&files.summary, summary)?;

    info!(dir = %dir.display(), rows = table.len(), "export finished");
    Ok(files)
}

/// Write the row-per-hour dataset.
pub fn write_dataset_csv(path: &Path, table: &EnrichedLoadTable) -> Result<(), AppError> {
    let mut writer = csv_writer(path)?;
    writer
        .write_record(DATASET_HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write dataset CSV header: {e}")))?;

    let locale = table.locale();
    for r in table.rows() {
        let rec = &r.record;
        writer
            .write_record([
                rec.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                format!("{:.1}", rec.load_mw),
                format!("{:.1}", rec.temperature_c),
                format!("{:.1}", rec.wind_mps),
                u8::from(rec.is_holiday).to_string(),
                format!("{:.1}", rec.capacity_mw),
                rec.year.to_string(),
                r.date.to_string(),
                r.month.to_string(),
                r.month_name.to_string(),
                r.month_order.to_string(),
                r.quarter.to_string(),
                r.hour.to_string(),
                day_type_label(locale, r.day_type).to_string(),
                r.day_of_week.to_string(),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write dataset CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush dataset CSV '{}': {e}", path.display())))
}

/// `date,month_name,<day type labels...>`; empty cell when a day lacks that type.
///
/// Day-type columns are sorted by their localized label.
pub fn write_daily_pivot_csv(path: &Path, pivot: &DailyPivot, table: &EnrichedLoadTable) -> Result<(), AppError> {
    let columns = day_type_columns(table.locale());
    let mut writer = csv_writer(path)?;
    let mut header = vec!["date".to_string(), "month_name".to_string()];
    header.extend(columns.iter().map(|(_, label)| label.to_string()));
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write daily pivot header: {e}")))?;

    for row in &pivot.rows {
        let mut fields = vec![row.date.to_string(), row.month_name.to_string()];
        fields.extend(columns.iter().map(|(idx, _)| fmt_cell(row.means[*idx])));
        writer
            .write_record(&fields)
            .map_err(|e| AppError::new(2, format!("Failed to write daily pivot row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush daily pivot '{}': {e}", path.display())))
}

/// `(index into DayType::ALL, label)` in label order.
fn day_type_columns(locale: Locale) -> Vec<(usize, &'static str)> {
    let mut columns: Vec<(usize, &'static str)> = DayType::ALL
        .iter()
        .enumerate()
        .map(|(idx, d)| (idx, day_type_label(locale, *d)))
        .collect();
    columns.sort_by_key(|(_, label)| *label);
    columns
}

/// `month_name,<years...>` with months in calendar order.
pub fn write_monthly_pivot_csv(path: &Path, pivot: &MonthlyPivot) -> Result<(), AppError> {
    let mut writer = csv_writer(path)?;
    let mut header = vec!["month_name".to_string()];
    header.extend(pivot.years.iter().map(|y| y.to_string()));
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write monthly pivot header: {e}")))?;

    for row in &pivot.rows {
        let mut fields = vec![row.month_name.to_string()];
        fields.extend(row.means.iter().map(|m| fmt_cell(*m)));
        writer
            .write_record(&fields)
            .map_err(|e| AppError::new(2, format!("Failed to write monthly pivot row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush monthly pivot '{}': {e}", path.display())))
}

pub fn write_text_report(
    path: &Path,
    table: &EnrichedLoadTable,
    stats: &DatasetStats,
    generated_at: NaiveDateTime,
) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report '{}': {e}", path.display())))?;
    let text = format_text_report(table.meta(), stats, generated_at, table.locale());
    file.write_all(text.as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write report '{}': {e}", path.display())))
}

fn csv_writer(path: &Path) -> Result<csv::Writer<File>, AppError> {
    csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display())))
}

fn fmt_cell(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.1}")).unwrap_or_default()
}
