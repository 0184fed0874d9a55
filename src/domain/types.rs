//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced in-memory by the generator
//! - exported to CSV/JSON
//! - reloaded later for reports, plots or the TUI

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Named set of model constants.
///
/// `Basic` reproduces the classic generator (tight clip bands, no trends).
/// `Extended` adds warming, economic growth and anomaly injection with wider
/// clip bands. The two are not interchangeable for seeded byte-parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Basic,
    Extended,
}

impl Preset {
    pub fn display_name(self) -> &'static str {
        match self {
            Preset::Basic => "basic",
            Preset::Extended => "extended",
        }
    }
}

/// How random draws are seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Fixed seed: identical output on every run.
    Reproducible,
    /// Entropy-seeded: different output on every run.
    Random,
}

impl GenerationMode {
    pub fn display_name(self) -> &'static str {
        match self {
            GenerationMode::Reproducible => "reproducible",
            GenerationMode::Random => "random",
        }
    }
}

/// Language used for month, weekday and day-type labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Uk,
    En,
}

/// Holiday vs regular day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Holiday,
    Regular,
}

impl DayType {
    pub const ALL: [DayType; 2] = [DayType::Holiday, DayType::Regular];

    pub fn from_flag(is_holiday: bool) -> Self {
        if is_holiday {
            DayType::Holiday
        } else {
            DayType::Regular
        }
    }
}

/// One generated hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRecord {
    pub timestamp: NaiveDateTime,
    pub load_mw: f64,
    pub temperature_c: f64,
    pub wind_mps: f64,
    pub is_holiday: bool,
    pub capacity_mw: f64,
    pub year: i32,
}

/// A raw, unvalidated row as read back from a dataset CSV.
///
/// Every field is optional so that a broken file can be reported row by row
/// instead of failing inside the CSV deserializer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoadRow {
    pub timestamp: Option<String>,
    pub load_mw: Option<f64>,
    pub temperature_c: Option<f64>,
    pub wind_mps: Option<f64>,
    pub is_holiday: Option<u8>,
    pub capacity_mw: Option<f64>,
    pub year: Option<i32>,
}

/// Run metadata carried alongside a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    pub start_year: i32,
    pub end_year: i32,
    pub preset: Preset,
    /// `Some` in reproducible mode.
    pub seed: Option<u64>,
}

impl TableMeta {
    pub fn mode(&self) -> GenerationMode {
        if self.seed.is_some() {
            GenerationMode::Reproducible
        } else {
            GenerationMode::Random
        }
    }
}

/// The generated record set.
///
/// Built once (by the generator or by validated ingest) and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTable {
    meta: TableMeta,
    records: Vec<LoadRecord>,
}

impl LoadTable {
    pub(crate) fn new(meta: TableMeta, records: Vec<LoadRecord>) -> Self {
        Self { meta, records }
    }

    pub(crate) fn with_meta(self, meta: TableMeta) -> Self {
        Self { meta, ..self }
    }

    pub fn meta(&self) -> &TableMeta {
        &self.meta
    }

    pub fn records(&self) -> &[LoadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A load record plus its derived calendar/categorical fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub record: LoadRecord,
    pub date: NaiveDate,
    pub month: u32,
    pub month_name: &'static str,
    pub month_order: u32,
    pub quarter: u32,
    pub hour: u32,
    pub day_type: DayType,
    pub day_of_week: &'static str,
}

/// Enriched table consumed by aggregation, export and presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedLoadTable {
    meta: TableMeta,
    locale: Locale,
    rows: Vec<EnrichedRecord>,
}

impl EnrichedLoadTable {
    pub(crate) fn new(meta: TableMeta, locale: Locale, rows: Vec<EnrichedRecord>) -> Self {
        Self { meta, locale, rows }
    }

    pub fn meta(&self) -> &TableMeta {
        &self.meta
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn rows(&self) -> &[EnrichedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|r| r.record.year).collect();
        years.dedup();
        years
    }

    /// Distinct dates present, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.rows.iter().map(|r| r.date).collect();
        dates.dedup();
        dates
    }
}

/// Anything that exposes an ordered sequence of load records.
///
/// Implemented for both the raw and the enriched table so enrichment can be
/// re-applied to its own output.
pub trait LoadRows {
    fn meta(&self) -> &TableMeta;
    fn load_records(&self) -> impl Iterator<Item = &LoadRecord> + Send + '_;
}

impl LoadRows for LoadTable {
    fn meta(&self) -> &TableMeta {
        &self.meta
    }

    fn load_records(&self) -> impl Iterator<Item = &LoadRecord> + Send + '_ {
        self.records.iter()
    }
}

impl LoadRows for EnrichedLoadTable {
    fn meta(&self) -> &TableMeta {
        &self.meta
    }

    fn load_records(&self) -> impl Iterator<Item = &LoadRecord> + Send + '_ {
        self.rows.iter().map(|r| &r.record)
    }
}

/// Inputs for a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub start_year: i32,
    pub end_year: i32,
    pub preset: Preset,
    /// `None` selects stochastic mode.
    pub seed: Option<u64>,
}

impl GenerationConfig {
    pub fn reproducible(start_year: i32, end_year: i32, seed: u64) -> Self {
        Self {
            start_year,
            end_year,
            preset: Preset::Basic,
            seed: Some(seed),
        }
    }

    pub fn stochastic(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
            preset: Preset::Basic,
            seed: None,
        }
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    pub fn mode(&self) -> GenerationMode {
        if self.seed.is_some() {
            GenerationMode::Reproducible
        } else {
            GenerationMode::Random
        }
    }
}

/// Headline statistics over a whole table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub load_mean: f64,
    pub load_min: f64,
    pub load_max: f64,
    pub temperature_mean: f64,
    pub wind_mean: f64,
    pub capacity_mean: f64,
    pub holiday_hours: usize,
}

/// Portable description of a generation run (`run_summary.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub tool: String,
    pub generated_at: NaiveDateTime,
    pub start_year: i32,
    pub end_year: i32,
    pub preset: Preset,
    pub mode: GenerationMode,
    pub seed: Option<u64>,
    pub locale: Locale,
    pub rows: usize,
    pub anomalies: Option<usize>,
    pub stats: DatasetStats,
}

impl RunSummary {
    pub fn table_meta(&self) -> TableMeta {
        TableMeta {
            start_year: self.start_year,
            end_year: self.end_year,
            preset: self.preset,
            seed: self.seed,
        }
    }
}
