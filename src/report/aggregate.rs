//! Roll-ups over an enriched table: pivots, monitors and consumption views.
//!
//! All grouping keys come from the enriched fields, so every function here is
//! pure and order-independent. Output rows are sorted by their keys.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{DatasetStats, DayType, EnrichedLoadTable, EnrichedRecord, LoadRows};
use crate::math::{eval_polynomial, fit_polynomial};
use crate::models::round1;

/// Running sum/min/max over `load_mw`.
#[derive(Debug, Clone, Copy)]
struct Acc {
    sum: f64,
    min: f64,
    max: f64,
    n: usize,
}

impl Default for Acc {
    fn default() -> Self {
        Self {
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            n: 0,
        }
    }
}

impl Acc {
    fn push(&mut self, v: f64) {
        self.sum += v;
        self.min = self.min.min(v);
        self.max = self.max.max(v);
        self.n += 1;
    }

    fn mean(&self) -> f64 {
        if self.n == 0 { 0.0 } else { self.sum / self.n as f64 }
    }
}

/// Mean load per `(date, month_name)` and day type.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPivot {
    pub rows: Vec<DailyPivotRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyPivotRow {
    pub date: NaiveDate,
    pub month_name: &'static str,
    /// Indexed like `DayType::ALL`; `None` when the day has no such hours.
    pub means: [Option<f64>; 2],
}

/// Mean load per month (rows, calendar order) and year (columns).
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPivot {
    pub years: Vec<i32>,
    pub rows: Vec<MonthlyPivotRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPivotRow {
    pub month_order: u32,
    pub month_name: &'static str,
    /// Aligned with `MonthlyPivot::years`.
    pub means: Vec<Option<f64>>,
}

/// Monthly monitor row for a single year.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthStats {
    pub month: u32,
    pub month_name: &'static str,
    pub max_mw: f64,
    pub min_mw: f64,
    pub mean_mw: f64,
    pub sum_mw: f64,
    pub hours: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyConsumption {
    pub date: NaiveDate,
    pub day_type: DayType,
    pub sum_mw: f64,
    pub mean_mw: f64,
    pub max_mw: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyConsumption {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub sum_mw: f64,
    pub mean_mw: f64,
    pub max_mw: f64,
    pub days_count: usize,
}

/// One hour of a single day's profile.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyPoint {
    pub hour: u32,
    pub load_mw: f64,
    pub temperature_c: f64,
    pub wind_mps: f64,
    pub capacity_mw: f64,
    pub day_type: DayType,
}

/// Quadratic load-vs-temperature trend: `load = c0 + c1·t + c2·t²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureTrend {
    pub coeffs: [f64; 3],
}

impl TemperatureTrend {
    pub fn predict(&self, temperature_c: f64) -> f64 {
        eval_polynomial(&self.coeffs, temperature_c)
    }
}

fn day_type_index(day_type: DayType) -> usize {
    match day_type {
        DayType::Holiday => 0,
        DayType::Regular => 1,
    }
}

pub fn daily_pivot(table: &EnrichedLoadTable) -> DailyPivot {
    let mut groups: BTreeMap<NaiveDate, (&'static str, [Acc; 2])> = BTreeMap::new();
    for r in table.rows() {
        let entry = groups.entry(r.date).or_insert((r.month_name, [Acc::default(); 2]));
        entry.1[day_type_index(r.day_type)].push(r.record.load_mw);
    }

    let rows = groups
        .into_iter()
        .map(|(date, (month_name, accs))| DailyPivotRow {
            date,
            month_name,
            means: accs.map(|a| (a.n > 0).then(|| round1(a.mean()))),
        })
        .collect();
    DailyPivot { rows }
}

pub fn monthly_pivot(table: &EnrichedLoadTable) -> MonthlyPivot {
    let years = table.years();
    let mut groups: BTreeMap<u32, (&'static str, BTreeMap<i32, Acc>)> = BTreeMap::new();
    for r in table.rows() {
        let entry = groups.entry(r.month_order).or_insert((r.month_name, BTreeMap::new()));
        entry.1.entry(r.record.year).or_default().push(r.record.load_mw);
    }

    let rows = groups
        .into_iter()
        .map(|(month_order, (month_name, per_year))| MonthlyPivotRow {
            month_order,
            month_name,
            means: years
                .iter()
                .map(|y| per_year.get(y).map(|a| round1(a.mean())))
                .collect(),
        })
        .collect();
    MonthlyPivot { years, rows }
}

/// Max/min/mean/sum of load per month of `year`.
pub fn monthly_monitor(table: &EnrichedLoadTable, year: i32) -> Vec<MonthStats> {
    let mut groups: BTreeMap<u32, (&'static str, Acc)> = BTreeMap::new();
    for r in table.rows().iter().filter(|r| r.record.year == year) {
        groups
            .entry(r.month)
            .or_insert((r.month_name, Acc::default()))
            .1
            .push(r.record.load_mw);
    }
    groups
        .into_iter()
        .map(|(month, (month_name, a))| MonthStats {
            month,
            month_name,
            max_mw: a.max,
            min_mw: a.min,
            mean_mw: a.mean(),
            sum_mw: a.sum,
            hours: a.n,
        })
        .collect()
}

/// Sum/mean/max of load per `(date, day_type)`.
pub fn daily_consumption(table: &EnrichedLoadTable) -> Vec<DailyConsumption> {
    let mut groups: BTreeMap<(NaiveDate, DayType), Acc> = BTreeMap::new();
    for r in table.rows() {
        groups.entry((r.date, r.day_type)).or_default().push(r.record.load_mw);
    }
    groups
        .into_iter()
        .map(|((date, day_type), a)| DailyConsumption {
            date,
            day_type,
            sum_mw: a.sum,
            mean_mw: a.mean(),
            max_mw: a.max,
        })
        .collect()
}

/// Sum/mean/max of load per `(year, month)` plus the number of days covered.
pub fn monthly_consumption(table: &EnrichedLoadTable) -> Vec<MonthlyConsumption> {
    let mut groups: BTreeMap<(i32, u32), (&'static str, Acc, Vec<NaiveDate>)> = BTreeMap::new();
    for r in table.rows() {
        let entry = groups
            .entry((r.record.year, r.month))
            .or_insert((r.month_name, Acc::default(), Vec::new()));
        entry.1.push(r.record.load_mw);
        if entry.2.last() != Some(&r.date) {
            entry.2.push(r.date);
        }
    }
    groups
        .into_iter()
        .map(|((year, month), (month_name, a, mut days))| {
            days.sort();
            days.dedup();
            MonthlyConsumption {
                year,
                month,
                month_name,
                sum_mw: a.sum,
                mean_mw: a.mean(),
                max_mw: a.max,
                days_count: days.len(),
            }
        })
        .collect()
}

/// The 24 (or fewer) hours of `date`, in hour order.
pub fn hourly_profile(table: &EnrichedLoadTable, date: NaiveDate) -> Vec<HourlyPoint> {
    let mut points: Vec<HourlyPoint> = day_rows(table, date)
        .map(|r| HourlyPoint {
            hour: r.hour,
            load_mw: r.record.load_mw,
            temperature_c: r.record.temperature_c,
            wind_mps: r.record.wind_mps,
            capacity_mw: r.record.capacity_mw,
            day_type: r.day_type,
        })
        .collect();
    points.sort_by_key(|p| p.hour);
    points
}

fn day_rows(table: &EnrichedLoadTable, date: NaiveDate) -> impl Iterator<Item = &EnrichedRecord> {
    table.rows().iter().filter(move |r| r.date == date)
}

/// Headline statistics; `None` for an empty table.
pub fn summary_stats(table: &impl LoadRows) -> Option<DatasetStats> {
    let mut load = Acc::default();
    let (mut temp_sum, mut wind_sum, mut cap_sum) = (0.0, 0.0, 0.0);
    let mut holiday_hours = 0;
    for r in table.load_records() {
        load.push(r.load_mw);
        temp_sum += r.temperature_c;
        wind_sum += r.wind_mps;
        cap_sum += r.capacity_mw;
        holiday_hours += usize::from(r.is_holiday);
    }
    if load.n == 0 {
        return None;
    }
    let n = load.n as f64;
    Some(DatasetStats {
        n_rows: load.n,
        load_mean: load.mean(),
        load_min: load.min,
        load_max: load.max,
        temperature_mean: temp_sum / n,
        wind_mean: wind_sum / n,
        capacity_mean: cap_sum / n,
        holiday_hours,
    })
}

/// Fit a quadratic trend of load against temperature over `(temperature, load)` pairs.
///
/// `None` with fewer than three distinct temperatures.
pub fn temperature_trend(points: impl IntoIterator<Item = (f64, f64)>) -> Option<TemperatureTrend> {
    let (temps, loads): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
    let c = fit_polynomial(&temps, &loads, 2)?;
    Some(TemperatureTrend {
        coeffs: [c[0], c[1], c[2]],
    })
}

/// Trend over the hours of a single day.
pub fn day_temperature_trend(table: &EnrichedLoadTable, date: NaiveDate) -> Option<TemperatureTrend> {
    temperature_trend(day_rows(table, date).map(|r| (r.record.temperature_c, r.record.load_mw)))
}
