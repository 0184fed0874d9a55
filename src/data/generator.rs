//! Synthetic hourly load/weather generation.
//!
//! Per hour the random stream is consumed in a fixed order:
//!
//! 1. temperature noise
//! 2. load noise
//! 3. anomaly roll, then anomaly magnitude if selected (extended preset only)
//! 4. wind speed
//! 5. capacity noise
//!
//! Keeping this order is what makes a seeded run reproducible. Progress
//! reporting and cancellation checks never touch the RNG.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Datelike;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Gamma, Normal};
use tracing::{debug, info};

use crate::calendar::{HolidayTable, HourStamp, hours_in_range, validate_range, year_hours};
use crate::domain::{GenerationConfig, LoadRecord, LoadTable, TableMeta};
use crate::error::GenerateError;
use crate::models::{ModelParams, expected_temperature, peak_multiplier, round1, structural_load};

/// Receives `(percent, message)` updates during generation.
pub trait Progress {
    fn report(&mut self, percent: u8, message: &str);
}

impl<F: FnMut(u8, &str)> Progress for F {
    fn report(&mut self, percent: u8, message: &str) {
        self(percent, message)
    }
}

/// Progress sink that drops every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _percent: u8, _message: &str) {}
}

/// Generate the full table for the configured range.
pub fn generate(config: &GenerationConfig) -> Result<LoadTable, GenerateError> {
    generate_with_progress(config, &mut NoProgress, None)
}

/// Generate with progress updates and an optional cancel flag.
///
/// The cancel flag is polled once per generated month. A cancelled run returns
/// `GenerateError::Cancelled` and drops everything generated so far.
pub fn generate_with_progress(
    config: &GenerationConfig,
    progress: &mut dyn Progress,
    cancel: Option<&AtomicBool>,
) -> Result<LoadTable, GenerateError> {
    generate_detailed(config, progress, cancel).map(|out| out.table)
}

/// A generated table plus run diagnostics.
#[derive(Debug, Clone)]
pub struct GeneratorOutput {
    pub table: LoadTable,
    /// Hours whose load received an anomaly factor.
    pub anomalies: usize,
}

/// Noise distributions, built once per run.
struct NoiseModel {
    temperature: Normal<f64>,
    load: Normal<f64>,
    wind: Gamma<f64>,
    capacity: Normal<f64>,
}

impl NoiseModel {
    fn new(p: &ModelParams) -> Result<Self, GenerateError> {
        let invalid = |what: &str, e: &dyn std::fmt::Display| {
            GenerateError::InvalidParams(format!("{what} distribution: {e}"))
        };
        Ok(Self {
            temperature: Normal::new(0.0, p.temp_noise_std_c).map_err(|e| invalid("temperature", &e))?,
            load: Normal::new(0.0, p.load_noise_std_mw).map_err(|e| invalid("load", &e))?,
            wind: Gamma::new(p.wind_gamma_shape, p.wind_gamma_scale).map_err(|e| invalid("wind", &e))?,
            capacity: Normal::new(0.0, p.capacity_noise_std_mw).map_err(|e| invalid("capacity", &e))?,
        })
    }
}

/// Like [`generate_with_progress`], also returning the anomaly count.
pub fn generate_detailed(
    config: &GenerationConfig,
    progress: &mut dyn Progress,
    cancel: Option<&AtomicBool>,
) -> Result<GeneratorOutput, GenerateError> {
    validate_range(config.start_year, config.end_year)?;

    let params = ModelParams::for_preset(config.preset);
    let noise = NoiseModel::new(&params)?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let total = hours_in_range(config.start_year, config.end_year);
    info!(
        start_year = config.start_year,
        end_year = config.end_year,
        preset = config.preset.display_name(),
        mode = config.mode().display_name(),
        hours = total,
        "generating load data"
    );

    let mut records = Vec::with_capacity(total);
    let mut anomalies = 0usize;

    for year in config.start_year..=config.end_year {
        let holidays = HolidayTable::for_year(year)?;
        let mut month = 0u32;

        for stamp in year_hours(year, config.start_year)? {
            let stamp_month = stamp.timestamp.month();
            if stamp_month != month {
                if month != 0 {
                    report_month(progress, records.len(), total, year, month);
                }
                if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                    info!(year, month = stamp_month, "generation cancelled");
                    return Err(GenerateError::Cancelled);
                }
                month = stamp_month;
            }

            let (record, anomaly) = simulate_hour(&params, &noise, &holidays, &stamp, &mut rng);
            if anomaly.is_some() {
                anomalies += 1;
            }
            records.push(record);
        }
        report_month(progress, records.len(), total, year, month);
        debug!(year, rows = records.len(), "year generated");
    }

    info!(rows = records.len(), anomalies, "generation finished");

    let meta = TableMeta {
        start_year: config.start_year,
        end_year: config.end_year,
        preset: config.preset,
        seed: config.seed,
    };
    Ok(GeneratorOutput {
        table: LoadTable::new(meta, records),
        anomalies,
    })
}

fn report_month(progress: &mut dyn Progress, done: usize, total: usize, year: i32, month: u32) {
    let percent = if total == 0 { 100 } else { (done * 100 / total).min(100) as u8 };
    debug!(year, month, percent, "month generated");
    progress.report(percent, &format!("Generated {year}-{month:02}"));
}

/// One hour of the model. Returns the record and the anomaly factor, if any.
fn simulate_hour(
    p: &ModelParams,
    noise: &NoiseModel,
    holidays: &HolidayTable,
    stamp: &HourStamp,
    rng: &mut StdRng,
) -> (LoadRecord, Option<f64>) {
    let temperature = expected_temperature(p, stamp) + noise.temperature.sample(rng);

    let mut load = structural_load(p, stamp, temperature) + noise.load.sample(rng);
    load *= peak_multiplier(p, stamp.hour);

    let anomaly = sample_anomaly(p, rng);
    if let Some(factor) = anomaly {
        load *= factor;
    }

    let wind = noise.wind.sample(rng);
    let is_holiday = holidays.is_holiday(stamp.timestamp);

    // Capacity follows the unclipped load.
    let capacity = load + p.reserve_margin_mw + noise.capacity.sample(rng);

    let record = LoadRecord {
        timestamp: stamp.timestamp,
        load_mw: round1(p.load_bounds.clip(load)),
        temperature_c: round1(p.temperature_bounds.clip(temperature)),
        wind_mps: round1(p.wind_bounds.clip(wind)),
        is_holiday,
        capacity_mw: round1(p.capacity_bounds.clip(capacity)),
        year: stamp.year,
    };
    (record, anomaly)
}

fn sample_anomaly(p: &ModelParams, rng: &mut StdRng) -> Option<f64> {
    if !p.anomalies_enabled() {
        return None;
    }
    let roll: f64 = rng.r#gen();
    if roll < p.anomaly_rate {
        Some(rng.gen_range(p.anomaly_factor_min..p.anomaly_factor_max))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{Duration, NaiveDate, Timelike};

    use super::*;
    use crate::calendar::HOLIDAYS;
    use crate::domain::Preset;

    fn seeded(start: i32, end: i32) -> LoadTable {
        generate(&GenerationConfig::reproducible(start, end, 42)).unwrap()
    }

    #[test]
    fn one_row_per_hour_strictly_increasing() {
        let table = seeded(2023, 2024);
        assert_eq!(table.len(), hours_in_range(2023, 2024));
        for w in table.records().windows(2) {
            assert_eq!(w[1].timestamp - w[0].timestamp, Duration::hours(1));
        }
        assert!(table.records().iter().all(|r| r.year == r.timestamp.year()));
    }

    #[test]
    fn values_stay_inside_preset_bounds() {
        for preset in [Preset::Basic, Preset::Extended] {
            let config = GenerationConfig::reproducible(2024, 2025, 7).with_preset(preset);
            let table = generate(&config).unwrap();
            let p = ModelParams::for_preset(preset);
            for r in table.records() {
                assert!(p.load_bounds.contains(r.load_mw), "load {} ({preset:?})", r.load_mw);
                assert!(p.temperature_bounds.contains(r.temperature_c));
                assert!(p.wind_bounds.contains(r.wind_mps));
                assert!(p.capacity_bounds.contains(r.capacity_mw));
                assert!(r.load_mw > 0.0);
                assert!(r.load_mw.is_finite() && r.capacity_mw.is_finite());
            }
        }
    }

    #[test]
    fn values_are_rounded_to_one_decimal() {
        let table = seeded(2024, 2024);
        for r in table.records().iter().take(500) {
            for v in [r.load_mw, r.temperature_c, r.wind_mps, r.capacity_mw] {
                assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-6, "{v} not rounded");
            }
        }
    }

    #[test]
    fn same_seed_same_table() {
        assert_eq!(seeded(2024, 2024), seeded(2024, 2024));
    }

    #[test]
    fn extended_preset_is_reproducible_including_anomalies() {
        let config = GenerationConfig::reproducible(2022, 2024, 42).with_preset(Preset::Extended);
        let a = generate_detailed(&config, &mut NoProgress, None).unwrap();
        let b = generate_detailed(&config, &mut NoProgress, None).unwrap();
        assert!(a.anomalies > 0);
        assert_eq!(a.anomalies, b.anomalies);
        assert_eq!(a.table, b.table);
    }

    #[test]
    fn anomaly_factors_stay_in_range() {
        let p = ModelParams {
            anomaly_rate: 1.0,
            ..ModelParams::for_preset(Preset::Extended)
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let factor = sample_anomaly(&p, &mut rng).unwrap();
            assert!(
                factor >= p.anomaly_factor_min && factor < p.anomaly_factor_max,
                "{factor}"
            );
        }
        assert!(sample_anomaly(&ModelParams::for_preset(Preset::Basic), &mut rng).is_none());
    }

    #[test]
    fn different_seeds_differ() {
        let a = seeded(2024, 2024);
        let b = generate(&GenerationConfig::reproducible(2024, 2024, 43)).unwrap();
        assert_ne!(a.records(), b.records());
    }

    #[test]
    fn stochastic_runs_differ_but_keep_shape() {
        let config = GenerationConfig::stochastic(2024, 2024);
        let a = generate(&config).unwrap();
        let b = generate(&config).unwrap();
        assert_eq!(a.len(), b.len());
        assert!(a.meta().seed.is_none());
        assert!(
            a.records()
                .iter()
                .zip(b.records())
                .any(|(x, y)| x.load_mw != y.load_mw)
        );
    }

    #[test]
    fn holiday_flag_matches_fixed_dates() {
        let table = seeded(2024, 2025);
        for r in table.records() {
            let date = r.timestamp.date();
            let expected = HOLIDAYS
                .iter()
                .any(|&(m, d)| NaiveDate::from_ymd_opt(r.year, m, d) == Some(date));
            assert_eq!(r.is_holiday, expected, "{}", r.timestamp);
        }
        let holiday_hours = table.records().iter().filter(|r| r.is_holiday).count();
        assert_eq!(holiday_hours, 2 * 9 * 24);
    }

    #[test]
    fn weekends_are_lighter_than_weekdays_each_month() {
        let table = seeded(2024, 2024);
        let mut sums: HashMap<(u32, bool), (f64, usize)> = HashMap::new();
        for r in table.records() {
            let weekend = r.timestamp.weekday().num_days_from_monday() >= 5;
            let e = sums.entry((r.timestamp.month(), weekend)).or_default();
            e.0 += r.load_mw;
            e.1 += 1;
        }
        for month in 1..=12 {
            let (wd, wdn) = sums[&(month, false)];
            let (we, wen) = sums[&(month, true)];
            assert!(we / (wen as f64) < wd / (wdn as f64), "month {month}");
        }
    }

    #[test]
    fn peak_hours_beat_adjacent_hours() {
        let table = seeded(2024, 2024);
        let mut by_hour = [(0.0f64, 0usize); 24];
        for r in table.records() {
            let h = r.timestamp.hour() as usize;
            by_hour[h].0 += r.load_mw;
            by_hour[h].1 += 1;
        }
        let mean = |h: usize| by_hour[h].0 / by_hour[h].1 as f64;
        for (peak, adjacent) in [(7, 6), (10, 11), (17, 16), (20, 21)] {
            assert!(mean(peak) > mean(adjacent), "hour {peak} vs {adjacent}");
        }
    }

    #[test]
    fn capacity_exceeds_load_on_average() {
        let table = seeded(2024, 2024);
        let n = table.len() as f64;
        let load: f64 = table.records().iter().map(|r| r.load_mw).sum::<f64>() / n;
        let cap: f64 = table.records().iter().map(|r| r.capacity_mw).sum::<f64>() / n;
        assert!(cap > load, "capacity {cap} vs load {load}");
    }

    #[test]
    fn extended_preset_injects_rare_anomalies() {
        let config = GenerationConfig::reproducible(2022, 2024, 42).with_preset(Preset::Extended);
        let out = generate_detailed(&config, &mut |_: u8, _: &str| {}, None).unwrap();
        let hours = out.table.len();
        // Expect ~0.1% of ~26k hours.
        assert!(out.anomalies >= 5 && out.anomalies <= 80, "{} anomalies in {hours}", out.anomalies);

        let basic = generate_detailed(&GenerationConfig::reproducible(2022, 2024, 42), &mut |_: u8, _: &str| {}, None).unwrap();
        assert_eq!(basic.anomalies, 0);
    }

    #[test]
    fn progress_is_monotone_and_does_not_change_output() {
        let config = GenerationConfig::reproducible(2024, 2025, 42);
        let mut seen = Vec::new();
        let table = generate_with_progress(&config, &mut |p: u8, _: &str| seen.push(p), None).unwrap();

        assert_eq!(seen.len(), 24);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last().copied(), Some(100));
        assert_eq!(table, generate(&config).unwrap());
    }

    #[test]
    fn cancelled_run_returns_nothing() {
        let flag = AtomicBool::new(true);
        let config = GenerationConfig::reproducible(2024, 2024, 42);
        let result = generate_with_progress(&config, &mut |_: u8, _: &str| {}, Some(&flag));
        assert_eq!(result, Err(GenerateError::Cancelled));
    }

    #[test]
    fn invalid_range_fails_before_generating() {
        let mut calls = 0;
        let result = generate_with_progress(
            &GenerationConfig::reproducible(2025, 2024, 42),
            &mut |_: u8, _: &str| calls += 1,
            None,
        );
        assert!(matches!(result, Err(GenerateError::InvalidRange { .. })));
        assert_eq!(calls, 0);
    }
}
