//! Deterministic terms of the load/weather model.
//!
//! The generator adds noise on top of these; everything here is a pure
//! function of the calendar position and the preset constants.

use std::f64::consts::PI;

use crate::calendar::HourStamp;
use crate::models::ModelParams;

/// Day of year of the seasonal trough (mid-January); the peak falls half a
/// cycle later, in mid-July.
const SEASON_PHASE_DAY: f64 = 15.0;
const DAYS_PER_CYCLE: f64 = 365.0;
/// Hour at which the diurnal temperature sinusoid crosses its mean going up.
const TEMP_PHASE_HOUR: f64 = 6.0;

/// Hours (inclusive) that get the peak boost.
pub const MORNING_PEAK: (u32, u32) = (7, 10);
pub const EVENING_PEAK: (u32, u32) = (17, 20);

/// Unit seasonal wave in `[-1, 1]`: -1 at the mid-January trough.
pub fn seasonal_wave(day_of_year: u32) -> f64 {
    -(2.0 * PI * (day_of_year as f64 - SEASON_PHASE_DAY) / DAYS_PER_CYCLE).cos()
}

/// Mean temperature for the day, before diurnal swing and noise.
pub fn climate_baseline(p: &ModelParams, day_of_year: u32) -> f64 {
    p.temp_mean_c + p.temp_seasonal_amplitude_c * seasonal_wave(day_of_year)
}

pub fn warming_trend(p: &ModelParams, year_offset: i32) -> f64 {
    year_offset as f64 * p.warming_per_year_c
}

/// Diurnal temperature swing; minimum at 00:00, rising through the morning.
pub fn diurnal_temperature(p: &ModelParams, hour: u32) -> f64 {
    p.temp_diurnal_amplitude_c * (2.0 * PI * (hour as f64 - TEMP_PHASE_HOUR) / 24.0).sin()
}

/// Noise-free temperature for an hour.
pub fn expected_temperature(p: &ModelParams, stamp: &HourStamp) -> f64 {
    climate_baseline(p, stamp.day_of_year)
        + warming_trend(p, stamp.year_offset)
        + diurnal_temperature(p, stamp.hour)
}

pub fn base_load(p: &ModelParams, hour: u32) -> f64 {
    p.load_mean_mw + p.load_diurnal_amplitude_mw * (2.0 * PI * hour as f64 / 24.0).sin()
}

/// Heating/cooling demand; zero inside the comfort band.
pub fn temperature_effect(p: &ModelParams, temperature_c: f64) -> f64 {
    if temperature_c < p.comfort_low_c {
        p.heating_mw * (p.comfort_low_c - temperature_c) / p.heating_span_c
    } else if temperature_c > p.comfort_high_c {
        p.cooling_mw * (temperature_c - p.comfort_high_c) / p.cooling_span_c
    } else {
        0.0
    }
}

pub fn seasonal_factor(p: &ModelParams, day_of_year: u32) -> f64 {
    1.0 + p.seasonal_load_amplitude * seasonal_wave(day_of_year)
}

pub fn weekday_factor(p: &ModelParams, is_weekend: bool) -> f64 {
    if is_weekend { p.weekend_factor } else { 1.0 }
}

pub fn growth_factor(p: &ModelParams, year_offset: i32) -> f64 {
    1.0 + year_offset as f64 * p.growth_per_year
}

pub fn is_peak_hour(hour: u32) -> bool {
    (MORNING_PEAK.0..=MORNING_PEAK.1).contains(&hour) || (EVENING_PEAK.0..=EVENING_PEAK.1).contains(&hour)
}

pub fn peak_multiplier(p: &ModelParams, hour: u32) -> f64 {
    if is_peak_hour(hour) { p.peak_boost } else { 1.0 }
}

/// Load before the additive noise term, given the (noisy) temperature.
pub fn structural_load(p: &ModelParams, stamp: &HourStamp, temperature_c: f64) -> f64 {
    (base_load(p, stamp.hour) + temperature_effect(p, temperature_c))
        * seasonal_factor(p, stamp.day_of_year)
        * weekday_factor(p, stamp.is_weekend())
        * growth_factor(p, stamp.year_offset)
}

/// Round to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Preset;

    fn basic() -> ModelParams {
        ModelParams::for_preset(Preset::Basic)
    }

    #[test]
    fn climate_peaks_in_summer_and_troughs_in_january() {
        let p = basic();
        let coldest = (1..=365)
            .min_by(|a, b| climate_baseline(&p, *a).total_cmp(&climate_baseline(&p, *b)))
            .unwrap();
        let warmest = (1..=365)
            .max_by(|a, b| climate_baseline(&p, *a).total_cmp(&climate_baseline(&p, *b)))
            .unwrap();
        assert_eq!(coldest, 15);
        assert!((197..=198).contains(&warmest), "warmest day {warmest}");
        assert!((climate_baseline(&p, 15) + 15.0).abs() < 1e-9);
        assert!((climate_baseline(&p, 197) - 35.0).abs() < 0.01);
    }

    #[test]
    fn seasonal_load_factor_follows_temperature() {
        let p = basic();
        assert!((seasonal_factor(&p, 15) - 0.85).abs() < 1e-9);
        assert!(seasonal_factor(&p, 197) > 1.149);
    }

    #[test]
    fn diurnal_temperature_is_lowest_pre_dawn() {
        let p = basic();
        let min_hour = (0..24)
            .min_by(|a, b| diurnal_temperature(&p, *a).total_cmp(&diurnal_temperature(&p, *b)))
            .unwrap();
        assert!(min_hour == 0, "min at {min_hour}");
        assert!(diurnal_temperature(&p, 12) > 7.9);
    }

    #[test]
    fn temperature_effect_is_zero_in_comfort_band() {
        let p = basic();
        assert_eq!(temperature_effect(&p, 0.0), 0.0);
        assert_eq!(temperature_effect(&p, 12.0), 0.0);
        assert_eq!(temperature_effect(&p, 25.0), 0.0);
        assert!((temperature_effect(&p, -15.0) - 300.0).abs() < 1e-9);
        assert!((temperature_effect(&p, 35.0) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn weekend_discount_and_peak_hours() {
        let p = basic();
        assert_eq!(weekday_factor(&p, false), 1.0);
        assert_eq!(weekday_factor(&p, true), 0.85);

        let peaks: Vec<u32> = (0..24).filter(|h| is_peak_hour(*h)).collect();
        assert_eq!(peaks, vec![7, 8, 9, 10, 17, 18, 19, 20]);
        assert_eq!(peak_multiplier(&p, 6), 1.0);
        assert_eq!(peak_multiplier(&p, 18), 1.12);
    }

    #[test]
    fn growth_only_in_extended() {
        let basic = basic();
        let extended = ModelParams::for_preset(Preset::Extended);
        assert_eq!(growth_factor(&basic, 3), 1.0);
        assert!((growth_factor(&extended, 2) - 1.03).abs() < 1e-12);
        assert!((warming_trend(&extended, 10) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rounding() {
        assert_eq!(round1(1.04), 1.0);
        assert_eq!(round1(1.06), 1.1);
        assert_eq!(round1(-2.26), -2.3);
    }
}
