//! Model constants per preset.

use crate::domain::Preset;

/// Closed `[min, max]` interval applied after noise injection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipBounds {
    pub min: f64,
    pub max: f64,
}

impl ClipBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clip(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Every constant the generator needs.
///
/// The shape terms (climate sinusoid, diurnal cycles, temperature response,
/// peak boost) are shared; presets differ in bounds, reserve and trend terms.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    pub preset: Preset,

    pub temp_mean_c: f64,
    pub temp_seasonal_amplitude_c: f64,
    pub temp_diurnal_amplitude_c: f64,
    pub temp_noise_std_c: f64,
    pub warming_per_year_c: f64,

    pub load_mean_mw: f64,
    pub load_diurnal_amplitude_mw: f64,
    pub load_noise_std_mw: f64,
    /// Extra MW per degree below 0 °C is `heating_mw / heating_span_c`.
    pub heating_mw: f64,
    pub heating_span_c: f64,
    /// Extra MW per degree above 25 °C is `cooling_mw / cooling_span_c`.
    pub cooling_mw: f64,
    pub cooling_span_c: f64,
    pub comfort_low_c: f64,
    pub comfort_high_c: f64,
    pub seasonal_load_amplitude: f64,
    pub weekend_factor: f64,
    pub growth_per_year: f64,
    pub peak_boost: f64,

    /// Probability that a given hour is an anomaly (0 disables injection).
    pub anomaly_rate: f64,
    pub anomaly_factor_min: f64,
    pub anomaly_factor_max: f64,

    pub wind_gamma_shape: f64,
    pub wind_gamma_scale: f64,

    pub reserve_margin_mw: f64,
    pub capacity_noise_std_mw: f64,

    pub temperature_bounds: ClipBounds,
    pub load_bounds: ClipBounds,
    pub wind_bounds: ClipBounds,
    pub capacity_bounds: ClipBounds,
}

impl ModelParams {
    pub fn for_preset(preset: Preset) -> Self {
        match preset {
            Preset::Basic => Self::basic(),
            Preset::Extended => Self::extended(),
        }
    }

    fn basic() -> Self {
        Self {
            preset: Preset::Basic,
            temp_mean_c: 10.0,
            temp_seasonal_amplitude_c: 25.0,
            temp_diurnal_amplitude_c: 8.0,
            temp_noise_std_c: 2.0,
            warming_per_year_c: 0.0,
            load_mean_mw: 4000.0,
            load_diurnal_amplitude_mw: 800.0,
            load_noise_std_mw: 120.0,
            heating_mw: 300.0,
            heating_span_c: 15.0,
            cooling_mw: 200.0,
            cooling_span_c: 10.0,
            comfort_low_c: 0.0,
            comfort_high_c: 25.0,
            seasonal_load_amplitude: 0.15,
            weekend_factor: 0.85,
            growth_per_year: 0.0,
            peak_boost: 1.12,
            anomaly_rate: 0.0,
            anomaly_factor_min: 1.0,
            anomaly_factor_max: 1.0,
            wind_gamma_shape: 2.0,
            wind_gamma_scale: 1.5,
            reserve_margin_mw: 800.0,
            capacity_noise_std_mw: 80.0,
            temperature_bounds: ClipBounds::new(-15.0, 35.0),
            load_bounds: ClipBounds::new(2500.0, 5500.0),
            wind_bounds: ClipBounds::new(0.0, 15.0),
            capacity_bounds: ClipBounds::new(5000.0, 7000.0),
        }
    }

    fn extended() -> Self {
        Self {
            preset: Preset::Extended,
            warming_per_year_c: 0.05,
            growth_per_year: 0.015,
            anomaly_rate: 0.001,
            anomaly_factor_min: 0.6,
            anomaly_factor_max: 1.4,
            reserve_margin_mw: 1000.0,
            temperature_bounds: ClipBounds::new(-35.0, 45.0),
            load_bounds: ClipBounds::new(2000.0, 8000.0),
            wind_bounds: ClipBounds::new(0.0, 25.0),
            capacity_bounds: ClipBounds::new(2500.0, 9500.0),
            ..Self::basic()
        }
    }

    pub fn anomalies_enabled(&self) -> bool {
        self.anomaly_rate > 0.0
    }
}
