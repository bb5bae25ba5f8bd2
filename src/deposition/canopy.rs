//! Jarvis-type canopy resistance.
//!
//! rc = rcmin / (LAI * F1 * F2 * F3 * F4), with four multiplicative
//! stress terms, each a pure function of the current timestamp's
//! meteorology and the fixed configuration. F2-F4 default to 1 when
//! disabled. F3 and F4 are deliberately NOT clamped: out-of-range values
//! surface as-is in rc and downstream flux, and choosing theta_wilt and
//! theta_ref consistent with the observed soil moisture range is the
//! modeler's responsibility.

use chrono::{Datelike, NaiveDateTime};

use crate::deposition::config::{LandUse, ModelConfig};
use crate::deposition::humidity::{actual_mixing_ratio, saturation_mixing_ratio};
use crate::models::MeteoRecord;
use crate::utils::constants::{DAYS_PER_YEAR, F1_SHAPE, F3_CURVATURE};

/// Radiation stress F1 (always active). Lies in (rcmin/rcmax, 1].
pub fn f1_radiation(radiation: f64, lai: f64, config: &ModelConfig) -> f64 {
    let f = F1_SHAPE * (radiation / config.rgl) * (2.0 / lai);
    (config.rc_min / config.rc_max + f) / (1.0 + f)
}

/// Vapor-deficit stress F2 = 1 / (1 + hs * (qs - qa)).
pub fn f2_vapor_deficit(air_temp: f64, rel_humidity: f64, config: &ModelConfig) -> f64 {
    let qs = saturation_mixing_ratio(air_temp);
    let qa = actual_mixing_ratio(air_temp, rel_humidity);
    1.0 / (1.0 + config.hs * (qs - qa))
}

/// Temperature stress F3 = 1 - 0.00166 * (Tref - Ta)^2.
///
/// Goes negative for Ta far from Tref; not clamped.
pub fn f3_temperature(air_temp: f64, config: &ModelConfig) -> f64 {
    let dt = config.tref - air_temp;
    1.0 - F3_CURVATURE * dt * dt
}

/// Soil-moisture stress F4: thickness-weighted average over the four
/// layers of (theta - theta_wilt) / (theta_ref - theta_wilt).
///
/// Intended range [0, 1]; not clamped.
pub fn f4_soil_moisture(soil_moisture: &[f64; 4], config: &ModelConfig) -> f64 {
    let total_depth: f64 = config.layer_depths.iter().sum();
    let span = config.theta_ref - config.theta_wilt;

    soil_moisture
        .iter()
        .zip(config.layer_depths.iter())
        .map(|(theta, depth)| (theta - config.theta_wilt) / span * depth / total_depth)
        .sum()
}

/// Seasonal LAI cosine: A + A * cos(2*pi*(doy - peak)/365), spanning
/// [0, 2A] with the maximum at `lai_peak_day`.
pub fn seasonal_lai(day_of_year: f64, config: &ModelConfig) -> f64 {
    let a = config.lai_amplitude;
    a + a * (2.0 * std::f64::consts::PI * (day_of_year - config.lai_peak_day) / DAYS_PER_YEAR).cos()
}

/// LAI in effect at `timestamp`: the configured constant, or the seasonal
/// cosine when variable LAI is enabled.
pub fn effective_lai(timestamp: NaiveDateTime, config: &ModelConfig) -> f64 {
    if config.enable_variable_lai {
        seasonal_lai(timestamp.ordinal() as f64, config)
    } else {
        config.lai
    }
}

/// Dry canopy resistance [s/m] for one meteorological record.
///
/// `WaterSurface` land use has no stomatal pathway and returns 0.
pub fn canopy_resistance(record: &MeteoRecord, config: &ModelConfig) -> f64 {
    if config.land_use == LandUse::WaterSurface {
        return 0.0;
    }

    let lai = effective_lai(record.timestamp, config);

    let f1 = f1_radiation(record.radiation, lai, config);
    let f2 = if config.enable_f2 {
        f2_vapor_deficit(record.air_temp, record.rel_humidity, config)
    } else {
        1.0
    };
    let f3 = if config.enable_f3 {
        f3_temperature(record.air_temp, config)
    } else {
        1.0
    };
    let f4 = if config.enable_f4 {
        f4_soil_moisture(&record.soil_moisture, config)
    } else {
        1.0
    };

    config.rc_min / (lai * f1 * f2 * f3 * f4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(radiation: f64, air_temp: f64) -> MeteoRecord {
        MeteoRecord::new(
            NaiveDate::from_ymd_opt(2023, 7, 19)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            radiation,
            air_temp,
            60.0,
            2.0,
            0.0,
            [0.2, 0.22, 0.25, 0.3],
        )
    }

    #[test]
    fn test_f1_at_zero_radiation() {
        // rcmin=40, rcmax=10000, LAI=2, Rgl=100, Rg=0: f=0, F1=0.004
        let config = ModelConfig::default();
        let f1 = f1_radiation(0.0, 2.0, &config);
        assert!((f1 - 0.004).abs() < 1e-12);

        let rc = canopy_resistance(&record(0.0, 20.0), &config);
        assert!((rc - 5000.0).abs() < 1e-9, "rc = {}", rc);
    }

    #[test]
    fn test_f1_at_200_radiation() {
        // f = 0.55 * 2 * 1 = 1.1, F1 = (0.004 + 1.1)/2.1
        let config = ModelConfig::default();
        let f1 = f1_radiation(200.0, 2.0, &config);
        assert!((f1 - 1.104 / 2.1).abs() < 1e-12);

        let rc = canopy_resistance(&record(200.0, 20.0), &config);
        assert!((rc - 38.04).abs() < 0.01, "rc = {}", rc);
    }

    #[test]
    fn test_f2_decreases_with_deficit() {
        let config = ModelConfig::default();
        // drier air, larger deficit, smaller F2
        assert!(f2_vapor_deficit(20.0, 40.0, &config) < f2_vapor_deficit(20.0, 90.0, &config));
        // saturated air: no deficit, F2 = 1
        assert!((f2_vapor_deficit(20.0, 100.0, &config) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_f3_unclamped_below_zero() {
        let config = ModelConfig::default();
        assert!((f3_temperature(config.tref, &config) - 1.0).abs() < 1e-12);
        // 30 K away from Tref: 1 - 0.00166 * 900 < 0, surfaced as-is
        assert!(f3_temperature(config.tref - 30.0, &config) < 0.0);
    }

    #[test]
    fn test_f4_weighted_average() {
        let config = ModelConfig::default();
        // uniform moisture at theta_ref gives exactly 1
        let f4 = f4_soil_moisture(&[0.30; 4], &config);
        assert!((f4 - 1.0).abs() < 1e-12);

        // uniform moisture at the wilting point gives 0
        let f4 = f4_soil_moisture(&[0.05; 4], &config);
        assert!(f4.abs() < 1e-12);

        // above theta_ref exceeds 1; not clamped
        let f4 = f4_soil_moisture(&[0.4; 4], &config);
        assert!(f4 > 1.0);
    }

    #[test]
    fn test_seasonal_lai_phase_and_amplitude() {
        let config = ModelConfig {
            enable_variable_lai: true,
            lai_amplitude: 1.5,
            lai_peak_day: 200.0,
            ..Default::default()
        };

        // maximum 2A at the peak day
        assert!((seasonal_lai(200.0, &config) - 3.0).abs() < 1e-12);
        // minimum ~0 half a year later
        assert!(seasonal_lai(200.0 + 182.5, &config).abs() < 1e-9);
    }

    #[test]
    fn test_water_surface_has_no_canopy() {
        let config = ModelConfig {
            land_use: LandUse::WaterSurface,
            ..Default::default()
        };
        assert_eq!(canopy_resistance(&record(300.0, 20.0), &config), 0.0);
    }

    #[test]
    fn test_optional_terms_only_increase_rc() {
        let base = ModelConfig::default();
        let all_on = ModelConfig {
            enable_f2: true,
            enable_f3: true,
            enable_f4: true,
            ..Default::default()
        };

        let r = record(300.0, 25.0);
        let rc_base = canopy_resistance(&r, &base);
        let rc_all = canopy_resistance(&r, &all_on);

        // at Tref with near-reference soil moisture the extra terms only
        // shrink conductance, so rc can only grow
        assert!(rc_all >= rc_base);
    }
}
