/// Water-vapor mixing ratios from temperature and relative humidity.
///
/// Pure functions over f64. Saturation vapor pressure uses the base-10
/// Magnus form; mixing ratios come from the ideal-gas ratio Rd/Rv against
/// a fixed reference pressure. These feed the Jarvis F2 vapor-deficit
/// term and are only evaluated when F2 is enabled.
use crate::utils::constants::{ES0, MAGNUS_A, MAGNUS_B, P0, RD, RV};

/// Saturation vapor pressure [hPa] at air temperature `air_temp` [degC].
///
/// es = es0 * 10^(a*Ta / (b + Ta))
pub fn saturation_vapor_pressure(air_temp: f64) -> f64 {
    ES0 * 10f64.powf(MAGNUS_A * air_temp / (MAGNUS_B + air_temp))
}

/// Saturation mixing ratio [kg/kg] at `air_temp` [degC].
pub fn saturation_mixing_ratio(air_temp: f64) -> f64 {
    (RD / RV) * saturation_vapor_pressure(air_temp) / P0
}

/// Actual mixing ratio [kg/kg] from relative humidity [%].
pub fn actual_mixing_ratio(air_temp: f64, rel_humidity: f64) -> f64 {
    rel_humidity * saturation_mixing_ratio(air_temp) / 100.0
}
