/// Aerodynamic resistance under neutral stratification.
///
/// No Monin-Obukhov stability correction is applied; extending this with
/// a stability term would need friction velocity or sensible heat flux as
/// additional inputs.
use crate::deposition::config::ModelConfig;
use crate::utils::constants::VON_KARMAN;

/// Aerodynamic resistance ra [s/m] at wind speed `wind_speed` [m/s].
///
/// ra = ln^2((z - zd)/z0) / (k^2 * u)
///
/// Returns +inf at u = 0 (IEEE division); the configuration guarantees
/// z - zd > 0 and z0 > 0 so the log argument is always valid.
pub fn aerodynamic_resistance(wind_speed: f64, config: &ModelConfig) -> f64 {
    let log_profile = ((config.reference_height - config.displacement_height)
        / config.roughness_length)
        .ln();
    log_profile * log_profile / (VON_KARMAN * VON_KARMAN * wind_speed)
}
