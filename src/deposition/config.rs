use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::*;

/// Wet-canopy accounting mode.
///
/// `RowWindow` replicates the positional behavior of the original
/// analysis: rain rows and the 3 following rows are zeroed, regardless of
/// gaps in the series. `TimeWindow` zeroes by elapsed time instead and is
/// robust under irregular sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WetCanopyMode {
    #[default]
    Off,
    RowWindow,
    TimeWindow,
}

impl WetCanopyMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, WetCanopyMode::Off)
    }
}

/// Land-use class. `WaterSurface` removes the stomatal pathway entirely
/// (rc forced to 0); the Jarvis model only applies to `Vegetated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LandUse {
    #[default]
    Vegetated,
    WaterSurface,
}

/// Immutable model configuration: site parameters plus option flags.
///
/// Validated once at setup; the per-timestamp computations assume a valid
/// configuration and never re-check divisors.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ModelConfig {
    /// Reference (measurement) height z [m]
    #[validate(range(min = 0.1, max = 100.0))]
    pub reference_height: f64,

    /// Displacement height zd [m]
    #[validate(range(min = 0.0, max = 50.0))]
    pub displacement_height: f64,

    /// Roughness length z0 [m]
    #[validate(range(min = 0.0001, max = 5.0))]
    pub roughness_length: f64,

    /// Boundary-layer resistance rb [s/m]; a constant, never derived
    /// from meteorology
    #[validate(range(min = 0.0, max = 1000.0))]
    pub rb: f64,

    /// Minimum canopy resistance rcmin [s/m]
    #[validate(range(min = 1.0, max = 5000.0))]
    pub rc_min: f64,

    /// Maximum canopy resistance rcmax [s/m]
    #[validate(range(min = 100.0, max = 100000.0))]
    pub rc_max: f64,

    /// Radiation scale Rgl in the F1 term [W/m2]
    #[validate(range(min = 1.0, max = 1000.0))]
    pub rgl: f64,

    /// Constant leaf area index [m2/m2]; used unless `enable_variable_lai`
    #[validate(range(min = 0.01, max = 15.0))]
    pub lai: f64,

    /// Seasonal LAI cosine amplitude A [m2/m2]
    #[validate(range(min = 0.01, max = 10.0))]
    pub lai_amplitude: f64,

    /// Day of year with peak LAI
    #[validate(range(min = 1.0, max = 366.0))]
    pub lai_peak_day: f64,

    /// Vapor-deficit slope hs in the F2 term [kg/kg]^-1
    #[validate(range(min = 0.0, max = 500.0))]
    pub hs: f64,

    /// Optimum temperature Tref in the F3 term [degC]
    #[validate(range(min = -20.0, max = 45.0))]
    pub tref: f64,

    /// Wilting-point soil moisture [m3/m3]
    #[validate(range(min = 0.0, max = 0.5))]
    pub theta_wilt: f64,

    /// Reference (field-capacity) soil moisture [m3/m3]
    #[validate(range(min = 0.01, max = 0.8))]
    pub theta_ref: f64,

    /// Soil layer thicknesses [m], shallowest first
    pub layer_depths: [f64; 4],

    // Option flags, replacing the original inline toggle branches
    pub enable_variable_lai: bool,
    pub enable_f2: bool,
    pub enable_f3: bool,
    pub enable_f4: bool,
    pub wet_canopy_mode: WetCanopyMode,
    pub land_use: LandUse,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            reference_height: DEFAULT_REFERENCE_HEIGHT,
            displacement_height: DEFAULT_DISPLACEMENT_HEIGHT,
            roughness_length: DEFAULT_ROUGHNESS_LENGTH,
            rb: DEFAULT_RB,
            rc_min: DEFAULT_RC_MIN,
            rc_max: DEFAULT_RC_MAX,
            rgl: DEFAULT_RGL,
            lai: DEFAULT_LAI,
            lai_amplitude: DEFAULT_LAI_AMPLITUDE,
            lai_peak_day: DEFAULT_LAI_PEAK_DAY,
            hs: DEFAULT_HS,
            tref: DEFAULT_TREF,
            theta_wilt: DEFAULT_THETA_WILT,
            theta_ref: DEFAULT_THETA_REF,
            layer_depths: DEFAULT_LAYER_DEPTHS,
            enable_variable_lai: false,
            enable_f2: false,
            enable_f3: false,
            enable_f4: false,
            wet_canopy_mode: WetCanopyMode::Off,
            land_use: LandUse::Vegetated,
        }
    }
}

impl ModelConfig {
    /// Load a configuration from a JSON file, falling back to defaults
    /// for absent fields.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ModelConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Full setup-time validation: derive ranges plus the cross-field
    /// constraints the derive cannot express. The log argument in ra and
    /// the divisors in the canopy formulas are only guarded here.
    pub fn validate_setup(&self) -> Result<()> {
        self.validate()?;

        if self.reference_height <= self.displacement_height {
            return Err(ProcessingError::Config(format!(
                "Reference height {} must exceed displacement height {}",
                self.reference_height, self.displacement_height
            )));
        }
        if self.rc_max <= self.rc_min {
            return Err(ProcessingError::Config(format!(
                "rcmax {} must exceed rcmin {}",
                self.rc_max, self.rc_min
            )));
        }
        if self.theta_ref <= self.theta_wilt {
            return Err(ProcessingError::Config(format!(
                "theta_ref {} must exceed theta_wilt {}",
                self.theta_ref, self.theta_wilt
            )));
        }
        if self.layer_depths.iter().any(|d| *d <= 0.0) {
            return Err(ProcessingError::Config(
                "Soil layer thicknesses must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
