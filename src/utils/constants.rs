/// Gas constants [J/(kg*K)]
pub const RD: f64 = 287.0;
pub const RV: f64 = 461.5;

/// Reference surface pressure [hPa]
pub const P0: f64 = 1013.25;

/// Magnus formula constants (base-10 form, es in hPa, Ta in degC)
pub const ES0: f64 = 6.1078;
pub const MAGNUS_A: f64 = 7.5;
pub const MAGNUS_B: f64 = 237.3;

/// von Karman constant
pub const VON_KARMAN: f64 = 0.4;

/// Temperature stress curvature in the Jarvis F3 term [1/K^2]
pub const F3_CURVATURE: f64 = 0.00166;

/// Radiation stress shape factor in the Jarvis F1 term
pub const F1_SHAPE: f64 = 0.55;

/// Days per year used by the seasonal LAI cosine
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Wet-canopy window length after the last rain hour [rows/hours]
pub const WET_WINDOW_HOURS: usize = 3;

/// Default site / model parameters
pub const DEFAULT_REFERENCE_HEIGHT: f64 = 10.0; // z [m]
pub const DEFAULT_DISPLACEMENT_HEIGHT: f64 = 0.7; // zd [m]
pub const DEFAULT_ROUGHNESS_LENGTH: f64 = 0.1; // z0 [m]
pub const DEFAULT_RB: f64 = 5.0; // [s/m]
pub const DEFAULT_RC_MIN: f64 = 40.0; // [s/m]
pub const DEFAULT_RC_MAX: f64 = 10_000.0; // [s/m]
pub const DEFAULT_RGL: f64 = 100.0; // [W/m2]
pub const DEFAULT_LAI: f64 = 2.0; // [m2/m2]
pub const DEFAULT_LAI_AMPLITUDE: f64 = 1.5; // [m2/m2]
pub const DEFAULT_LAI_PEAK_DAY: f64 = 200.0; // day of year
pub const DEFAULT_HS: f64 = 36.35; // vapor-deficit slope [kg/kg]^-1
pub const DEFAULT_TREF: f64 = 25.0; // [degC]
pub const DEFAULT_THETA_WILT: f64 = 0.05; // [m3/m3]
pub const DEFAULT_THETA_REF: f64 = 0.30; // [m3/m3]

/// Soil layer thicknesses at nominal depths 065/125/250/500 mm [m]
pub const DEFAULT_LAYER_DEPTHS: [f64; 4] = [0.065, 0.125, 0.25, 0.5];

/// Timestamp formats accepted by the readers
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const TIMESTAMP_FORMAT_SHORT: &str = "%Y-%m-%d %H:%M";

/// Output file names
pub const FLUX_HOURLY_FILE: &str = "flux_hourly.csv";
pub const FLUX_SEASONAL_FILE: &str = "flux_seasonal.csv";
pub const FLUX_DIURNAL_FILE: &str = "flux_diurnal.csv";
pub const FLUX_ANNUAL_FILE: &str = "flux_annual.csv";

/// Output column prefix for per-station flux
pub const FLUX_COLUMN_PREFIX: &str = "F_NH3_";

/// CSV delimiter for all input and output tables
pub const CSV_DELIMITER: u8 = b';';
