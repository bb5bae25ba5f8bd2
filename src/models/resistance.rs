use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Resistance network state for one timestamp [s/m].
///
/// All components derive from the meteorology at the same timestamp; the
/// only cross-timestamp coupling is the wet-canopy carry-forward baked
/// into `rc_wet`. `rt` already reflects the configured wet-canopy mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResistanceRecord {
    pub timestamp: NaiveDateTime,
    /// Aerodynamic resistance (infinite at zero wind speed)
    pub ra: f64,
    /// Quasi-laminar boundary-layer resistance
    pub rb: f64,
    /// Canopy resistance, dry
    pub rc: f64,
    /// Canopy resistance with the wet-canopy override applied
    pub rc_wet: f64,
    /// Total resistance ra + rb + rc(_wet)
    pub rt: f64,
}

impl ResistanceRecord {
    pub fn has_finite_total(&self) -> bool {
        self.rt.is_finite() && self.rt > 0.0
    }
}

/// The resistance series computed over a meteorological series.
#[derive(Debug, Clone, Default)]
pub struct ResistanceSeries {
    pub records: Vec<ResistanceRecord>,
}

impl ResistanceSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
