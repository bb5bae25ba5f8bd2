use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ProcessingError, Result};

/// One hourly meteorological observation.
///
/// Soil moisture is sampled at four nominal depths (065/125/250/500 mm),
/// ordered shallowest first.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MeteoRecord {
    pub timestamp: NaiveDateTime,

    /// Global radiation [W/m2]
    #[validate(range(min = 0.0, max = 1500.0))]
    pub radiation: f64,

    /// Air temperature [degC]
    #[validate(range(min = -50.0, max = 50.0))]
    pub air_temp: f64,

    /// Relative humidity [%]
    #[validate(range(min = 0.0, max = 100.0))]
    pub rel_humidity: f64,

    /// Wind speed [m/s]
    #[validate(range(min = 0.0, max = 75.0))]
    pub wind_speed: f64,

    /// Precipitation [mm/hr]
    #[validate(range(min = 0.0, max = 300.0))]
    pub precipitation: f64,

    /// Volumetric soil moisture per layer [m3/m3]
    pub soil_moisture: [f64; 4],
}

impl MeteoRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timestamp: NaiveDateTime,
        radiation: f64,
        air_temp: f64,
        rel_humidity: f64,
        wind_speed: f64,
        precipitation: f64,
        soil_moisture: [f64; 4],
    ) -> Self {
        Self {
            timestamp,
            radiation,
            air_temp,
            rel_humidity,
            wind_speed,
            precipitation,
            soil_moisture,
        }
    }

    pub fn is_raining(&self) -> bool {
        self.precipitation > 0.0
    }

    pub fn validate_soil_moisture(&self) -> Result<()> {
        for (i, theta) in self.soil_moisture.iter().enumerate() {
            if !(0.0..=1.0).contains(theta) {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Soil moisture {} in layer {} is outside [0, 1]",
                    theta, i
                )));
            }
        }
        Ok(())
    }
}

/// A meteorological series, sorted by timestamp.
#[derive(Debug, Clone, Default)]
pub struct MeteoSeries {
    pub records: Vec<MeteoRecord>,
}

impl MeteoSeries {
    pub fn new(mut records: Vec<MeteoRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check the series is strictly increasing in time.
    pub fn validate_ordering(&self) -> Result<()> {
        for pair in self.records.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(ProcessingError::SeriesAlignment(format!(
                    "Duplicate or out-of-order timestamp {}",
                    pair[1].timestamp
                )));
            }
        }
        Ok(())
    }
}
