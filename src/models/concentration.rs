use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};

/// One hourly ambient NH3 observation [ug/m3].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationRecord {
    pub timestamp: NaiveDateTime,
    pub nh3: f64,
}

impl ConcentrationRecord {
    pub fn new(timestamp: NaiveDateTime, nh3: f64) -> Self {
        Self { timestamp, nh3 }
    }

    pub fn is_valid_concentration(&self) -> bool {
        self.nh3.is_finite() && self.nh3 >= 0.0
    }
}

/// A named per-station concentration series, sorted by timestamp.
///
/// Stations are independent; the series is not required to share a
/// timestamp grid with the meteorology.
#[derive(Debug, Clone)]
pub struct StationSeries {
    pub station: String,
    pub records: Vec<ConcentrationRecord>,
}

impl StationSeries {
    pub fn new(station: impl Into<String>, mut records: Vec<ConcentrationRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self {
            station: station.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.station.is_empty() {
            return Err(ProcessingError::Config(
                "Station label must not be empty".to_string(),
            ));
        }
        for record in &self.records {
            if !record.is_valid_concentration() {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Invalid NH3 concentration {} at {} for station {}",
                    record.nh3, record.timestamp, self.station
                )));
            }
        }
        for pair in self.records.windows(2) {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(ProcessingError::SeriesAlignment(format!(
                    "Duplicate or out-of-order timestamp {} for station {}",
                    pair[1].timestamp, self.station
                )));
            }
        }
        Ok(())
    }
}
