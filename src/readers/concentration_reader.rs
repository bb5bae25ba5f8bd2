use csv::ReaderBuilder;
use std::path::Path;

use crate::error::{ProcessingError, Result};
use crate::models::{ConcentrationRecord, StationSeries};
use crate::readers::meteo_reader::parse_timestamp;
use crate::utils::constants::CSV_DELIMITER;

/// Reads a per-station NH3 concentration table: `timestamp;NH3`.
///
/// The station label defaults to the file stem (e.g. `wekerom.csv` ->
/// `wekerom`) and can be overridden per file.
pub struct ConcentrationReader;

impl ConcentrationReader {
    pub fn new() -> Self {
        Self
    }

    /// Extract the station label from the file name.
    pub fn station_from_path(&self, path: &Path) -> Result<String> {
        path.file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "Cannot derive a station label from '{}'",
                    path.display()
                ))
            })
    }

    pub fn read_station(&self, path: &Path) -> Result<StationSeries> {
        let station = self.station_from_path(path)?;
        self.read_station_with_label(path, &station)
    }

    pub fn read_station_with_label(&self, path: &Path, station: &str) -> Result<StationSeries> {
        let mut reader = ReaderBuilder::new()
            .delimiter(CSV_DELIMITER)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            if row.len() < 2 {
                return Err(ProcessingError::InvalidFormat(format!(
                    "Concentration row has {} fields, expected 2",
                    row.len()
                )));
            }

            // empty concentration means a missing hour
            if row[1].is_empty() {
                continue;
            }

            let timestamp = parse_timestamp(&row[0])?;
            let nh3 = row[1].parse::<f64>().map_err(|_| {
                ProcessingError::InvalidFormat(format!("Invalid NH3 value: '{}'", &row[1]))
            })?;

            records.push(ConcentrationRecord::new(timestamp, nh3));
        }

        let series = StationSeries::new(station, records);
        series.validate()?;
        Ok(series)
    }
}

impl Default for ConcentrationReader {
    fn default() -> Self {
        Self::new()
    }
}
