use csv::{ReaderBuilder, StringRecord};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{ProcessingError, Result};
use crate::models::{MeteoRecord, MeteoSeries};
use crate::utils::constants::{CSV_DELIMITER, TIMESTAMP_FORMAT, TIMESTAMP_FORMAT_SHORT};

/// Reads the semicolon-delimited meteorology table:
/// `timestamp;Rg;Ta;RH;u;P;SM065;SM125;SM250;SM500`.
///
/// Rows with any empty numeric field are skipped (missing values
/// propagate as absent timestamps); non-empty unparseable fields are
/// fatal load errors.
pub struct MeteoReader {
    use_mmap: bool,
}

impl MeteoReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    pub fn read_meteo(&self, path: &Path) -> Result<MeteoSeries> {
        if self.use_mmap {
            let file = File::open(path)?;
            let mmap = unsafe { Mmap::map(&file)? };
            self.read_from(&mmap[..])
        } else {
            let file = File::open(path)?;
            self.read_from(file)
        }
    }

    fn read_from<R: Read>(&self, source: R) -> Result<MeteoSeries> {
        let mut reader = ReaderBuilder::new()
            .delimiter(CSV_DELIMITER)
            .trim(csv::Trim::All)
            .from_reader(source);

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            if let Some(record) = self.parse_row(&row)? {
                records.push(record);
            }
        }

        Ok(MeteoSeries::new(records))
    }

    fn parse_row(&self, row: &StringRecord) -> Result<Option<MeteoRecord>> {
        if row.len() < 10 {
            return Err(ProcessingError::InvalidFormat(format!(
                "Meteorology row has {} fields, expected 10",
                row.len()
            )));
        }

        // any empty numeric field marks the whole hour as missing
        if row.iter().skip(1).any(|field| field.is_empty()) {
            return Ok(None);
        }

        let timestamp = parse_timestamp(&row[0])?;
        let radiation = parse_value(&row[1], "Rg")?;
        let air_temp = parse_value(&row[2], "Ta")?;
        let rel_humidity = parse_value(&row[3], "RH")?;
        let wind_speed = parse_value(&row[4], "u")?;
        let precipitation = parse_value(&row[5], "P")?;
        let soil_moisture = [
            parse_value(&row[6], "SM065")?,
            parse_value(&row[7], "SM125")?,
            parse_value(&row[8], "SM250")?,
            parse_value(&row[9], "SM500")?,
        ];

        Ok(Some(MeteoRecord::new(
            timestamp,
            radiation,
            air_temp,
            rel_humidity,
            wind_speed,
            precipitation,
            soil_moisture,
        )))
    }
}

impl Default for MeteoReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a timestamp in `%Y-%m-%d %H:%M:%S` or `%Y-%m-%d %H:%M` form.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT_SHORT))
        .map_err(|_| {
            ProcessingError::InvalidFormat(format!("Invalid timestamp: '{}'", value))
        })
}

fn parse_value(value: &str, column: &str) -> Result<f64> {
    value.parse::<f64>().map_err(|_| {
        ProcessingError::InvalidFormat(format!("Invalid {} value: '{}'", column, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "timestamp;Rg;Ta;RH;u;P;SM065;SM125;SM250;SM500";

    fn write_meteo_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file
    }

    #[test]
    fn test_read_meteo_file() {
        let file = write_meteo_file(&[
            "2023-06-01 00:00:00;0.0;12.5;88;1.4;0.0;0.21;0.23;0.26;0.30",
            "2023-06-01 01:00:00;0.0;12.1;90;1.2;0.4;0.21;0.23;0.26;0.30",
        ]);

        let series = MeteoReader::new().read_meteo(file.path()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.records[0].air_temp, 12.5);
        assert!(series.records[1].is_raining());
    }

    #[test]
    fn test_mmap_path_matches_buffered() {
        let file = write_meteo_file(&[
            "2023-06-01 00:00:00;150;15.0;70;2.0;0.0;0.2;0.2;0.2;0.2",
        ]);

        let buffered = MeteoReader::new().read_meteo(file.path()).unwrap();
        let mapped = MeteoReader::with_mmap(true).read_meteo(file.path()).unwrap();

        assert_eq!(buffered.len(), mapped.len());
        assert_eq!(buffered.records[0].radiation, mapped.records[0].radiation);
    }

    #[test]
    fn test_empty_field_skips_row() {
        let file = write_meteo_file(&[
            "2023-06-01 00:00:00;0.0;12.5;88;;0.0;0.21;0.23;0.26;0.30",
            "2023-06-01 01:00:00;0.0;12.1;90;1.2;0.0;0.21;0.23;0.26;0.30",
        ]);

        let series = MeteoReader::new().read_meteo(file.path()).unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_bad_timestamp_is_fatal() {
        let file = write_meteo_file(&[
            "01/06/2023 00:00;0.0;12.5;88;1.4;0.0;0.21;0.23;0.26;0.30",
        ]);
        assert!(MeteoReader::new().read_meteo(file.path()).is_err());
    }

    #[test]
    fn test_non_numeric_field_is_fatal() {
        let file = write_meteo_file(&[
            "2023-06-01 00:00:00;0.0;twelve;88;1.4;0.0;0.21;0.23;0.26;0.30",
        ]);
        assert!(MeteoReader::new().read_meteo(file.path()).is_err());
    }

    #[test]
    fn test_short_timestamp_format() {
        assert!(parse_timestamp("2023-06-01 13:00").is_ok());
        assert!(parse_timestamp("2023-06-01 13:00:00").is_ok());
        assert!(parse_timestamp("20230601").is_err());
    }
}
