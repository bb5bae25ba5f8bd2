use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

use crate::analyzers::AggregateTable;
use crate::error::{ProcessingError, Result};
use crate::models::{FluxRow, FluxTable};
use crate::readers::meteo_reader::parse_timestamp;
use crate::utils::constants::{CSV_DELIMITER, FLUX_COLUMN_PREFIX, TIMESTAMP_FORMAT};

/// Semicolon-delimited export of the hourly flux table and its
/// aggregates. Missing values are written as empty fields.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the hourly flux table: `timestamp;F_NH3_<station>...`.
    pub fn write_flux_table(&self, table: &FluxTable, path: &Path) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(CSV_DELIMITER)
            .from_path(path)?;

        let mut header = vec!["timestamp".to_string()];
        header.extend(
            table
                .stations
                .iter()
                .map(|s| format!("{}{}", FLUX_COLUMN_PREFIX, s)),
        );
        writer.write_record(&header)?;

        for row in &table.rows {
            let mut record = vec![row.timestamp.format(TIMESTAMP_FORMAT).to_string()];
            record.extend(row.values.iter().map(format_value));
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Write an aggregate table: group key columns, then one mean-flux
    /// column per station.
    pub fn write_aggregate(&self, table: &AggregateTable, path: &Path) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .delimiter(CSV_DELIMITER)
            .from_path(path)?;

        let mut header = table.key_columns.clone();
        header.extend(
            table
                .stations
                .iter()
                .map(|s| format!("{}{}", FLUX_COLUMN_PREFIX, s)),
        );
        writer.write_record(&header)?;

        for row in &table.rows {
            let mut record = row.keys.clone();
            record.extend(row.values.iter().map(format_value));
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Read back a previously written hourly flux table.
    pub fn read_flux_table(&self, path: &Path) -> Result<FluxTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(CSV_DELIMITER)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        if headers.is_empty() || &headers[0] != "timestamp" {
            return Err(ProcessingError::InvalidFormat(
                "Flux table must start with a 'timestamp' column".to_string(),
            ));
        }

        let stations: Vec<String> = headers
            .iter()
            .skip(1)
            .map(|h| {
                h.strip_prefix(FLUX_COLUMN_PREFIX)
                    .map(|s| s.to_string())
                    .ok_or_else(|| {
                        ProcessingError::InvalidFormat(format!(
                            "Unexpected flux column name '{}'",
                            h
                        ))
                    })
            })
            .collect::<Result<_>>()?;

        let mut table = FluxTable::new(stations);
        for row in reader.records() {
            let row = row?;
            let timestamp = parse_timestamp(&row[0])?;
            let values = row
                .iter()
                .skip(1)
                .map(|field| {
                    if field.is_empty() {
                        Ok(None)
                    } else {
                        field.parse::<f64>().map(Some).map_err(|_| {
                            ProcessingError::InvalidFormat(format!(
                                "Invalid flux value: '{}'",
                                field
                            ))
                        })
                    }
                })
                .collect::<Result<_>>()?;

            table.rows.push(FluxRow { timestamp, values });
        }

        Ok(table)
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn format_value(value: &Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn sample_table() -> FluxTable {
        let start = NaiveDate::from_ymd_opt(2023, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut table = FluxTable::new(vec!["wekerom".to_string(), "zegveld".to_string()]);
        for h in 0..4 {
            table.rows.push(FluxRow {
                timestamp: start + Duration::hours(h),
                values: vec![Some(0.0123 + h as f64 * 0.001), (h != 2).then_some(0.0456)],
            });
        }
        table
    }

    #[test]
    fn test_flux_table_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flux_hourly.csv");
        let table = sample_table();

        let writer = CsvWriter::new();
        writer.write_flux_table(&table, &path).unwrap();
        let parsed = writer.read_flux_table(&path).unwrap();

        assert_eq!(parsed.stations, table.stations);
        assert_eq!(parsed.rows.len(), table.rows.len());
        for (a, b) in parsed.rows.iter().zip(table.rows.iter()) {
            assert_eq!(a.timestamp, b.timestamp);
            assert_eq!(a.values, b.values);
        }
    }

    #[test]
    fn test_header_uses_literal_column_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flux_hourly.csv");
        CsvWriter::new()
            .write_flux_table(&sample_table(), &path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, "timestamp;F_NH3_wekerom;F_NH3_zegveld");

        // missing value is an empty field
        let row_with_gap = content.lines().nth(3).unwrap();
        assert!(row_with_gap.ends_with(';'));
    }

    #[test]
    fn test_write_aggregate() {
        use crate::analyzers::{AggregateRow, AggregateTable};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flux_annual.csv");
        let table = AggregateTable {
            key_columns: vec!["year".to_string()],
            stations: vec!["wekerom".to_string()],
            rows: vec![AggregateRow {
                keys: vec!["2023".to_string()],
                values: vec![Some(0.01)],
            }],
        };

        CsvWriter::new().write_aggregate(&table, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "year;F_NH3_wekerom\n2023;0.01\n");
    }
}
