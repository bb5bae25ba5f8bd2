use chrono::{Datelike, Timelike};
use std::collections::BTreeMap;

use crate::error::{ProcessingError, Result};
use crate::models::FluxTable;

/// An aggregate of the flux table: rows keyed by one or more group
/// columns, one mean-flux column per station. `None` marks a group with
/// no values for that station.
#[derive(Debug, Clone)]
pub struct AggregateTable {
    pub key_columns: Vec<String>,
    pub stations: Vec<String>,
    pub rows: Vec<AggregateRow>,
}

#[derive(Debug, Clone)]
pub struct AggregateRow {
    pub keys: Vec<String>,
    pub values: Vec<Option<f64>>,
}

/// Per-station summary statistics over the hourly flux table.
#[derive(Debug)]
pub struct FluxStatistics {
    pub total_rows: usize,
    pub date_range: (chrono::NaiveDateTime, chrono::NaiveDateTime),
    pub stations: Vec<StationFluxStats>,
}

#[derive(Debug)]
pub struct StationFluxStats {
    pub station: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl StationFluxStats {
    pub fn coverage_percentage(&self, total_rows: usize) -> f64 {
        if total_rows == 0 {
            0.0
        } else {
            (self.count as f64 / total_rows as f64) * 100.0
        }
    }
}

pub struct FluxAnalyzer;

impl FluxAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// One-pass summary statistics, skipping missing and non-finite
    /// values (calm hours with infinite rt contribute flux 0, which is
    /// finite and counted).
    pub fn statistics(&self, table: &FluxTable) -> Result<FluxStatistics> {
        if table.is_empty() {
            return Err(ProcessingError::MissingData(
                "Flux table has no rows to analyze".to_string(),
            ));
        }

        let mut stations = Vec::with_capacity(table.stations.len());
        for (idx, station) in table.stations.iter().enumerate() {
            let mut count = 0usize;
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            let mut sum = 0.0f64;

            for row in &table.rows {
                if let Some(value) = row.values.get(idx).copied().flatten() {
                    if !value.is_finite() {
                        continue;
                    }
                    count += 1;
                    sum += value;
                    if value < min {
                        min = value;
                    }
                    if value > max {
                        max = value;
                    }
                }
            }

            let (min, max, mean) = if count > 0 {
                (min, max, sum / count as f64)
            } else {
                (f64::NAN, f64::NAN, f64::NAN)
            };

            stations.push(StationFluxStats {
                station: station.clone(),
                count,
                min,
                max,
                mean,
            });
        }

        Ok(FluxStatistics {
            total_rows: table.rows.len(),
            date_range: (
                table.rows.first().map(|r| r.timestamp).unwrap(),
                table.rows.last().map(|r| r.timestamp).unwrap(),
            ),
            stations,
        })
    }

    /// Seasonal cycle: mean flux per ISO-biweek group (weeks 1-2 form
    /// group 1, and so on; week 53 folds into group 27).
    pub fn seasonal_means(&self, table: &FluxTable) -> AggregateTable {
        self.grouped_means(table, vec!["biweek".to_string()], |ts| {
            let group = (ts.iso_week().week() + 1) / 2;
            vec![group.to_string()]
        })
    }

    /// Diurnal cycle: mean flux per hour of day, split by calendar month,
    /// for the two chosen months.
    pub fn diurnal_means(&self, table: &FluxTable, months: [u32; 2]) -> AggregateTable {
        self.grouped_means(
            table,
            vec!["month".to_string(), "hour".to_string()],
            move |ts| {
                let month = ts.month();
                if months.contains(&month) {
                    vec![month.to_string(), ts.hour().to_string()]
                } else {
                    Vec::new()
                }
            },
        )
    }

    /// Annual summary: mean flux per calendar year.
    pub fn annual_means(&self, table: &FluxTable) -> AggregateTable {
        self.grouped_means(table, vec!["year".to_string()], |ts| {
            vec![ts.year().to_string()]
        })
    }

    /// Group rows by a timestamp-derived key and average each station
    /// column within the group. An empty key vector excludes the row.
    fn grouped_means<F>(
        &self,
        table: &FluxTable,
        key_columns: Vec<String>,
        key_fn: F,
    ) -> AggregateTable
    where
        F: Fn(chrono::NaiveDateTime) -> Vec<String>,
    {
        // sortable key -> per-station (sum, count)
        let mut groups: BTreeMap<Vec<SortableKey>, Vec<(f64, usize)>> = BTreeMap::new();

        for row in &table.rows {
            let keys = key_fn(row.timestamp);
            if keys.is_empty() {
                continue;
            }
            let sortable: Vec<SortableKey> = keys.iter().map(|k| SortableKey::from(k)).collect();

            let accumulators = groups
                .entry(sortable)
                .or_insert_with(|| vec![(0.0, 0); table.stations.len()]);

            for (idx, value) in row.values.iter().enumerate() {
                if let Some(v) = value {
                    if v.is_finite() {
                        accumulators[idx].0 += v;
                        accumulators[idx].1 += 1;
                    }
                }
            }
        }

        let rows = groups
            .into_iter()
            .map(|(keys, accumulators)| AggregateRow {
                keys: keys.iter().map(|k| k.display()).collect(),
                values: accumulators
                    .iter()
                    .map(|(sum, count)| (*count > 0).then(|| *sum / *count as f64))
                    .collect(),
            })
            .collect();

        AggregateTable {
            key_columns,
            stations: table.stations.clone(),
            rows,
        }
    }
}

impl Default for FluxAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Group keys sort numerically when they parse as integers so that
/// biweek 10 follows biweek 9 rather than biweek 1.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortableKey {
    Number(i64),
    Text(String),
}

impl SortableKey {
    fn from(key: &str) -> Self {
        key.parse::<i64>()
            .map(SortableKey::Number)
            .unwrap_or_else(|_| SortableKey::Text(key.to_string()))
    }

    fn display(&self) -> String {
        match self {
            SortableKey::Number(n) => n.to_string(),
            SortableKey::Text(t) => t.clone(),
        }
    }
}

impl FluxStatistics {
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!(
                "Flux table: {} rows, {} to {}",
                self.total_rows, self.date_range.0, self.date_range.1
            ),
            format!("Stations: {}", self.stations.len()),
        ];

        for s in &self.stations {
            if s.count == 0 {
                lines.push(format!("  {}: no valid flux values", s.station));
            } else {
                lines.push(format!(
                    "  {}: {:.1}% coverage, mean {:.4e}, range {:.4e} to {:.4e} ug/m2/s",
                    s.station,
                    s.coverage_percentage(self.total_rows),
                    s.mean,
                    s.min,
                    s.max
                ));
            }
        }

        lines.join("\n")
    }
}
