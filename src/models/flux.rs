use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One output row: per-station deposition flux [ug/m2/s] at a timestamp.
///
/// Values are positionally aligned with `FluxTable::stations`; `None`
/// marks a timestamp not covered by that station or by the meteorology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FluxRow {
    pub timestamp: NaiveDateTime,
    pub values: Vec<Option<f64>>,
}

/// Deposition flux keyed by timestamp with one column per station.
#[derive(Debug, Clone, Default)]
pub struct FluxTable {
    pub stations: Vec<String>,
    pub rows: Vec<FluxRow>,
}

impl FluxTable {
    pub fn new(stations: Vec<String>) -> Self {
        Self {
            stations,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn station_index(&self, station: &str) -> Option<usize> {
        self.stations.iter().position(|s| s == station)
    }

    /// Count of present (non-missing) values for one station column.
    pub fn coverage(&self, station_idx: usize) -> usize {
        self.rows
            .iter()
            .filter(|row| row.values.get(station_idx).copied().flatten().is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_station_lookup_and_coverage() {
        let mut table = FluxTable::new(vec!["a".to_string(), "b".to_string()]);
        let ts = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        table.rows.push(FluxRow {
            timestamp: ts,
            values: vec![Some(0.01), None],
        });

        assert_eq!(table.station_index("b"), Some(1));
        assert_eq!(table.station_index("c"), None);
        assert_eq!(table.coverage(0), 1);
        assert_eq!(table.coverage(1), 0);
    }
}
