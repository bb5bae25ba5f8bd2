use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::deposition::canopy::canopy_resistance;
use crate::deposition::resistance::aerodynamic_resistance;
use crate::deposition::wet_canopy;
use crate::deposition::{ModelConfig, WetCanopyMode};
use crate::error::Result;
use crate::models::{
    FluxRow, FluxTable, MeteoSeries, ResistanceRecord, ResistanceSeries, StationSeries,
};
use crate::utils::progress::ProgressReporter;

/// Runs the full deposition computation: resistance series from the
/// meteorology, then per-station flux by outer join on timestamp.
///
/// The model is pure and elementwise; stations are processed in parallel
/// on a bounded rayon pool since they never interact.
pub struct DepositionProcessor {
    config: ModelConfig,
    max_workers: usize,
}

impl DepositionProcessor {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            max_workers: num_cpus::get(),
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Compute the resistance network over the meteorological series.
    ///
    /// The configuration must already have passed `validate_setup`; ra
    /// may still come out infinite at calm hours (u = 0), which is
    /// surfaced numerically rather than as an error.
    pub fn compute_resistance(&self, meteo: &MeteoSeries) -> Result<ResistanceSeries> {
        meteo.validate_ordering()?;

        let rc_dry: Vec<f64> = meteo
            .records
            .iter()
            .map(|r| canopy_resistance(r, &self.config))
            .collect();

        let precipitation: Vec<f64> = meteo.records.iter().map(|r| r.precipitation).collect();
        let timestamps: Vec<NaiveDateTime> = meteo.records.iter().map(|r| r.timestamp).collect();

        let rc_wet = match self.config.wet_canopy_mode {
            WetCanopyMode::Off => rc_dry.clone(),
            WetCanopyMode::RowWindow => wet_canopy::row_window(&rc_dry, &precipitation),
            WetCanopyMode::TimeWindow => {
                wet_canopy::time_window(&rc_dry, &precipitation, &timestamps)
            }
        };

        let records = meteo
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let ra = aerodynamic_resistance(r.wind_speed, &self.config);
                let rc_effective = if self.config.wet_canopy_mode.is_enabled() {
                    rc_wet[i]
                } else {
                    rc_dry[i]
                };

                ResistanceRecord {
                    timestamp: r.timestamp,
                    ra,
                    rb: self.config.rb,
                    rc: rc_dry[i],
                    rc_wet: rc_wet[i],
                    rt: ra + self.config.rb + rc_effective,
                }
            })
            .collect();

        Ok(ResistanceSeries { records })
    }

    /// Compute per-station flux over the union of all timestamps.
    ///
    /// Outer-join semantics: a concentration timestamp without a total
    /// resistance, or a meteorology timestamp without a concentration,
    /// yields a missing value, never an error.
    pub fn compute_flux(
        &self,
        resistance: &ResistanceSeries,
        stations: &[StationSeries],
        progress: Option<&ProgressReporter>,
    ) -> Result<FluxTable> {
        let rt_by_timestamp: HashMap<NaiveDateTime, f64> = resistance
            .records
            .iter()
            .map(|r| (r.timestamp, r.rt))
            .collect();

        // Union of all timestamps, sorted
        let mut all_timestamps: BTreeSet<NaiveDateTime> =
            rt_by_timestamp.keys().copied().collect();
        for series in stations {
            all_timestamps.extend(series.records.iter().map(|r| r.timestamp));
        }
        let all_timestamps: Vec<NaiveDateTime> = all_timestamps.into_iter().collect();

        debug!(
            timestamps = all_timestamps.len(),
            stations = stations.len(),
            "computing flux table"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| crate::error::ProcessingError::Config(e.to_string()))?;

        // One flux column per station; stations are independent
        let columns: Vec<Vec<Option<f64>>> = pool.install(|| {
            stations
                .par_iter()
                .map(|series| station_flux_column(series, &rt_by_timestamp, &all_timestamps))
                .collect()
        });

        if let Some(p) = progress {
            p.increment(stations.len() as u64);
        }

        let mut table = FluxTable::new(stations.iter().map(|s| s.station.clone()).collect());
        table.rows = all_timestamps
            .iter()
            .enumerate()
            .map(|(row_idx, timestamp)| FluxRow {
                timestamp: *timestamp,
                values: columns.iter().map(|col| col[row_idx]).collect(),
            })
            .collect();

        Ok(table)
    }

    /// Full pipeline: resistance then flux.
    pub fn process(
        &self,
        meteo: &MeteoSeries,
        stations: &[StationSeries],
        progress: Option<&ProgressReporter>,
    ) -> Result<(ResistanceSeries, FluxTable)> {
        if let Some(p) = progress {
            p.set_message("Computing resistance series...");
        }
        let resistance = self.compute_resistance(meteo)?;

        if let Some(p) = progress {
            p.set_message("Computing deposition flux...");
        }
        let flux = self.compute_flux(&resistance, stations, progress)?;

        Ok((resistance, flux))
    }
}

/// Flux for one station over the shared timestamp axis. Generic over the
/// series content; station identity is labeling only.
fn station_flux_column(
    series: &StationSeries,
    rt_by_timestamp: &HashMap<NaiveDateTime, f64>,
    all_timestamps: &[NaiveDateTime],
) -> Vec<Option<f64>> {
    let concentration: HashMap<NaiveDateTime, f64> = series
        .records
        .iter()
        .map(|r| (r.timestamp, r.nh3))
        .collect();

    all_timestamps
        .iter()
        .map(|ts| {
            match (concentration.get(ts), rt_by_timestamp.get(ts)) {
                // infinite rt (calm hour) divides to zero, a defined result
                (Some(nh3), Some(rt)) => Some(nh3 / rt),
                _ => None,
            }
        })
        .collect()
}
