use std::path::PathBuf;

use tokio::task::JoinHandle;
use tracing::info;

use crate::error::{ProcessingError, Result};
use crate::models::{MeteoSeries, StationSeries};
use crate::readers::{ConcentrationReader, MeteoReader};

/// All loaded input series.
#[derive(Debug, Clone)]
pub struct InputData {
    pub meteo: MeteoSeries,
    pub stations: Vec<StationSeries>,
}

/// Reads the meteorology and all station files concurrently, one blocking
/// task per file.
pub struct ConcurrentReader {
    use_mmap: bool,
}

impl ConcurrentReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Load everything. `station_labels`, when given, must match the
    /// concentration file list in length and order; otherwise labels are
    /// derived from file stems.
    pub async fn read_all(
        &self,
        meteo_path: PathBuf,
        concentration_paths: Vec<PathBuf>,
        station_labels: Option<Vec<String>>,
    ) -> Result<InputData> {
        if let Some(labels) = &station_labels {
            if labels.len() != concentration_paths.len() {
                return Err(ProcessingError::Config(format!(
                    "{} station labels given for {} concentration files",
                    labels.len(),
                    concentration_paths.len()
                )));
            }
        }

        let use_mmap = self.use_mmap;
        let meteo_handle: JoinHandle<Result<MeteoSeries>> =
            tokio::task::spawn_blocking(move || {
                MeteoReader::with_mmap(use_mmap).read_meteo(&meteo_path)
            });

        let station_handles: Vec<JoinHandle<Result<StationSeries>>> = concentration_paths
            .into_iter()
            .enumerate()
            .map(|(i, path)| {
                let label = station_labels.as_ref().map(|labels| labels[i].clone());
                tokio::task::spawn_blocking(move || {
                    let reader = ConcentrationReader::new();
                    match label {
                        Some(label) => reader.read_station_with_label(&path, &label),
                        None => reader.read_station(&path),
                    }
                })
            })
            .collect();

        let meteo = meteo_handle.await??;

        let mut stations = Vec::with_capacity(station_handles.len());
        for handle in station_handles {
            stations.push(handle.await??);
        }

        info!(
            meteo_records = meteo.len(),
            stations = stations.len(),
            "input data loaded"
        );

        Ok(InputData { meteo, stations })
    }
}

impl Default for ConcurrentReader {
    fn default() -> Self {
        Self::new()
    }
}
