use std::path::Path;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::analyzers::FluxAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::deposition::{LandUse, ModelConfig, WetCanopyMode};
use crate::error::{ProcessingError, Result};
use crate::processors::DepositionProcessor;
use crate::readers::ConcurrentReader;
use crate::utils::constants::{
    FLUX_ANNUAL_FILE, FLUX_DIURNAL_FILE, FLUX_HOURLY_FILE, FLUX_SEASONAL_FILE,
};
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvWriter;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Process {
            meteo_file,
            concentration_files,
            stations,
            output_dir,
            params,
            variable_lai,
            enable_f2,
            enable_f3,
            enable_f4,
            wet_canopy,
            land_use,
            diurnal_months,
            max_workers,
            use_mmap,
        } => {
            let config = build_config(
                params.as_deref(),
                variable_lai,
                enable_f2,
                enable_f3,
                enable_f4,
                wet_canopy,
                land_use,
            )?;
            config.validate_setup()?;

            let months = parse_diurnal_months(&diurnal_months)?;

            println!("Processing NH3 deposition flux...");
            println!("Meteorology: {}", meteo_file.display());
            println!("Stations: {} concentration files", concentration_files.len());
            println!("Output directory: {}", output_dir.display());

            let progress = ProgressReporter::new_spinner("Reading input data...", false);

            let data = ConcurrentReader::with_mmap(use_mmap)
                .read_all(meteo_file, concentration_files, stations)
                .await?;

            let processor = DepositionProcessor::new(config).with_max_workers(max_workers);
            let (_resistance, flux) = processor.process(&data.meteo, &data.stations, Some(&progress))?;

            progress.set_message("Writing output tables...");

            std::fs::create_dir_all(&output_dir)?;
            let analyzer = FluxAnalyzer::new();
            let writer = CsvWriter::new();

            writer.write_flux_table(&flux, &output_dir.join(FLUX_HOURLY_FILE))?;
            writer.write_aggregate(&analyzer.seasonal_means(&flux), &output_dir.join(FLUX_SEASONAL_FILE))?;
            writer.write_aggregate(
                &analyzer.diurnal_means(&flux, months),
                &output_dir.join(FLUX_DIURNAL_FILE),
            )?;
            writer.write_aggregate(&analyzer.annual_means(&flux), &output_dir.join(FLUX_ANNUAL_FILE))?;

            progress.finish_with_message(&format!("Wrote {} flux rows", flux.len()));

            let stats = analyzer.statistics(&flux)?;
            println!("\n{}", stats.summary());
            println!("Processing complete!");
        }

        Commands::Validate {
            meteo_file,
            concentration_files,
            stations,
            params,
        } => {
            let config = build_config(
                params.as_deref(),
                false,
                false,
                false,
                false,
                WetCanopyMode::Off,
                LandUse::Vegetated,
            )?;
            config.validate_setup()?;

            println!("Validating input data...");

            let data = ConcurrentReader::new()
                .read_all(meteo_file, concentration_files, stations)
                .await?;

            data.meteo.validate_ordering()?;
            let mut issues = 0usize;
            for record in &data.meteo.records {
                if record.validate_soil_moisture().is_err() {
                    issues += 1;
                }
            }
            for series in &data.stations {
                series.validate()?;
            }

            println!(
                "Meteorology: {} records, stations: {}",
                data.meteo.len(),
                data.stations.len()
            );
            if issues == 0 {
                println!("All data passed validation checks");
            } else {
                println!("Found {} soil-moisture records outside [0, 1]", issues);
            }
        }

        Commands::Info { file, sample } => {
            println!("Analyzing flux table: {}", file.display());

            let writer = CsvWriter::new();
            let table = writer.read_flux_table(&file)?;

            let analyzer = FluxAnalyzer::new();
            let stats = analyzer.statistics(&table)?;
            println!("\n{}", stats.summary());

            if sample > 0 {
                println!("\nSample rows (showing up to {}):", sample);
                for row in table.rows.iter().take(sample) {
                    let values: Vec<String> = row
                        .values
                        .iter()
                        .map(|v| match v {
                            Some(v) => format!("{:.4e}", v),
                            None => "-".to_string(),
                        })
                        .collect();
                    println!("{}: {}", row.timestamp, values.join("  "));
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // ignore a second init from tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Assemble the model configuration: JSON parameter file (or defaults),
/// then the explicit CLI toggles on top.
fn build_config(
    params: Option<&Path>,
    variable_lai: bool,
    enable_f2: bool,
    enable_f3: bool,
    enable_f4: bool,
    wet_canopy: WetCanopyMode,
    land_use: LandUse,
) -> Result<ModelConfig> {
    let mut config = match params {
        Some(path) => ModelConfig::from_json_file(path)?,
        None => ModelConfig::default(),
    };

    if variable_lai {
        config.enable_variable_lai = true;
    }
    if enable_f2 {
        config.enable_f2 = true;
    }
    if enable_f3 {
        config.enable_f3 = true;
    }
    if enable_f4 {
        config.enable_f4 = true;
    }
    if wet_canopy.is_enabled() {
        config.wet_canopy_mode = wet_canopy;
    }
    if land_use == LandUse::WaterSurface {
        config.land_use = land_use;
    }

    debug!(?config, "model configuration assembled");
    Ok(config)
}

fn parse_diurnal_months(months: &[u32]) -> Result<[u32; 2]> {
    if months.len() != 2 || months.iter().any(|m| !(1..=12).contains(m)) {
        return Err(ProcessingError::Config(format!(
            "Expected two calendar months in 1..=12, got {:?}",
            months
        )));
    }
    Ok([months[0], months[1]])
}
