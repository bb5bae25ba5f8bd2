use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::deposition::{LandUse, WetCanopyMode};

#[derive(Parser)]
#[command(name = "nh3-drydep")]
#[command(about = "Hourly NH3 dry-deposition flux processor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute deposition flux and aggregate tables from input CSVs
    Process {
        #[arg(short, long, help = "Meteorology CSV file")]
        meteo_file: PathBuf,

        #[arg(
            short,
            long,
            num_args = 1..,
            help = "Per-station NH3 concentration CSV files"
        )]
        concentration_files: Vec<PathBuf>,

        #[arg(
            long,
            num_args = 1..,
            help = "Station labels, one per concentration file [default: file stems]"
        )]
        stations: Option<Vec<String>>,

        #[arg(short, long, default_value = ".", help = "Output directory")]
        output_dir: PathBuf,

        #[arg(long, help = "Model configuration JSON file [default: built-in defaults]")]
        params: Option<PathBuf>,

        #[arg(long, default_value = "false", help = "Seasonal cosine LAI instead of a constant")]
        variable_lai: bool,

        #[arg(long, default_value = "false", help = "Enable the vapor-deficit stress term F2")]
        enable_f2: bool,

        #[arg(long, default_value = "false", help = "Enable the temperature stress term F3")]
        enable_f3: bool,

        #[arg(long, default_value = "false", help = "Enable the soil-moisture stress term F4")]
        enable_f4: bool,

        #[arg(long, value_enum, default_value = "off")]
        wet_canopy: WetCanopyMode,

        #[arg(long, value_enum, default_value = "vegetated")]
        land_use: LandUse,

        #[arg(
            long,
            num_args = 2,
            default_values_t = [1u32, 7u32],
            help = "Two calendar months for the diurnal-cycle table"
        )]
        diurnal_months: Vec<u32>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, default_value = "false", help = "Memory-map the meteorology file")]
        use_mmap: bool,
    },

    /// Validate configuration and input data without writing outputs
    Validate {
        #[arg(short, long, help = "Meteorology CSV file")]
        meteo_file: PathBuf,

        #[arg(short, long, num_args = 1.., help = "Per-station NH3 concentration CSV files")]
        concentration_files: Vec<PathBuf>,

        #[arg(long, num_args = 1..)]
        stations: Option<Vec<String>>,

        #[arg(long, help = "Model configuration JSON file")]
        params: Option<PathBuf>,
    },

    /// Summarize a previously written hourly flux table
    Info {
        #[arg(short, long, help = "flux_hourly.csv file to analyze")]
        file: PathBuf,

        #[arg(short, long, default_value = "10", help = "Sample rows to print")]
        sample: usize,
    },
}
