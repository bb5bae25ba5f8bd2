pub mod canopy;
pub mod config;
pub mod humidity;
pub mod resistance;
pub mod wet_canopy;

pub use config::{LandUse, ModelConfig, WetCanopyMode};
