pub mod concentration_reader;
pub mod concurrent_reader;
pub mod meteo_reader;

pub use concentration_reader::ConcentrationReader;
pub use concurrent_reader::{ConcurrentReader, InputData};
pub use meteo_reader::MeteoReader;
