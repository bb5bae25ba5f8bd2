pub mod concentration;
pub mod flux;
pub mod meteo;
pub mod resistance;

pub use concentration::{ConcentrationRecord, StationSeries};
pub use flux::{FluxRow, FluxTable};
pub use meteo::{MeteoRecord, MeteoSeries};
pub use resistance::{ResistanceRecord, ResistanceSeries};
