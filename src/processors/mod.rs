pub mod pipeline;

pub use pipeline::DepositionProcessor;
