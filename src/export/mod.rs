//! Conversion orchestration and output layout

pub mod config;
pub mod organizer;
pub mod pipeline;

pub use config::ProcessingOptions;
pub use organizer::OutputOrganizer;
pub use pipeline::{PlaylistConverter, PlaylistReport};
