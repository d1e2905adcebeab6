//! Transcoding layer
//!
//! The transcoder itself sits behind the `Transcoder` trait; the production
//! backend shells out to ffmpeg. The orchestrator adds format resolution,
//! the opus-as-ogg retry and metadata propagation on top.

mod ffmpeg;
mod orchestrator;
mod traits;

pub use ffmpeg::FfmpegTranscoder;
pub use orchestrator::{resolve_format, TranscodeOrchestrator};
pub use traits::{TranscodeError, Transcoder};
