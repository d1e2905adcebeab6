//! Transcoder trait and error type

use crate::model::Bitrate;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Audio transcoder - allows swapping the ffmpeg backend for a fake in tests
pub trait Transcoder {
    /// Decode `source` as `format` and encode it to an MP3 at `dest`
    fn transcode(
        &self,
        source: &Path,
        dest: &Path,
        format: &str,
        bitrate: &Bitrate,
    ) -> Result<(), TranscodeError>;
}

impl<T: Transcoder + ?Sized> Transcoder for &T {
    fn transcode(
        &self,
        source: &Path,
        dest: &Path,
        format: &str,
        bitrate: &Bitrate,
    ) -> Result<(), TranscodeError> {
        (**self).transcode(source, dest, format, bitrate)
    }
}

#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("cannot determine format of {0:?}")]
    UndeterminedFormat(PathBuf),

    #[error("{0} not found - make sure FFmpeg is installed and in your system's PATH")]
    FfmpegNotFound(String),

    #[error("transcoding as {format} failed: {message}")]
    Failed { format: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
