//! Audio file metadata layer
//!
//! Bitrate inspection, tag propagation and front-cover propagation between
//! a source file and its converted copy. Everything here is best-effort from
//! the pipeline's point of view: failures are reported, never fatal.

mod artwork;
mod bitrate;
mod container;
mod tags;

pub use artwork::{copy_front_cover, CoverArt};
pub use bitrate::{decide, read_bitrate_kbps};
pub use container::Container;
pub use tags::copy_tags;

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("unsupported audio file type: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("no album cover art found in {0:?}")]
    NoCoverArt(PathBuf),

    #[error("no metadata tags found in {0:?}")]
    NoTags(PathBuf),

    #[error("bitrate unavailable for {0:?}")]
    NoBitrate(PathBuf),

    #[error("tag error: {0}")]
    Lofty(#[from] lofty::error::LoftyError),

    #[error("ID3 error: {0}")]
    Id3(#[from] id3::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Copies tags and cover art from a source file onto its converted output
pub trait MetadataPropagator {
    /// Copy textual tags; returns how many items were written
    fn copy_tags(&self, source: &Path, dest: &Path) -> Result<usize, MediaError>;

    /// Copy the front cover image
    fn copy_cover(&self, source: &Path, dest: &Path) -> Result<(), MediaError>;
}

/// Propagator backed by lofty (and id3 for MP3 cover frames)
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyPropagator;

impl LoftyPropagator {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataPropagator for LoftyPropagator {
    fn copy_tags(&self, source: &Path, dest: &Path) -> Result<usize, MediaError> {
        copy_tags(source, dest)
    }

    fn copy_cover(&self, source: &Path, dest: &Path) -> Result<(), MediaError> {
        copy_front_cover(source, dest)
    }
}
