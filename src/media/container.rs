//! Supported container formats and what each one can do with tags and pictures

use super::MediaError;
use lofty::file::FileType;
use lofty::probe::Probe;
use lofty::tag::TagType;
use std::path::Path;

/// Containers whose tags and embedded front cover we know how to move around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// MP3 with ID3v2 tags and APIC frames
    Mpeg,
    /// FLAC with Vorbis comments and picture blocks
    Flac,
    /// Ogg Vorbis
    Vorbis,
    /// Ogg Opus
    Opus,
    /// MP4/M4A with ilst atoms
    Mp4,
}

impl Container {
    pub fn from_file_type(file_type: FileType) -> Option<Self> {
        match file_type {
            FileType::Mpeg => Some(Container::Mpeg),
            FileType::Flac => Some(Container::Flac),
            FileType::Vorbis => Some(Container::Vorbis),
            FileType::Opus => Some(Container::Opus),
            FileType::Mp4 => Some(Container::Mp4),
            _ => None,
        }
    }

    /// Detect the container from the file contents (falling back to the extension)
    pub fn detect(path: &Path) -> Result<Self, MediaError> {
        let probe = Probe::open(path)?.guess_file_type()?;

        probe
            .file_type()
            .and_then(Self::from_file_type)
            .ok_or_else(|| MediaError::UnsupportedFormat(path.to_path_buf()))
    }

    /// Tag format written to this container
    pub fn primary_tag_type(self) -> TagType {
        match self {
            Container::Mpeg => TagType::Id3v2,
            Container::Flac | Container::Vorbis | Container::Opus => TagType::VorbisComments,
            Container::Mp4 => TagType::Mp4Ilst,
        }
    }

    /// Whether cover art is written as an ID3 APIC frame
    pub fn uses_apic(self) -> bool {
        matches!(self, Container::Mpeg)
    }
}
