//! Source bitrate inspection for the copy-vs-transcode decision

use super::MediaError;
use crate::model::{Bitrate, SongDecision};
use lofty::file::AudioFile;
use lofty::probe::Probe;
use std::path::Path;

/// Read the encoded audio bitrate of a file in kbps
pub fn read_bitrate_kbps(path: &Path) -> Result<u32, MediaError> {
    let tagged_file = Probe::open(path)?.read()?;

    tagged_file
        .properties()
        .audio_bitrate()
        .filter(|&kbps| kbps > 0)
        .ok_or_else(|| MediaError::NoBitrate(path.to_path_buf()))
}

/// Decide whether a song needs transcoding.
///
/// Only MP3 sources are inspected. A source at or below the target bitrate is
/// copied as-is; an unreadable bitrate forces a transcode attempt.
pub fn decide(source: &Path, format: &str, target: &Bitrate) -> SongDecision {
    if format != "mp3" {
        return SongDecision::Transcode;
    }

    match read_bitrate_kbps(source) {
        Ok(kbps) if target.is_met_by(kbps) => SongDecision::Copy { source_kbps: kbps },
        Ok(kbps) => {
            log::debug!("Source bitrate {}kbps is above target {}", kbps, target);
            SongDecision::Transcode
        }
        Err(e) => {
            log::debug!("Could not read bitrate of {:?} ({}), transcoding", source, e);
            SongDecision::Transcode
        }
    }
}
