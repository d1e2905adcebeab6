use crate::transcode::TranscodeError;
use std::path::PathBuf;
use thiserror::Error;

/// What the pipeline decided to do with a song
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongDecision {
    /// Re-encode to the target bitrate
    Transcode,

    /// Source already meets the target; copy it verbatim
    Copy { source_kbps: u32 },
}

/// Per-entry state threaded through the pipeline.
///
/// Created fresh for every playlist entry and dropped once the entry is done.
#[derive(Debug, Clone)]
pub struct SongTask {
    /// Entry text after invalid-character replacement
    pub entry: String,

    /// Absolute (or input-root joined) source path
    pub source_path: PathBuf,

    /// Sanitized output file name, always ending in `.mp3`
    pub output_name: String,

    /// Where the output file is written
    pub output_path: PathBuf,

    /// Device-relative path with forward slashes, without the music root prefix
    pub relative_path: String,

    /// Lowercased source extension, empty when the source has none
    pub format: String,
}

/// Final result for one playlist entry
#[derive(Debug)]
pub enum SongOutcome {
    Transcoded { playlist_path: String },
    Copied { playlist_path: String },
    Skipped(SkipReason),
    Failed(SongError),
}

impl SongOutcome {
    /// Line to record in the output playlist, if the song produced a file
    pub fn playlist_path(&self) -> Option<&str> {
        match self {
            SongOutcome::Transcoded { playlist_path } | SongOutcome::Copied { playlist_path } => {
                Some(playlist_path)
            }
            SongOutcome::Skipped(_) | SongOutcome::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The referenced source file does not exist
    MissingSource(PathBuf),
}

#[derive(Debug, Error)]
pub enum SongError {
    #[error("failed to transcode {path:?}: {source}")]
    Transcode {
        path: PathBuf,
        #[source]
        source: TranscodeError,
    },

    #[error("failed to copy {from:?} to {to:?}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output directory {path:?}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_produced_files_have_playlist_paths() {
        let transcoded = SongOutcome::Transcoded {
            playlist_path: "Music/a.mp3".to_string(),
        };
        let copied = SongOutcome::Copied {
            playlist_path: "Music/b.mp3".to_string(),
        };
        let skipped = SongOutcome::Skipped(SkipReason::MissingSource(PathBuf::from("c.flac")));
        let failed = SongOutcome::Failed(SongError::Transcode {
            path: PathBuf::from("d"),
            source: TranscodeError::UndeterminedFormat(PathBuf::from("d")),
        });

        assert_eq!(transcoded.playlist_path(), Some("Music/a.mp3"));
        assert_eq!(copied.playlist_path(), Some("Music/b.mp3"));
        assert!(skipped.playlist_path().is_none());
        assert!(failed.playlist_path().is_none());
    }
}
