//! Transcode orchestration: format resolution, the opus retry, and
//! best-effort metadata propagation after a successful encode

use super::traits::{TranscodeError, Transcoder};
use crate::media::{MediaError, MetadataPropagator};
use crate::model::Bitrate;
use std::path::Path;

/// Extra attempts allowed after the first failure
const MAX_RETRIES: usize = 1;

/// Format to retry with when decoding as `format` fails.
///
/// Some `.opus` files are only readable through the generic ogg demuxer.
fn fallback_format(format: &str) -> Option<&'static str> {
    match format {
        "opus" => Some("ogg"),
        _ => None,
    }
}

/// Work out the decoder format: the override if given, else the file extension
pub fn resolve_format(source: &Path, format_override: Option<&str>) -> Result<String, TranscodeError> {
    let format = match format_override.map(|f| f.trim().to_lowercase()) {
        Some(f) if !f.is_empty() => f,
        _ => source
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default(),
    };

    if format.is_empty() {
        return Err(TranscodeError::UndeterminedFormat(source.to_path_buf()));
    }
    Ok(format)
}

/// Drives a `Transcoder` and a `MetadataPropagator` for single songs
pub struct TranscodeOrchestrator<T: Transcoder, M: MetadataPropagator> {
    transcoder: T,
    propagator: M,
}

impl<T: Transcoder, M: MetadataPropagator> TranscodeOrchestrator<T, M> {
    pub fn new(transcoder: T, propagator: M) -> Self {
        Self {
            transcoder,
            propagator,
        }
    }

    /// Transcode `source` to an MP3 at `dest`.
    ///
    /// Returns the format that finally decoded the source. Tag and cover art
    /// failures are logged and never turn a successful encode into an error.
    pub fn transcode(
        &self,
        source: &Path,
        dest: &Path,
        bitrate: &Bitrate,
        format_override: Option<&str>,
    ) -> Result<String, TranscodeError> {
        let mut format = resolve_format(source, format_override)?;
        let mut retries = 0;

        loop {
            match self.transcoder.transcode(source, dest, &format, bitrate) {
                Ok(()) => break,
                Err(e) => match fallback_format(&format) {
                    Some(next) if retries < MAX_RETRIES => {
                        log::warn!(
                            "Transcoding {:?} as .{} failed ({}), retrying as .{}...",
                            source,
                            format,
                            e,
                            next
                        );
                        format = next.to_string();
                        retries += 1;
                    }
                    _ => return Err(e),
                },
            }
        }

        log::info!("Successfully transcoded {:?} to {:?}", source, dest);
        self.propagate_metadata(source, dest);
        Ok(format)
    }

    fn propagate_metadata(&self, source: &Path, dest: &Path) {
        match self.propagator.copy_tags(source, dest) {
            Ok(count) => log::info!("Copied {} metadata tag(s) to {:?}", count, dest),
            Err(e) => log::warn!("Could not copy metadata tags from {:?}: {}", source, e),
        }

        match self.propagator.copy_cover(source, dest) {
            Ok(()) => log::info!("Copied album cover art to {:?}", dest),
            Err(e @ (MediaError::NoCoverArt(_) | MediaError::UnsupportedFormat(_))) => {
                log::info!("{}", e)
            }
            Err(e) => log::warn!("Could not copy album cover art from {:?}: {}", source, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// Records every attempted format and fails for the listed ones
    struct ScriptedTranscoder {
        failing: Vec<&'static str>,
        attempts: RefCell<Vec<String>>,
    }

    impl ScriptedTranscoder {
        fn failing(formats: &[&'static str]) -> Self {
            Self {
                failing: formats.to_vec(),
                attempts: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transcoder for ScriptedTranscoder {
        fn transcode(
            &self,
            _source: &Path,
            _dest: &Path,
            format: &str,
            _bitrate: &Bitrate,
        ) -> Result<(), TranscodeError> {
            self.attempts.borrow_mut().push(format.to_string());
            if self.failing.contains(&format) {
                Err(TranscodeError::Failed {
                    format: format.to_string(),
                    message: "invalid data".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct CountingPropagator {
        calls: RefCell<usize>,
    }

    impl MetadataPropagator for CountingPropagator {
        fn copy_tags(&self, _source: &Path, _dest: &Path) -> Result<usize, MediaError> {
            *self.calls.borrow_mut() += 1;
            Err(MediaError::NoTags(PathBuf::from("x")))
        }

        fn copy_cover(&self, source: &Path, _dest: &Path) -> Result<(), MediaError> {
            *self.calls.borrow_mut() += 1;
            Err(MediaError::NoCoverArt(source.to_path_buf()))
        }
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(resolve_format(Path::new("a/B.FLAC"), None).unwrap(), "flac");
        assert_eq!(resolve_format(Path::new("a.opus"), Some(" OGG ")).unwrap(), "ogg");
        assert_eq!(resolve_format(Path::new("a.opus"), Some("")).unwrap(), "opus");
        assert!(matches!(
            resolve_format(Path::new("noext"), None),
            Err(TranscodeError::UndeterminedFormat(_))
        ));
    }

    #[test]
    fn test_undetermined_format_never_calls_transcoder() {
        let transcoder = ScriptedTranscoder::failing(&[]);
        let orchestrator = TranscodeOrchestrator::new(&transcoder, CountingPropagator::default());

        let result = orchestrator.transcode(Path::new("song"), Path::new("song.mp3"), &Bitrate::default(), None);

        assert!(result.is_err());
        assert!(transcoder.attempts.borrow().is_empty());
    }

    #[test]
    fn test_opus_retries_as_ogg() {
        let transcoder = ScriptedTranscoder::failing(&["opus"]);
        let propagator = CountingPropagator::default();
        let orchestrator = TranscodeOrchestrator::new(&transcoder, propagator);

        let format = orchestrator
            .transcode(Path::new("a.opus"), Path::new("a.mp3"), &Bitrate::default(), None)
            .unwrap();

        assert_eq!(format, "ogg");
        assert_eq!(*transcoder.attempts.borrow(), vec!["opus", "ogg"]);
        // metadata failures do not fail the song
        assert_eq!(*orchestrator.propagator.calls.borrow(), 2);
    }

    #[test]
    fn test_opus_second_failure_is_final() {
        let transcoder = ScriptedTranscoder::failing(&["opus", "ogg"]);
        let orchestrator = TranscodeOrchestrator::new(&transcoder, CountingPropagator::default());

        let result = orchestrator.transcode(Path::new("a.opus"), Path::new("a.mp3"), &Bitrate::default(), None);

        assert!(matches!(result, Err(TranscodeError::Failed { ref format, .. }) if format == "ogg"));
        assert_eq!(*transcoder.attempts.borrow(), vec!["opus", "ogg"]);
        assert_eq!(*orchestrator.propagator.calls.borrow(), 0);
    }

    #[test]
    fn test_other_formats_do_not_retry() {
        let transcoder = ScriptedTranscoder::failing(&["flac"]);
        let orchestrator = TranscodeOrchestrator::new(&transcoder, CountingPropagator::default());

        assert!(orchestrator
            .transcode(Path::new("a.flac"), Path::new("a.mp3"), &Bitrate::default(), None)
            .is_err());
        assert_eq!(*transcoder.attempts.borrow(), vec!["flac"]);
    }
}
