//! ffmpeg-backed transcoder

use super::traits::{TranscodeError, Transcoder};
use crate::model::Bitrate;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Number of stderr lines kept in error messages
const STDERR_TAIL_LINES: usize = 5;

/// Runs the `ffmpeg` binary to produce MP3 output
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("ffmpeg"),
        }
    }

    /// Use a specific ffmpeg executable
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Command line arguments for one conversion
    pub fn arguments(source: &Path, dest: &Path, format: &str, bitrate: &Bitrate) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-y", "-f"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(demuxer_name(format).into());
        args.push("-i".into());
        args.push(source.as_os_str().to_owned());
        for arg in ["-vn", "-map_metadata", "-1", "-codec:a", "libmp3lame", "-b:a"] {
            args.push(arg.into());
        }
        args.push(bitrate.to_string().into());
        args.push("-f".into());
        args.push("mp3".into());
        args.push(dest.as_os_str().to_owned());
        args
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Map file-extension style format names to ffmpeg demuxer names
fn demuxer_name(format: &str) -> &str {
    match format {
        "m4a" => "mp4",
        "wave" => "wav",
        other => other,
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(
        &self,
        source: &Path,
        dest: &Path,
        format: &str,
        bitrate: &Bitrate,
    ) -> Result<(), TranscodeError> {
        log::debug!(
            "Running {:?} on {:?} as {} at {}",
            self.binary,
            source,
            format,
            bitrate
        );

        let output = match Command::new(&self.binary)
            .args(Self::arguments(source, dest, format, bitrate))
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TranscodeError::FfmpegNotFound(
                    self.binary.display().to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
            let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("; ");
            let message = if tail.is_empty() {
                format!("ffmpeg exited with {}", output.status)
            } else {
                tail
            };

            return Err(TranscodeError::Failed {
                format: format.to_string(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_as_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_arguments() {
        let bitrate: Bitrate = "256".parse().unwrap();
        let args = args_as_strings(FfmpegTranscoder::arguments(
            Path::new("in/a.flac"),
            Path::new("out/a.mp3"),
            "flac",
            &bitrate,
        ));

        assert_eq!(
            args,
            vec![
                "-hide_banner", "-loglevel", "error", "-y", "-f", "flac", "-i", "in/a.flac", "-vn",
                "-map_metadata", "-1", "-codec:a", "libmp3lame", "-b:a", "256k", "-f", "mp3",
                "out/a.mp3",
            ]
        );
    }

    #[test]
    fn test_format_aliases() {
        assert_eq!(demuxer_name("m4a"), "mp4");
        assert_eq!(demuxer_name("wave"), "wav");
        assert_eq!(demuxer_name("ogg"), "ogg");
    }

    #[test]
    fn test_missing_binary() {
        let transcoder = FfmpegTranscoder::new().with_binary("/nonexistent/ffmpeg-binary");
        let result = transcoder.transcode(
            Path::new("a.flac"),
            Path::new("a.mp3"),
            "flac",
            &Bitrate::default(),
        );

        assert!(matches!(result, Err(TranscodeError::FfmpegNotFound(_))));
    }
}
