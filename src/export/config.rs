//! Conversion configuration

use crate::model::Bitrate;
use std::path::PathBuf;

/// Characters replaced in playlist entries unless configured otherwise
pub const DEFAULT_INVALID_CHARS: &str = "<>\":|?*";

/// Replacement for invalid characters unless configured otherwise
pub const DEFAULT_REPLACEMENT: &str = "_";

/// Where Garmin devices look for music unless configured otherwise
pub const DEFAULT_MUSIC_ROOT: &str = "Music/";

/// Options resolved once per run and shared read-only by every playlist and song
#[derive(Debug, Clone)]
pub struct ProcessingOptions {
    /// Directory scanned for playlists; entries are resolved against it
    pub input_dir: PathBuf,

    /// Destination root for converted songs and playlists
    pub output_dir: PathBuf,

    /// Target MP3 bitrate
    pub bitrate: Bitrate,

    /// Characters replaced anywhere in a playlist entry (a set, order kept for logging)
    pub invalid_chars: Vec<char>,

    /// Replacement for invalid and disallowed characters
    pub replacement: String,

    /// Prefix prepended verbatim to every output playlist line
    pub music_root: String,

    /// Whether to drop `"NN - "` prefixes from output file names
    pub strip_track_numbers: bool,
}

impl ProcessingOptions {
    /// Create options with the default bitrate, character set and music root
    pub fn new(input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            bitrate: Bitrate::default(),
            invalid_chars: DEFAULT_INVALID_CHARS.chars().collect(),
            replacement: DEFAULT_REPLACEMENT.to_string(),
            music_root: DEFAULT_MUSIC_ROOT.to_string(),
            strip_track_numbers: false,
        }
    }

    pub fn with_bitrate(mut self, bitrate: Bitrate) -> Self {
        self.bitrate = bitrate;
        self
    }

    /// Each character of `chars` is treated individually; duplicates are ignored
    pub fn with_invalid_chars(mut self, chars: &str) -> Self {
        let mut set = Vec::new();
        for c in chars.chars() {
            if !set.contains(&c) {
                set.push(c);
            }
        }
        self.invalid_chars = set;
        self
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = replacement.into();
        self
    }

    pub fn with_music_root(mut self, music_root: impl Into<String>) -> Self {
        self.music_root = music_root.into();
        self
    }

    pub fn with_track_number_stripping(mut self, enable: bool) -> Self {
        self.strip_track_numbers = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ProcessingOptions::new(PathBuf::from("in"), PathBuf::from("output"));
        assert_eq!(options.bitrate.to_string(), "320k");
        assert_eq!(options.invalid_chars, vec!['<', '>', '"', ':', '|', '?', '*']);
        assert_eq!(options.replacement, "_");
        assert_eq!(options.music_root, "Music/");
        assert!(!options.strip_track_numbers);
    }

    #[test]
    fn test_invalid_chars_are_a_set() {
        let options = ProcessingOptions::new(PathBuf::from("in"), PathBuf::from("out"))
            .with_invalid_chars("??**&");
        assert_eq!(options.invalid_chars, vec!['?', '*', '&']);

        let none = ProcessingOptions::new(PathBuf::from("in"), PathBuf::from("out"))
            .with_invalid_chars("");
        assert!(none.invalid_chars.is_empty());
    }
}
