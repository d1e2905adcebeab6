//! Source playlist (.m3u / .m3u8) reader

use crate::model::PlaylistEntry;
use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Queue of song references read from a playlist file, in file order
#[derive(Debug, Default)]
pub struct PlaylistReader {
    entries: VecDeque<PlaylistEntry>,
}

impl PlaylistReader {
    /// Read a playlist file.
    ///
    /// A file that does not exist yields an empty reader rather than an error;
    /// the caller decides whether zero songs is a failure.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Playlist {:?} does not exist", path);
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read playlist: {:?}", path));
            }
        };

        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Parse playlist text: comments (`#` to end of line) and blank lines are dropped
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let entries = text
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                let song = line.split('#').next().unwrap_or_default().trim();
                (!song.is_empty()).then(|| PlaylistEntry::new(song))
            })
            .collect();

        Self { entries }
    }

    /// Take the next entry
    pub fn next_entry(&mut self) -> Option<PlaylistEntry> {
        self.entries.pop_front()
    }

    /// Number of entries not yet consumed
    pub fn remaining(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Iterator for PlaylistReader {
    type Item = PlaylistEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.entries.len(), Some(self.entries.len()))
    }
}
