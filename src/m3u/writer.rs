//! Output playlist writer

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only `.m3u8` playlist written next to the converted songs
pub struct OutputPlaylist {
    path: PathBuf,
    writer: BufWriter<File>,
    lines: usize,
}

impl OutputPlaylist {
    /// Path of the output playlist for a given source playlist:
    /// same base name, `.m3u8` extension, inside `output_dir`
    pub fn path_for(source_playlist: &Path, output_dir: &Path) -> PathBuf {
        let stem = source_playlist
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        output_dir.join(format!("{}.m3u8", stem))
    }

    /// Create (or truncate) the playlist file
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output playlist: {:?}", path))?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            lines: 0,
        })
    }

    /// Append one song path, newline terminated
    pub fn append(&mut self, song_path: &str) -> Result<()> {
        writeln!(self.writer, "{}", song_path)
            .with_context(|| format!("Failed to write to playlist: {:?}", self.path))?;
        self.lines += 1;
        Ok(())
    }

    /// Number of lines written so far
    pub fn len(&self) -> usize {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    /// Flush and close the playlist
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush playlist: {:?}", self.path))?;
        Ok(self.path)
    }
}
