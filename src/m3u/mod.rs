//! M3U playlist handling
//!
//! Discovers playlist files in the input directory, reads their song
//! references and writes the rewritten device playlists.

mod reader;
mod writer;

pub use reader::PlaylistReader;
pub use writer::OutputPlaylist;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Playlist extensions picked up from the input directory (case-insensitive)
pub const PLAYLIST_EXTENSIONS: &[&str] = &["m3u", "m3u8"];

/// Whether a path looks like a playlist file
pub fn is_playlist(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| PLAYLIST_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// List playlist files directly inside `input_dir` (non-recursive), sorted by name
pub fn discover_playlists(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut playlists = Vec::new();

    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to list {:?}", input_dir))?;
        let path = entry.path();

        // follow symlinks to files, like a plain is-file check would
        if path.is_file() && is_playlist(path) {
            playlists.push(path.to_path_buf());
        }
    }

    Ok(playlists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_playlist() {
        assert!(is_playlist(Path::new("a.m3u")));
        assert!(is_playlist(Path::new("a.M3U8")));
        assert!(!is_playlist(Path::new("a.pls")));
        assert!(!is_playlist(Path::new("m3u")));
    }

    #[test]
    fn test_discover_is_flat_and_sorted() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("b.m3u8"), "").unwrap();
        fs::write(dir.path().join("a.M3U"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.m3u")).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.m3u"), "").unwrap();

        let found = discover_playlists(dir.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.M3U", "b.m3u8"]);
    }
}
