//! Output path computation
//!
//! Every converted song gets one relative path, derived from its source path
//! and sanitized name. The same relative path decides where the file lands
//! under the output directory and what the device playlist line says, so the
//! two never disagree.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Maps source songs to output locations and device playlist lines
#[derive(Debug, Clone)]
pub struct OutputOrganizer {
    /// Input root as text, stripped from source paths
    input_root: String,

    /// Output directory on the host
    output_dir: PathBuf,

    /// Device music root, prepended verbatim
    music_root: String,
}

impl OutputOrganizer {
    pub fn new(input_dir: &Path, output_dir: &Path, music_root: &str) -> Self {
        Self {
            input_root: input_dir.to_string_lossy().into_owned(),
            output_dir: output_dir.to_path_buf(),
            music_root: music_root.to_string(),
        }
    }

    /// Source path relative to the input root.
    ///
    /// The input root text is removed once; a leading separator left behind is
    /// dropped only when the input root itself is not rooted at a separator.
    pub fn relative_source_path(&self, source: &Path) -> String {
        let full = source.to_string_lossy();
        if self.input_root.is_empty() {
            return full.into_owned();
        }

        let relative = full.replacen(&self.input_root, "", 1);
        if !self.input_root.starts_with(MAIN_SEPARATOR) && relative.starts_with(MAIN_SEPARATOR) {
            relative[MAIN_SEPARATOR.len_utf8()..].to_string()
        } else {
            relative
        }
    }

    /// Relative path of the converted song, using `/` separators.
    ///
    /// The directory part is normalised: `..` consumes the component before
    /// it, while root, prefix and `.` components are dropped. The result never
    /// points above the output directory.
    pub fn relative_output_path(&self, source: &Path, output_name: &str) -> String {
        let relative = self.relative_source_path(source);
        let mut parts = normalized_parts(Path::new(&relative).parent());
        parts.push(output_name.to_string());
        parts.join("/")
    }

    /// Line recorded in the device playlist
    pub fn device_path(&self, relative_output: &str) -> String {
        format!("{}{}", self.music_root, relative_output)
    }

    /// Host location of the converted song
    pub fn output_file_path(&self, relative_output: &str) -> PathBuf {
        let mut path = self.output_dir.clone();
        for part in normalized_parts(Some(Path::new(relative_output))) {
            path.push(part);
        }
        path
    }
}

fn normalized_parts(dir: Option<&Path>) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in dir.into_iter().flat_map(|d| d.components()) {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
        }
    }
    parts
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn organizer(input: &str) -> OutputOrganizer {
        OutputOrganizer::new(Path::new(input), Path::new("/out"), "Music/")
    }

    #[test]
    fn test_relative_input_root_drops_leading_separator() {
        let org = organizer("library");
        let source = Path::new("library").join("Artist/Album/01 - Song.flac");

        assert_eq!(org.relative_source_path(&source), "Artist/Album/01 - Song.flac");
        assert_eq!(
            org.relative_output_path(&source, "Song.mp3"),
            "Artist/Album/Song.mp3"
        );
    }

    #[test]
    fn test_rooted_input_root_drops_leading_separator() {
        let org = organizer("/data/music");
        let source = Path::new("/data/music").join("Artist/Song.flac");

        assert_eq!(org.relative_source_path(&source), "/Artist/Song.flac");
        assert_eq!(org.relative_output_path(&source, "Song.mp3"), "Artist/Song.mp3");
        assert_eq!(org.device_path("Artist/Song.mp3"), "Music/Artist/Song.mp3");
    }

    #[test]
    fn test_parent_components_are_resolved() {
        let org = organizer("lib/Playlists/");
        let source = Path::new("lib/Playlists/").join("../Artist/./Album/../Song.flac");

        let relative = org.relative_output_path(&source, "Song.mp3");
        assert_eq!(relative, "Artist/Song.mp3");
        assert_eq!(org.device_path(&relative), "Music/Artist/Song.mp3");
        assert_eq!(org.output_file_path(&relative), PathBuf::from("/out/Artist/Song.mp3"));
    }

    #[test]
    fn test_parent_components_never_climb_above_root() {
        let org = organizer("in");
        let source = Path::new("in").join("../../../x/Song.flac");

        assert_eq!(org.relative_output_path(&source, "Song.mp3"), "x/Song.mp3");
    }

    #[test]
    fn test_trailing_separator_on_root() {
        let org = organizer("/data/music/");
        let source = Path::new("/data/music/").join("Song.flac");

        assert_eq!(org.relative_output_path(&source, "Song.mp3"), "Song.mp3");
        assert_eq!(org.device_path("Song.mp3"), "Music/Song.mp3");
    }

    #[test]
    fn test_only_first_occurrence_is_removed() {
        let org = organizer("music");
        let source = Path::new("music").join("music/Song.flac");

        assert_eq!(org.relative_output_path(&source, "Song.mp3"), "music/Song.mp3");
    }

    #[test]
    fn test_music_root_used_verbatim() {
        let org = OutputOrganizer::new(Path::new("in"), Path::new("/out"), "Music");
        assert_eq!(org.device_path("a/b.mp3"), "Musica/b.mp3");
    }

    #[test]
    fn test_output_file_path_stays_inside_output_dir() {
        let org = organizer("/data/music");
        assert_eq!(
            org.output_file_path("/Artist/Song.mp3"),
            PathBuf::from("/out/Artist/Song.mp3")
        );
        assert_eq!(
            org.output_file_path("../elsewhere/Song.mp3"),
            PathBuf::from("/out/elsewhere/Song.mp3")
        );
    }
}
