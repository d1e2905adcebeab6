use std::fmt;

/// A single song reference from a source playlist, after comment and
/// whitespace stripping. Interpreted as a path relative to the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry(String);

impl PlaylistEntry {
    /// Create an entry from an already cleaned line
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Replace every occurrence of each invalid character with `replacement`.
    ///
    /// Returns the rewritten entry plus the characters that were actually found.
    pub fn replace_invalid(&self, invalid_chars: &[char], replacement: &str) -> (Self, Vec<char>) {
        let mut text = self.0.clone();
        let mut replaced = Vec::new();

        for &c in invalid_chars {
            if text.contains(c) {
                replaced.push(c);
                text = text.replace(c, replacement);
            }
        }

        (Self(text), replaced)
    }
}

impl fmt::Display for PlaylistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_invalid_whole_entry() {
        let entry = PlaylistEntry::new("AC:DC/Back in Black?.flac");
        let (cleaned, replaced) = entry.replace_invalid(&['<', ':', '?', '*'], "_");

        assert_eq!(cleaned.as_str(), "AC_DC/Back in Black_.flac");
        assert_eq!(replaced, vec![':', '?']);
    }

    #[test]
    fn test_replace_invalid_nothing_to_do() {
        let entry = PlaylistEntry::new("Artist/Song.mp3");
        let (cleaned, replaced) = entry.replace_invalid(&['<', '>'], "_");

        assert_eq!(cleaned, entry);
        assert!(replaced.is_empty());
    }
}
