//! File name sanitization for the device filesystem
//!
//! Output names keep only ASCII letters, digits, `_`, space and `-`,
//! always carry an `.mp3` extension, and can optionally lose a leading
//! track number (`"01 - Title"` becomes `"Title"`).

use std::path::Path;

/// Extension every output file gets, regardless of the source container
pub const OUTPUT_EXTENSION: &str = "mp3";

/// Separator between a leading track number and the title
const TRACK_SEPARATOR: &str = " - ";

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ' ' || c == '-'
}

/// Replace every character outside `[A-Za-z0-9_ -]` with `replacement`
pub fn clean_stem(stem: &str, replacement: &str) -> String {
    let mut cleaned = String::with_capacity(stem.len());
    for c in stem.chars() {
        if is_allowed(c) {
            cleaned.push(c);
        } else {
            cleaned.push_str(replacement);
        }
    }
    cleaned
}

/// Drop a leading `"<number> - "` prefix.
///
/// Only the first separator counts; names without one, or whose first
/// token is not an integer, are returned unchanged.
pub fn strip_track_number(name: &str) -> &str {
    match name.split_once(TRACK_SEPARATOR) {
        Some((token, rest)) if is_integer(token.trim()) => rest,
        _ => name,
    }
}

fn is_integer(token: &str) -> bool {
    let digits = token
        .strip_prefix('+')
        .or_else(|| token.strip_prefix('-'))
        .unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Build the output file name for a playlist entry.
///
/// The entry's directory part is ignored. When cleaning leaves nothing usable
/// the name falls back to `track-<md5 prefix of the entry>.mp3`.
pub fn output_file_name(entry: &str, replacement: &str, strip_track_numbers: bool) -> String {
    let stem = Path::new(entry)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = format!("{}.{}", clean_stem(&stem, replacement), OUTPUT_EXTENSION);
    let name = if strip_track_numbers {
        strip_track_number(&name)
    } else {
        name.as_str()
    };

    let suffix = format!(".{}", OUTPUT_EXTENSION);
    let base = name.strip_suffix(&suffix).unwrap_or(name);
    if base.trim().is_empty() {
        let digest = format!("{:x}", md5::compute(entry.as_bytes()));
        let fallback = format!("track-{}.{}", &digest[..8], OUTPUT_EXTENSION);
        log::warn!(
            "Sanitized name of \"{}\" is empty, using \"{}\" instead",
            entry,
            fallback
        );
        return fallback;
    }

    name.to_string()
}
