//! Textual tag propagation

use super::{Container, MediaError};
use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{Tag, TagExt};
use std::path::Path;

/// Read the primary (or first available) tag of an audio file
pub fn read_tag(path: &Path) -> Result<Option<Tag>, MediaError> {
    let tagged_file = Probe::open(path)?.read()?;

    Ok(tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
        .cloned())
}

/// Convert `source` into a tag of the destination container's type.
///
/// Items the target tag type cannot represent are dropped silently, and
/// pictures are never carried over (cover art is handled separately).
pub fn convert_tag(source: &Tag, target: Container) -> (Tag, usize) {
    let mut tag = Tag::new(target.primary_tag_type());
    let mut copied = 0;

    for item in source.items() {
        if tag.insert(item.clone()) {
            copied += 1;
        } else {
            log::trace!("Dropping unsupported tag item {:?}", item.key());
        }
    }

    (tag, copied)
}

/// Copy every recognised text tag from `source` onto `dest`
pub fn copy_tags(source: &Path, dest: &Path) -> Result<usize, MediaError> {
    let source_tag = read_tag(source)?.ok_or_else(|| MediaError::NoTags(source.to_path_buf()))?;
    let container = Container::detect(dest)?;

    let (tag, copied) = convert_tag(&source_tag, container);
    tag.save_to_path(dest, WriteOptions::default())?;

    log::debug!("Copied {} tag item(s) from {:?} to {:?}", copied, source, dest);
    Ok(copied)
}
