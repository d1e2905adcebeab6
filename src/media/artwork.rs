//! Front cover propagation
//!
//! Extracts the embedded front cover from a source file and embeds it in the
//! converted output. Only `CoverFront` pictures are considered; a source with
//! other picture types but no front cover counts as having no art.

use super::{Container, MediaError};
use id3::TagLike;
use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Tag, TagExt};
use std::path::Path;

/// Description stored with the cover on the output file
const COVER_DESCRIPTION: &str = "Cover";

/// Cover art extracted from an audio file
#[derive(Debug, Clone)]
pub struct CoverArt {
    /// Raw image bytes
    pub data: Vec<u8>,
    /// MIME type of the image
    pub mime_type: String,
}

impl CoverArt {
    /// Build from picture bytes, sniffing the MIME type when the tag lacks one
    pub fn new(data: Vec<u8>, mime_type: Option<&str>) -> Self {
        let mime_type = match mime_type {
            Some(mime) if !mime.is_empty() => mime.to_string(),
            _ => guess_mime_type(&data),
        };
        Self { data, mime_type }
    }

    /// Extract the front cover from an audio file
    pub fn extract(path: &Path) -> Result<Self, MediaError> {
        Container::detect(path)?;

        let tagged_file = Probe::open(path)?.read()?;

        for tag in tagged_file.tags() {
            if let Some(picture) = tag
                .pictures()
                .iter()
                .find(|p| p.pic_type() == PictureType::CoverFront)
            {
                return Ok(Self::new(
                    picture.data().to_vec(),
                    picture.mime_type().map(|m| m.as_str()),
                ));
            }
        }

        Err(MediaError::NoCoverArt(path.to_path_buf()))
    }

    /// Replace any pictures on `path` with this image as the front cover
    pub fn embed(&self, path: &Path) -> Result<(), MediaError> {
        let container = Container::detect(path)?;

        if container.uses_apic() {
            self.embed_apic(path)
        } else {
            self.embed_picture(path, container)
        }
    }

    fn embed_apic(&self, path: &Path) -> Result<(), MediaError> {
        let mut tag = match id3::Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(id3::Error {
                kind: id3::ErrorKind::NoTag,
                ..
            }) => id3::Tag::new(),
            Err(e) => return Err(e.into()),
        };

        tag.remove_all_pictures();
        tag.add_frame(id3::frame::Picture {
            mime_type: self.mime_type.clone(),
            picture_type: id3::frame::PictureType::CoverFront,
            description: COVER_DESCRIPTION.to_string(),
            data: self.data.clone(),
        });
        tag.write_to_path(path, id3::Version::Id3v24)?;

        Ok(())
    }

    fn embed_picture(&self, path: &Path, container: Container) -> Result<(), MediaError> {
        let tagged_file = Probe::open(path)?.read()?;
        let mut tag = tagged_file
            .tag(container.primary_tag_type())
            .cloned()
            .unwrap_or_else(|| Tag::new(container.primary_tag_type()));

        tag.remove_picture_type(PictureType::CoverFront);
        tag.push_picture(Picture::new_unchecked(
            PictureType::CoverFront,
            Some(MimeType::from_str(&self.mime_type)),
            Some(COVER_DESCRIPTION.to_string()),
            self.data.clone(),
        ));
        tag.save_to_path(path, WriteOptions::default())?;

        Ok(())
    }
}

/// Sniff an image MIME type from its bytes, defaulting to JPEG
fn guess_mime_type(data: &[u8]) -> String {
    image::guess_format(data)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| "image/jpeg".to_string())
}

/// Copy the front cover from `source` to `dest`
pub fn copy_front_cover(source: &Path, dest: &Path) -> Result<(), MediaError> {
    let cover = CoverArt::extract(source)?;
    cover.embed(dest)?;

    log::debug!(
        "Copied album cover art ({}, {} bytes) from {:?} to {:?}",
        cover.mime_type,
        cover.data.len(),
        source.file_name().unwrap_or_default(),
        dest.file_name().unwrap_or_default()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn test_mime_from_tag_wins() {
        let cover = CoverArt::new(PNG_MAGIC.to_vec(), Some("image/gif"));
        assert_eq!(cover.mime_type, "image/gif");
    }

    #[test]
    fn test_mime_sniffed_when_missing() {
        let cover = CoverArt::new(PNG_MAGIC.to_vec(), None);
        assert_eq!(cover.mime_type, "image/png");

        let unknown = CoverArt::new(vec![1, 2, 3], Some(""));
        assert_eq!(unknown.mime_type, "image/jpeg");
    }

    #[test]
    fn test_extract_unsupported_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("song.wav");
        std::fs::write(&path, b"RIFF....WAVE").unwrap();

        assert!(CoverArt::extract(&path).is_err());
    }
}
