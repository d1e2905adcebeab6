//! Garmin Playlist Exporter - converts M3U playlists for Garmin watches
//!
//! This library reads `.m3u`/`.m3u8` playlists, transcodes the referenced
//! songs to MP3, renames them for the device filesystem and writes rewritten
//! `.m3u8` playlists pointing at the converted files.

pub mod export;
pub mod m3u;
pub mod media;
pub mod model;
pub mod sanitize;
pub mod transcode;

pub use export::config::ProcessingOptions;
pub use export::pipeline::PlaylistConverter;
