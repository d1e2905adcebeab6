//! Data model shared by every pipeline stage
//!
//! Playlist entries, the target bitrate and the per-song task/outcome
//! types are independent of both the playlist format and the transcoder.

mod bitrate;
mod playlist;
mod song;

pub use bitrate::{Bitrate, BitrateParseError};
pub use playlist::PlaylistEntry;
pub use song::{SkipReason, SongDecision, SongError, SongOutcome, SongTask};
