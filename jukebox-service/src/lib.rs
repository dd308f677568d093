//! # Jukebox Services
//!
//! Domain operations over the jukebox library: playlist lifecycle and
//! membership on one side, user creation and the playback navigation state
//! machine on the other. Services consume the repository traits behind
//! `Arc` handles and return read-only projections, never stored entities.

pub mod dtos;
pub mod error;
pub mod playback;
pub mod playlist;

pub use dtos::{NowPlaying, PlaylistSummary, UserSummary};
pub use error::{Result, ServiceError};
pub use playback::{PlaybackControl, SongSelection, UserService};
pub use playlist::PlaylistService;

/// Required-argument validation shared by every service entry point.
pub(crate) fn require_non_empty(
    value: &str,
    what: &'static str,
) -> std::result::Result<(), ServiceError> {
    if value.trim().is_empty() {
        Err(ServiceError::InvalidArgument(what))
    } else {
        Ok(())
    }
}
