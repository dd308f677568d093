use jukebox_library::LibraryError;
use thiserror::Error;

/// Failure kinds the services raise. All are expected, recoverable at the
/// command boundary, and never fatal to the interpreter loop. The `Display`
/// renderings are the user-facing fallback messages.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User for given ID:{id} not found!")]
    UserNotFound { id: String },

    #[error("Playlist for given ID: {id} not found!")]
    PlaylistNotFound { id: String },

    #[error("No active playlist found for given user: {user_id}")]
    NoActivePlaylist { user_id: String },

    #[error("No active playing song found for given user: {user_id}")]
    NoActiveSong { user_id: String },

    #[error("Song for given ID: {id} not found!")]
    SongNotFound { id: String },

    #[error("Song for given ID: {song_id} not present in playlist ID: {playlist_id}")]
    SongNotInPlaylist {
        song_id: String,
        playlist_id: String,
    },

    #[error("Playlist for given ID: {id} is Empty!")]
    EmptyPlaylist { id: String },

    #[error("{0} must be provided")]
    InvalidArgument(&'static str),

    #[error(transparent)]
    Library(#[from] LibraryError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
