//! User creation and the playback navigation state machine
//!
//! Per-user playback state moves between two observable shapes: nothing
//! active, or an active playlist with an active song. `play_playlist`
//! always sets both pointers together; `play_song` only ever moves the
//! song pointer. Next/previous navigation is circular: advancing past the
//! last song wraps to the first, retreating before the first wraps to the
//! last.

use crate::dtos::{NowPlaying, UserSummary};
use crate::error::{Result, ServiceError};
use crate::require_non_empty;
use jukebox_library::models::{Song, User};
use jukebox_library::repositories::{SongRepository, UserRepository};
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

/// Relative navigation over the active playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackControl {
    Next,
    Previous,
}

/// Raised by [`PlaybackControl::from_str`] for anything that is not a
/// recognized control token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownControl(pub String);

impl FromStr for PlaybackControl {
    type Err = UnknownControl;

    fn from_str(token: &str) -> std::result::Result<Self, Self::Err> {
        match token {
            "NEXT" => Ok(Self::Next),
            "PREVIOUS" => Ok(Self::Previous),
            other => Err(UnknownControl(other.to_string())),
        }
    }
}

/// What `play_song` should select: a member of the active playlist by ID,
/// or a step relative to the current song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongSelection {
    ById(String),
    Control(PlaybackControl),
}

impl SongSelection {
    /// Parses a command token: a recognized control word wins, anything
    /// else is treated as a song ID.
    pub fn parse(token: &str) -> Self {
        match PlaybackControl::from_str(token) {
            Ok(control) => Self::Control(control),
            Err(_) => Self::ById(token.to_string()),
        }
    }
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    songs: Arc<dyn SongRepository>,
    // Serializes the read-validate-persist window of each mutation.
    write_guard: Mutex<()>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, songs: Arc<dyn SongRepository>) -> Self {
        Self {
            users,
            songs,
            write_guard: Mutex::new(()),
        }
    }

    pub fn create_user(&self, name: &str) -> Result<UserSummary> {
        require_non_empty(name, "User name")?;
        let _guard = self.write_guard.lock().unwrap_or_else(PoisonError::into_inner);

        let user = self.users.save(User::new(name.to_string()));
        info!(id = ?user.id, name = %user.name, "user created");
        Ok(UserSummary::from(&user))
    }

    /// Starts playback of one of the user's own playlists from its first
    /// song, setting both active pointers together.
    pub fn play_playlist(&self, user_id: &str, playlist_id: &str) -> Result<NowPlaying> {
        require_non_empty(user_id, "User ID")?;
        require_non_empty(playlist_id, "Playlist ID")?;
        let _guard = self.write_guard.lock().unwrap_or_else(PoisonError::into_inner);

        let mut user = self.resolve_user(user_id)?;
        let playlist = user
            .playlist(playlist_id)
            .cloned()
            .ok_or_else(|| ServiceError::PlaylistNotFound {
                id: playlist_id.to_string(),
            })?;

        if playlist.is_empty() {
            return Err(ServiceError::EmptyPlaylist {
                id: playlist_id.to_string(),
            });
        }

        let song = self.resolve_song(&playlist.song_ids[0])?;
        user.set_active(playlist, song.clone());
        self.users.save(user);

        info!(user = user_id, playlist = playlist_id, song = ?song.id, "playback started");
        Ok(NowPlaying::from(&song))
    }

    /// Moves the active-song pointer: directly to a member of the active
    /// playlist, or one step forward/backward with wrap-around.
    pub fn play_song(&self, user_id: &str, selection: SongSelection) -> Result<NowPlaying> {
        require_non_empty(user_id, "User ID")?;
        let _guard = self.write_guard.lock().unwrap_or_else(PoisonError::into_inner);

        let mut user = self.resolve_user(user_id)?;
        let playlist = user
            .active_playlist
            .clone()
            .ok_or_else(|| ServiceError::NoActivePlaylist {
                user_id: user_id.to_string(),
            })?;
        let playlist_id = playlist.id.clone().unwrap_or_default();

        let song = match selection {
            SongSelection::ById(song_id) => {
                if !playlist.contains_song(&song_id) {
                    return Err(ServiceError::SongNotInPlaylist {
                        song_id,
                        playlist_id,
                    });
                }
                self.resolve_song(&song_id)?
            }
            SongSelection::Control(control) => {
                let current = user
                    .active_song
                    .as_ref()
                    .ok_or_else(|| ServiceError::NoActiveSong {
                        user_id: user_id.to_string(),
                    })?;
                let current_id = current.id.clone().unwrap_or_default();

                // First occurrence wins when the playlist holds duplicates.
                let index = playlist
                    .song_ids
                    .iter()
                    .position(|id| *id == current_id)
                    .ok_or(ServiceError::SongNotInPlaylist {
                        song_id: current_id,
                        playlist_id,
                    })?;

                let count = playlist.song_count();
                let next_index = match control {
                    PlaybackControl::Next => (index + 1) % count,
                    PlaybackControl::Previous => (index + count - 1) % count,
                };
                debug!(user = user_id, index, next_index, "navigating");
                self.resolve_song(&playlist.song_ids[next_index])?
            }
        };

        user.set_active_song(song.clone());
        self.users.save(user);

        info!(user = user_id, song = ?song.id, "song playing");
        Ok(NowPlaying::from(&song))
    }

    fn resolve_user(&self, user_id: &str) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .ok_or_else(|| ServiceError::UserNotFound {
                id: user_id.to_string(),
            })
    }

    fn resolve_song(&self, song_id: &str) -> Result<Song> {
        self.songs
            .find_by_id(song_id)
            .ok_or_else(|| ServiceError::SongNotFound {
                id: song_id.to_string(),
            })
    }
}
