//! One handler per command keyword
//!
//! Each handler parses its fixed positional tokens, calls exactly one
//! service operation, and translates the error kinds it anticipates into
//! fixed user-facing lines. Any other error kind still surfaces through
//! its `Display` rendering — nothing crashes the interpreter loop.

use crate::command::{arg, Command, CommandError};
use jukebox_library::catalog::load_catalog;
use jukebox_library::repositories::SongRepository;
use jukebox_library::LibraryError;
use jukebox_service::{PlaylistService, ServiceError, SongSelection, UserService};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

const SONGS_UNAVAILABLE: &str = "Some Requested Songs Not Available. Please try again.";

/// What `MODIFY-PLAYLIST` should do to the membership list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyAction {
    AddSong,
    DeleteSong,
}

/// Raised by [`ModifyAction::from_str`] for unrecognized action tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl FromStr for ModifyAction {
    type Err = UnknownAction;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "ADD-SONG" => Ok(Self::AddSong),
            "DELETE-SONG" => Ok(Self::DeleteSong),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

pub struct CreateUserCommand {
    users: Arc<UserService>,
}

impl CreateUserCommand {
    const USAGE: &'static str = "Usage: CREATE-USER <name>";

    pub fn new(users: Arc<UserService>) -> Self {
        Self { users }
    }
}

impl Command for CreateUserCommand {
    fn execute(&self, tokens: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        let name = arg(tokens, 1, Self::USAGE)?;
        match self.users.create_user(name) {
            Ok(summary) => writeln!(out, "{summary}")?,
            Err(err) => report(out, err)?,
        }
        Ok(())
    }
}

pub struct CreatePlaylistCommand {
    playlists: Arc<PlaylistService>,
}

impl CreatePlaylistCommand {
    const USAGE: &'static str = "Usage: CREATE-PLAYLIST <user-id> <name> [<song-id>...]";

    pub fn new(playlists: Arc<PlaylistService>) -> Self {
        Self { playlists }
    }
}

impl Command for CreatePlaylistCommand {
    fn execute(&self, tokens: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        let user_id = arg(tokens, 1, Self::USAGE)?;
        let name = arg(tokens, 2, Self::USAGE)?;
        let song_ids = tokens[3..].to_vec();

        match self.playlists.create_playlist(user_id, name, &song_ids) {
            Ok(summary) => writeln!(out, "Playlist ID - {}", summary.id)?,
            Err(ServiceError::SongNotFound { .. }) => writeln!(out, "{SONGS_UNAVAILABLE}")?,
            Err(err) => report(out, err)?,
        }
        Ok(())
    }
}

pub struct DeletePlaylistCommand {
    playlists: Arc<PlaylistService>,
}

impl DeletePlaylistCommand {
    const USAGE: &'static str = "Usage: DELETE-PLAYLIST <user-id> <playlist-id>";

    pub fn new(playlists: Arc<PlaylistService>) -> Self {
        Self { playlists }
    }
}

impl Command for DeletePlaylistCommand {
    fn execute(&self, tokens: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        let user_id = arg(tokens, 1, Self::USAGE)?;
        let playlist_id = arg(tokens, 2, Self::USAGE)?;

        match self.playlists.delete_playlist(user_id, playlist_id) {
            Ok(()) => writeln!(out, "Delete Successful")?,
            Err(ServiceError::PlaylistNotFound { .. }) => writeln!(out, "Playlist Not Found")?,
            Err(err) => report(out, err)?,
        }
        Ok(())
    }
}

pub struct ModifyPlaylistCommand {
    playlists: Arc<PlaylistService>,
}

impl ModifyPlaylistCommand {
    const USAGE: &'static str =
        "Usage: MODIFY-PLAYLIST ADD-SONG|DELETE-SONG <user-id> <playlist-id> <song-id>...";

    pub fn new(playlists: Arc<PlaylistService>) -> Self {
        Self { playlists }
    }
}

impl Command for ModifyPlaylistCommand {
    fn execute(&self, tokens: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        let action = match ModifyAction::from_str(arg(tokens, 1, Self::USAGE)?) {
            Ok(action) => action,
            Err(UnknownAction(token)) => {
                writeln!(out, "{token} is not a valid playlist modification")?;
                return Ok(());
            }
        };
        let user_id = arg(tokens, 2, Self::USAGE)?;
        let playlist_id = arg(tokens, 3, Self::USAGE)?;
        let song_ids = tokens[4..].to_vec();

        let result = match action {
            ModifyAction::AddSong => self.playlists.add_songs(user_id, playlist_id, &song_ids),
            ModifyAction::DeleteSong => {
                self.playlists.remove_songs(user_id, playlist_id, &song_ids)
            }
        };

        match result {
            Ok(summary) => writeln!(out, "{summary}")?,
            Err(ServiceError::SongNotFound { .. }) => writeln!(out, "{SONGS_UNAVAILABLE}")?,
            Err(ServiceError::SongNotInPlaylist { .. }) => writeln!(
                out,
                "Some Requested Songs for Deletion are not present in the playlist. Please try again."
            )?,
            Err(err) => report(out, err)?,
        }
        Ok(())
    }
}

pub struct PlayPlaylistCommand {
    users: Arc<UserService>,
}

impl PlayPlaylistCommand {
    const USAGE: &'static str = "Usage: PLAY-PLAYLIST <user-id> <playlist-id>";

    pub fn new(users: Arc<UserService>) -> Self {
        Self { users }
    }
}

impl Command for PlayPlaylistCommand {
    fn execute(&self, tokens: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        let user_id = arg(tokens, 1, Self::USAGE)?;
        let playlist_id = arg(tokens, 2, Self::USAGE)?;

        match self.users.play_playlist(user_id, playlist_id) {
            Ok(playing) => writeln!(out, "{playing}")?,
            Err(ServiceError::EmptyPlaylist { .. }) => writeln!(out, "Playlist is empty.")?,
            Err(err) => report(out, err)?,
        }
        Ok(())
    }
}

pub struct PlaySongCommand {
    users: Arc<UserService>,
}

impl PlaySongCommand {
    const USAGE: &'static str = "Usage: PLAY-SONG <user-id> <song-id>|NEXT|PREVIOUS";

    pub fn new(users: Arc<UserService>) -> Self {
        Self { users }
    }
}

impl Command for PlaySongCommand {
    fn execute(&self, tokens: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        let user_id = arg(tokens, 1, Self::USAGE)?;
        let selection = SongSelection::parse(arg(tokens, 2, Self::USAGE)?);

        match self.users.play_song(user_id, selection) {
            Ok(playing) => writeln!(out, "{playing}")?,
            Err(ServiceError::SongNotInPlaylist { .. }) => {
                writeln!(out, "Given song id is not a part of the active playlist")?
            }
            Err(err) => report(out, err)?,
        }
        Ok(())
    }
}

pub struct LoadDataCommand {
    songs: Arc<dyn SongRepository>,
}

impl LoadDataCommand {
    const USAGE: &'static str = "Usage: LOAD-DATA <file>";

    pub fn new(songs: Arc<dyn SongRepository>) -> Self {
        Self { songs }
    }
}

impl Command for LoadDataCommand {
    fn execute(&self, tokens: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        let path = arg(tokens, 1, Self::USAGE)?;

        match load_catalog(Path::new(path), self.songs.as_ref()) {
            Ok(_) => writeln!(out, "Songs Loaded successfully")?,
            Err(LibraryError::Io(err)) => {
                warn!(path, error = %err, "catalog file unreadable");
                writeln!(out, "Songs are not loaded to Songs Repository")?;
                writeln!(out, "Error loading data from file: {path}")?;
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(())
    }
}

/// Fallback for error kinds a handler does not special-case.
fn report(out: &mut dyn Write, err: ServiceError) -> Result<(), CommandError> {
    warn!(error = %err, "command rejected");
    writeln!(out, "{err}")?;
    Ok(())
}
