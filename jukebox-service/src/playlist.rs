//! Playlist lifecycle and membership mutation
//!
//! Every operation resolves the user first, then the playlist within that
//! user's own collection — a playlist owned by someone else is "not found"
//! here even when it exists globally. Nothing is persisted on a failed
//! call: mutations happen on a working copy and only reach the
//! repositories once every precondition has passed.

use crate::dtos::PlaylistSummary;
use crate::error::{Result, ServiceError};
use crate::require_non_empty;
use jukebox_library::models::{Playlist, User};
use jukebox_library::repositories::{PlaylistRepository, SongRepository, UserRepository};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

pub struct PlaylistService {
    playlists: Arc<dyn PlaylistRepository>,
    users: Arc<dyn UserRepository>,
    songs: Arc<dyn SongRepository>,
    // Serializes the read-validate-persist window of each mutation.
    write_guard: Mutex<()>,
}

impl PlaylistService {
    pub fn new(
        playlists: Arc<dyn PlaylistRepository>,
        users: Arc<dyn UserRepository>,
        songs: Arc<dyn SongRepository>,
    ) -> Self {
        Self {
            playlists,
            users,
            songs,
            write_guard: Mutex::new(()),
        }
    }

    /// Creates a playlist for the user, validating every song ID against
    /// the catalog before anything is persisted.
    pub fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        song_ids: &[String],
    ) -> Result<PlaylistSummary> {
        require_non_empty(user_id, "User ID")?;
        require_non_empty(name, "Playlist name")?;
        let _guard = self.write_guard.lock().unwrap_or_else(PoisonError::into_inner);

        let mut user = self.resolve_user(user_id)?;

        let mut playlist = Playlist::new(name.to_string(), user_id.to_string());
        for song_id in song_ids {
            self.require_song_exists(song_id)?;
            playlist.add_song(song_id.clone());
        }

        let playlist = self.playlists.save(playlist);
        user.add_playlist(playlist.clone());
        self.users.save(user);

        info!(user = user_id, playlist = ?playlist.id, "playlist created");
        Ok(PlaylistSummary::from(&playlist))
    }

    /// Deletes a playlist the user owns. When it was the user's active
    /// playlist, the active-playlist and active-song pointers are cleared
    /// with it.
    pub fn delete_playlist(&self, user_id: &str, playlist_id: &str) -> Result<()> {
        require_non_empty(user_id, "User ID")?;
        require_non_empty(playlist_id, "Playlist ID")?;
        let _guard = self.write_guard.lock().unwrap_or_else(PoisonError::into_inner);

        let mut user = self.resolve_user(user_id)?;
        let playlist = self.resolve_owned_playlist(&user, playlist_id)?;

        user.remove_playlist(playlist_id);
        let was_active = user
            .active_playlist
            .as_ref()
            .is_some_and(|active| active.id.as_deref() == Some(playlist_id));
        if was_active {
            user.clear_active();
            debug!(user = user_id, "active playback cleared with deleted playlist");
        }

        self.playlists.delete(&playlist);
        self.users.save(user);

        info!(user = user_id, playlist = playlist_id, "playlist deleted");
        Ok(())
    }

    /// Adds songs to an owned playlist. Each song must exist in the
    /// catalog; adding an ID that is already a member is a silent no-op,
    /// so the call is idempotent.
    pub fn add_songs(
        &self,
        user_id: &str,
        playlist_id: &str,
        song_ids: &[String],
    ) -> Result<PlaylistSummary> {
        require_non_empty(user_id, "User ID")?;
        require_non_empty(playlist_id, "Playlist ID")?;
        let _guard = self.write_guard.lock().unwrap_or_else(PoisonError::into_inner);

        let mut user = self.resolve_user(user_id)?;
        let mut playlist = self.resolve_owned_playlist(&user, playlist_id)?;

        for song_id in song_ids {
            self.require_song_exists(song_id)?;
            if !playlist.contains_song(song_id) {
                playlist.add_song(song_id.clone());
            }
        }

        self.persist(&mut user, playlist, user_id, playlist_id, "songs added")
    }

    /// Removes songs from an owned playlist. The whole call fails with
    /// `SongNotInPlaylist` when any requested ID is absent, and in that
    /// case nothing is removed — the working copy never reaches the
    /// repositories.
    pub fn remove_songs(
        &self,
        user_id: &str,
        playlist_id: &str,
        song_ids: &[String],
    ) -> Result<PlaylistSummary> {
        require_non_empty(user_id, "User ID")?;
        require_non_empty(playlist_id, "Playlist ID")?;
        let _guard = self.write_guard.lock().unwrap_or_else(PoisonError::into_inner);

        let mut user = self.resolve_user(user_id)?;
        let mut playlist = self.resolve_owned_playlist(&user, playlist_id)?;

        for song_id in song_ids {
            if !playlist.contains_song(song_id) {
                return Err(ServiceError::SongNotInPlaylist {
                    song_id: song_id.clone(),
                    playlist_id: playlist_id.to_string(),
                });
            }
            playlist.remove_song(song_id);
        }

        self.persist(&mut user, playlist, user_id, playlist_id, "songs removed")
    }

    fn persist(
        &self,
        user: &mut User,
        playlist: Playlist,
        user_id: &str,
        playlist_id: &str,
        action: &'static str,
    ) -> Result<PlaylistSummary> {
        let playlist = self.playlists.save(playlist);
        user.replace_playlist(playlist.clone());
        self.users.save(user.clone());

        info!(user = user_id, playlist = playlist_id, "{action}");
        Ok(PlaylistSummary::from(&playlist))
    }

    fn resolve_user(&self, user_id: &str) -> Result<User> {
        self.users
            .find_by_id(user_id)
            .ok_or_else(|| ServiceError::UserNotFound {
                id: user_id.to_string(),
            })
    }

    fn resolve_owned_playlist(&self, user: &User, playlist_id: &str) -> Result<Playlist> {
        user.playlist(playlist_id)
            .cloned()
            .ok_or_else(|| ServiceError::PlaylistNotFound {
                id: playlist_id.to_string(),
            })
    }

    fn require_song_exists(&self, song_id: &str) -> Result<()> {
        if self.songs.exists_by_id(song_id) {
            Ok(())
        } else {
            Err(ServiceError::SongNotFound {
                id: song_id.to_string(),
            })
        }
    }
}


#[cfg(test)]
mod interaction_tests {
    //! Mock-based checks that failed calls never reach the repositories.

    use super::*;
    use jukebox_library::models::{Entity, Song};
    use mockall::mock;

    mock! {
        pub Users {}
        impl UserRepository for Users {
            fn save(&self, user: User) -> User;
            fn find_by_id(&self, id: &str) -> Option<User>;
            fn exists_by_id(&self, id: &str) -> bool;
            fn find_all(&self) -> Vec<User>;
            fn delete(&self, user: &User);
            fn delete_by_id(&self, id: &str);
            fn count(&self) -> usize;
            fn find_by_name(&self, name: &str) -> Option<User>;
        }
    }

    mock! {
        pub Playlists {}
        impl PlaylistRepository for Playlists {
            fn save(&self, playlist: Playlist) -> Playlist;
            fn find_by_id(&self, id: &str) -> Option<Playlist>;
            fn exists_by_id(&self, id: &str) -> bool;
            fn find_all(&self) -> Vec<Playlist>;
            fn delete(&self, playlist: &Playlist);
            fn delete_by_id(&self, id: &str);
            fn count(&self) -> usize;
        }
    }

    mock! {
        pub Songs {}
        impl SongRepository for Songs {
            fn save(&self, song: Song) -> Song;
            fn find_by_id(&self, id: &str) -> Option<Song>;
            fn exists_by_id(&self, id: &str) -> bool;
            fn find_all(&self) -> Vec<Song>;
            fn delete(&self, song: &Song);
            fn delete_by_id(&self, id: &str);
            fn count(&self) -> usize;
            fn find_by_name(&self, name: &str) -> Vec<Song>;
            fn find_by_artist(&self, artist: &str) -> Vec<Song>;
            fn find_by_album(&self, album: &str) -> Vec<Song>;
            fn find_by_genre(&self, genre: &str) -> Vec<Song>;
        }
    }

    #[test]
    fn failed_create_never_saves_playlist_or_user() {
        let mut users = MockUsers::new();
        users
            .expect_find_by_id()
            .withf(|id| id == "1")
            .return_once(|_| Some(User::new("Alice".to_string()).assign_id("1".to_string())));
        users.expect_save().never();

        let mut playlists = MockPlaylists::new();
        playlists.expect_save().never();

        let mut songs = MockSongs::new();
        songs
            .expect_exists_by_id()
            .withf(|id| id == "9")
            .return_const(false);

        let service =
            PlaylistService::new(Arc::new(playlists), Arc::new(users), Arc::new(songs));
        let err = service
            .create_playlist("1", "Mix", &["9".to_string()])
            .expect_err("missing song");
        assert!(matches!(err, ServiceError::SongNotFound { .. }));
    }
}
