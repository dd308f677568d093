//! Domain models for the jukebox library
//!
//! Entities are plain value types. An entity starts out without an ID and
//! receives one from its repository on first save; `assign_id` returns a new
//! value rather than mutating in place. The only fields mutated after
//! creation are a user's active-playback pointers and a playlist's song
//! list, and those mutations happen under the owning service only.

use serde::{Deserialize, Serialize};

/// Identity contract shared by every stored entity.
pub trait Entity: Clone {
    /// The assigned ID, or `None` before the first save.
    fn id(&self) -> Option<&str>;

    /// Returns a copy of the entity carrying the given ID.
    fn assign_id(self, id: String) -> Self;
}

/// A song in the global catalog. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: Option<String>,
    pub name: String,
    pub genre: String,
    pub album: String,
    pub artist: String,
    pub featured_artists: Vec<String>,
}

impl Song {
    pub fn new(
        name: String,
        genre: String,
        album: String,
        artist: String,
        featured_artists: Vec<String>,
    ) -> Self {
        Self {
            id: None,
            name,
            genre,
            album,
            artist,
            featured_artists,
        }
    }
}

impl Entity for Song {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn assign_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }
}

/// An ordered collection of song IDs owned by one user.
///
/// Duplicates are permitted; list order is playback order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: Option<String>,
    pub name: String,
    pub creator_id: String,
    pub song_ids: Vec<String>,
}

impl Playlist {
    pub fn new(name: String, creator_id: String) -> Self {
        Self {
            id: None,
            name,
            creator_id,
            song_ids: Vec::new(),
        }
    }

    pub fn contains_song(&self, song_id: &str) -> bool {
        self.song_ids.iter().any(|id| id == song_id)
    }

    pub fn is_empty(&self) -> bool {
        self.song_ids.is_empty()
    }

    pub fn song_count(&self) -> usize {
        self.song_ids.len()
    }

    pub fn add_song(&mut self, song_id: String) {
        self.song_ids.push(song_id);
    }

    /// Removes the first occurrence of the given song ID, if present.
    pub fn remove_song(&mut self, song_id: &str) {
        if let Some(index) = self.song_ids.iter().position(|id| id == song_id) {
            self.song_ids.remove(index);
        }
    }
}

impl Entity for Playlist {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn assign_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }
}

/// A registered user with an owned playlist collection and the per-user
/// "now playing" state.
///
/// Invariant: when `active_song` is set, its ID is a member of
/// `active_playlist`'s song list. `replace_playlist` and the services keep
/// this holding across membership changes and playlist deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<String>,
    pub name: String,
    pub playlists: Vec<Playlist>,
    pub active_playlist: Option<Playlist>,
    pub active_song: Option<Song>,
}

impl User {
    pub fn new(name: String) -> Self {
        Self {
            id: None,
            name,
            playlists: Vec::new(),
            active_playlist: None,
            active_song: None,
        }
    }

    /// Looks up a playlist in this user's own collection.
    pub fn playlist(&self, playlist_id: &str) -> Option<&Playlist> {
        self.playlists
            .iter()
            .find(|playlist| playlist.id.as_deref() == Some(playlist_id))
    }

    pub fn add_playlist(&mut self, playlist: Playlist) {
        self.playlists.push(playlist);
    }

    pub fn remove_playlist(&mut self, playlist_id: &str) {
        self.playlists
            .retain(|playlist| playlist.id.as_deref() != Some(playlist_id));
    }

    /// Replaces the stored copy of an updated playlist, in the collection
    /// and in the active pointer when the IDs match. Drops the active song
    /// if the update removed it from the active playlist's membership.
    pub fn replace_playlist(&mut self, updated: Playlist) {
        if let Some(slot) = self
            .playlists
            .iter_mut()
            .find(|playlist| playlist.id == updated.id)
        {
            *slot = updated.clone();
        }
        if let Some(active) = &mut self.active_playlist {
            if active.id == updated.id {
                *active = updated;
                let still_member = match (&self.active_song, &self.active_playlist) {
                    (Some(song), Some(playlist)) => song
                        .id
                        .as_deref()
                        .is_some_and(|id| playlist.contains_song(id)),
                    _ => true,
                };
                if !still_member {
                    self.active_song = None;
                }
            }
        }
    }

    pub fn set_active(&mut self, playlist: Playlist, song: Song) {
        self.active_playlist = Some(playlist);
        self.active_song = Some(song);
    }

    pub fn set_active_song(&mut self, song: Song) {
        self.active_song = Some(song);
    }

    pub fn clear_active(&mut self) {
        self.active_playlist = None;
        self.active_song = None;
    }
}

impl Entity for User {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn assign_id(mut self, id: String) -> Self {
        self.id = Some(id);
        self
    }
}
