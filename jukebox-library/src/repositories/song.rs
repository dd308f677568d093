//! Song repository trait and in-memory implementation
//!
//! The song store carries secondary multi-map indexes (name, artist, album,
//! genre → handles) maintained incrementally on every write, so the
//! attribute finders never scan the arena.

use crate::models::Song;
use crate::repositories::Arena;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Song repository interface for data access operations.
///
/// Songs are immutable once created; saves with an existing ID only ever
/// rewrite the identical value, but the index maintenance below stays
/// correct for arbitrary overwrites regardless.
pub trait SongRepository: Send + Sync {
    /// Stores the song, assigning an ID on first save.
    fn save(&self, song: Song) -> Song;

    fn find_by_id(&self, id: &str) -> Option<Song>;

    fn exists_by_id(&self, id: &str) -> bool;

    fn find_all(&self) -> Vec<Song>;

    fn delete(&self, song: &Song);

    fn delete_by_id(&self, id: &str);

    fn count(&self) -> usize;

    /// All songs with the given name, in handle order.
    fn find_by_name(&self, name: &str) -> Vec<Song>;

    /// All songs whose primary artist matches exactly.
    fn find_by_artist(&self, artist: &str) -> Vec<Song>;

    fn find_by_album(&self, album: &str) -> Vec<Song>;

    fn find_by_genre(&self, genre: &str) -> Vec<Song>;
}

#[derive(Debug, Default)]
struct SongStore {
    arena: Arena<Song>,
    by_name: HashMap<String, Vec<u64>>,
    by_artist: HashMap<String, Vec<u64>>,
    by_album: HashMap<String, Vec<u64>>,
    by_genre: HashMap<String, Vec<u64>>,
}

impl SongStore {
    fn index(&mut self, handle: u64, song: &Song) {
        self.by_name
            .entry(song.name.clone())
            .or_default()
            .push(handle);
        self.by_artist
            .entry(song.artist.clone())
            .or_default()
            .push(handle);
        self.by_album
            .entry(song.album.clone())
            .or_default()
            .push(handle);
        self.by_genre
            .entry(song.genre.clone())
            .or_default()
            .push(handle);
    }

    fn unindex(&mut self, handle: u64, song: &Song) {
        for (map, key) in [
            (&mut self.by_name, &song.name),
            (&mut self.by_artist, &song.artist),
            (&mut self.by_album, &song.album),
            (&mut self.by_genre, &song.genre),
        ] {
            if let Some(handles) = map.get_mut(key) {
                handles.retain(|h| *h != handle);
                if handles.is_empty() {
                    map.remove(key);
                }
            }
        }
    }

    fn save(&mut self, song: Song) -> Song {
        if let Some(previous) = song.id.as_deref().and_then(|id| self.arena.get(id).cloned()) {
            if let Some(handle) = song.id.as_deref().and_then(|id| id.parse().ok()) {
                self.unindex(handle, &previous);
            }
        }
        let stored = self.arena.save(song);
        if let Some(handle) = stored.id.as_deref().and_then(|id| id.parse().ok()) {
            self.index(handle, &stored);
        }
        stored
    }

    fn remove(&mut self, id: &str) {
        if let Some(removed) = self.arena.remove(id) {
            if let Ok(handle) = id.parse() {
                self.unindex(handle, &removed);
            }
        }
    }

    /// Resolves an index bucket back to songs, in handle order.
    fn resolve(&self, handles: Option<&Vec<u64>>) -> Vec<Song> {
        let mut handles = handles.cloned().unwrap_or_default();
        handles.sort_unstable();
        handles
            .into_iter()
            .filter_map(|handle| self.arena.get(&handle.to_string()).cloned())
            .collect()
    }
}

/// In-memory arena-backed implementation of [`SongRepository`].
#[derive(Debug, Default)]
pub struct InMemorySongRepository {
    store: RwLock<SongStore>,
}

impl InMemorySongRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(SongStore::default()),
        }
    }
}

impl SongRepository for InMemorySongRepository {
    fn save(&self, song: Song) -> Song {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let stored = store.save(song);
        tracing::debug!(id = ?stored.id, name = %stored.name, "song saved");
        stored
    }

    fn find_by_id(&self, id: &str) -> Option<Song> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.arena.get(id).cloned()
    }

    fn exists_by_id(&self, id: &str) -> bool {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.arena.contains(id)
    }

    fn find_all(&self) -> Vec<Song> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.arena.all()
    }

    fn delete(&self, song: &Song) {
        if let Some(id) = song.id.as_deref() {
            self.delete_by_id(id);
        }
    }

    fn delete_by_id(&self, id: &str) {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        store.remove(id);
    }

    fn count(&self) -> usize {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.arena.len()
    }

    fn find_by_name(&self, name: &str) -> Vec<Song> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.resolve(store.by_name.get(name))
    }

    fn find_by_artist(&self, artist: &str) -> Vec<Song> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.resolve(store.by_artist.get(artist))
    }

    fn find_by_album(&self, album: &str) -> Vec<Song> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.resolve(store.by_album.get(album))
    }

    fn find_by_genre(&self, genre: &str) -> Vec<Song> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.resolve(store.by_genre.get(genre))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(name: &str, genre: &str, album: &str, artist: &str) -> Song {
        Song::new(
            name.to_string(),
            genre.to_string(),
            album.to_string(),
            artist.to_string(),
            vec!["Feat".to_string()],
        )
    }

    #[test]
    fn save_assigns_sequential_ids() {
        let repo = InMemorySongRepository::new();
        let first = repo.save(song("A", "Pop", "One", "X"));
        let second = repo.save(song("B", "Rock", "Two", "Y"));

        assert_eq!(first.id.as_deref(), Some("1"));
        assert_eq!(second.id.as_deref(), Some("2"));
        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn attribute_finders_return_all_matches_in_order() {
        let repo = InMemorySongRepository::new();
        repo.save(song("A", "Pop", "One", "X"));
        repo.save(song("B", "Rock", "One", "X"));
        repo.save(song("A", "Pop", "Two", "Y"));

        let by_name: Vec<_> = repo
            .find_by_name("A")
            .into_iter()
            .filter_map(|s| s.id)
            .collect();
        assert_eq!(by_name, vec!["1", "3"]);

        assert_eq!(repo.find_by_artist("X").len(), 2);
        assert_eq!(repo.find_by_album("One").len(), 2);
        assert_eq!(repo.find_by_genre("Rock").len(), 1);
        assert!(repo.find_by_genre("Jazz").is_empty());
    }

    #[test]
    fn overwrite_reindexes_changed_attributes() {
        let repo = InMemorySongRepository::new();
        let mut stored = repo.save(song("A", "Pop", "One", "X"));
        stored.genre = "Rock".to_string();
        repo.save(stored);

        assert!(repo.find_by_genre("Pop").is_empty());
        assert_eq!(repo.find_by_genre("Rock").len(), 1);
        assert_eq!(repo.count(), 1);
    }

    #[test]
    fn delete_drops_index_entries() {
        let repo = InMemorySongRepository::new();
        let stored = repo.save(song("A", "Pop", "One", "X"));
        repo.delete(&stored);

        assert!(repo.find_by_name("A").is_empty());
        assert!(!repo.exists_by_id("1"));
    }
}
