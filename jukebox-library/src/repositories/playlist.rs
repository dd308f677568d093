//! Playlist repository trait and in-memory implementation

use crate::models::Playlist;
use crate::repositories::Arena;
use std::sync::{PoisonError, RwLock};

/// Playlist repository interface for data access operations.
pub trait PlaylistRepository: Send + Sync {
    /// Stores the playlist, assigning an ID on first save.
    fn save(&self, playlist: Playlist) -> Playlist;

    fn find_by_id(&self, id: &str) -> Option<Playlist>;

    fn exists_by_id(&self, id: &str) -> bool;

    fn find_all(&self) -> Vec<Playlist>;

    fn delete(&self, playlist: &Playlist);

    fn delete_by_id(&self, id: &str);

    fn count(&self) -> usize;
}

/// In-memory arena-backed implementation of [`PlaylistRepository`].
#[derive(Debug, Default)]
pub struct InMemoryPlaylistRepository {
    arena: RwLock<Arena<Playlist>>,
}

impl InMemoryPlaylistRepository {
    pub fn new() -> Self {
        Self {
            arena: RwLock::new(Arena::new()),
        }
    }
}

impl PlaylistRepository for InMemoryPlaylistRepository {
    fn save(&self, playlist: Playlist) -> Playlist {
        let mut arena = self.arena.write().unwrap_or_else(PoisonError::into_inner);
        let stored = arena.save(playlist);
        tracing::debug!(id = ?stored.id, name = %stored.name, "playlist saved");
        stored
    }

    fn find_by_id(&self, id: &str) -> Option<Playlist> {
        let arena = self.arena.read().unwrap_or_else(PoisonError::into_inner);
        arena.get(id).cloned()
    }

    fn exists_by_id(&self, id: &str) -> bool {
        let arena = self.arena.read().unwrap_or_else(PoisonError::into_inner);
        arena.contains(id)
    }

    fn find_all(&self) -> Vec<Playlist> {
        let arena = self.arena.read().unwrap_or_else(PoisonError::into_inner);
        arena.all()
    }

    fn delete(&self, playlist: &Playlist) {
        if let Some(id) = playlist.id.as_deref() {
            self.delete_by_id(id);
        }
    }

    fn delete_by_id(&self, id: &str) {
        let mut arena = self.arena.write().unwrap_or_else(PoisonError::into_inner);
        arena.remove(id);
    }

    fn count(&self) -> usize {
        let arena = self.arena.read().unwrap_or_else(PoisonError::into_inner);
        arena.len()
    }
}
