//! User repository trait and in-memory implementation

use crate::models::User;
use crate::repositories::Arena;
use std::sync::{PoisonError, RwLock};

/// User repository interface for data access operations.
pub trait UserRepository: Send + Sync {
    /// Stores the user, assigning an ID on first save.
    ///
    /// Returns the stored value, which carries the assigned ID.
    fn save(&self, user: User) -> User;

    /// Exact-key lookup.
    fn find_by_id(&self, id: &str) -> Option<User>;

    fn exists_by_id(&self, id: &str) -> bool;

    /// All stored users in handle order.
    fn find_all(&self) -> Vec<User>;

    /// Removes by the entity's own ID; no-op when unsaved or absent.
    fn delete(&self, user: &User);

    fn delete_by_id(&self, id: &str);

    fn count(&self) -> usize;

    /// First user with the given name, in handle order. Names are not
    /// unique, so with duplicates this picks the earliest-saved one.
    fn find_by_name(&self, name: &str) -> Option<User>;
}

/// In-memory arena-backed implementation of [`UserRepository`].
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    arena: RwLock<Arena<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            arena: RwLock::new(Arena::new()),
        }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn save(&self, user: User) -> User {
        let mut arena = self.arena.write().unwrap_or_else(PoisonError::into_inner);
        let stored = arena.save(user);
        tracing::debug!(id = ?stored.id, name = %stored.name, "user saved");
        stored
    }

    fn find_by_id(&self, id: &str) -> Option<User> {
        let arena = self.arena.read().unwrap_or_else(PoisonError::into_inner);
        arena.get(id).cloned()
    }

    fn exists_by_id(&self, id: &str) -> bool {
        let arena = self.arena.read().unwrap_or_else(PoisonError::into_inner);
        arena.contains(id)
    }

    fn find_all(&self) -> Vec<User> {
        let arena = self.arena.read().unwrap_or_else(PoisonError::into_inner);
        arena.all()
    }

    fn delete(&self, user: &User) {
        if let Some(id) = user.id.as_deref() {
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

    fn find_by_name(&self, name: &str) -> Option<User> {
        let arena = self.arena.read().unwrap_or_else(PoisonError::into_inner);
        let result = arena
            .iter()
            .map(|(_, user)| user)
            .find(|user| user.name == name)
            .cloned();
        result
    }
}
