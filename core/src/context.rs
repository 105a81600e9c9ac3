//! Cached view of the favorites store for presentation code.
//!
//! The context owns its `FavoritesStore`, so every mutation goes through
//! `toggle_favorite` and the cache cannot drift from the slot.

use crate::error::FavoritesError;
use crate::favorites::{FavoriteSet, FavoritesStore, Slot};
use crate::types::Book;

#[derive(Debug)]
pub struct FavoritesContext<S> {
    store: FavoritesStore<S>,
    cache: Option<FavoriteSet>,
}

impl<S: Slot> FavoritesContext<S> {
    /// Inactive context; call `activate` before use.
    pub fn new(store: FavoritesStore<S>) -> Self {
        Self { store, cache: None }
    }

    /// Load the favorites from the store. Only the first call reads the
    /// store; later calls return the cached set.
    pub fn activate(&mut self) -> &FavoriteSet {
        self.cache.get_or_insert_with(|| self.store.all())
    }

    pub fn is_active(&self) -> bool {
        self.cache.is_some()
    }

    pub fn favorites(&self) -> Result<&FavoriteSet, FavoritesError> {
        self.cache.as_ref().ok_or(FavoritesError::NotInitialized)
    }

    /// Cached lookup; does not read the store.
    pub fn is_favorite(&self, id: &str) -> Result<bool, FavoritesError> {
        Ok(self.favorites()?.contains(id))
    }

    /// Toggle `id` in the store and replace the cache with the result.
    /// Returns the new membership of `id`.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, FavoritesError> {
        if self.cache.is_none() {
            return Err(FavoritesError::NotInitialized);
        }
        let toggle = self.store.toggle(id)?;
        self.cache = Some(toggle.favorites);
        Ok(toggle.is_favorite)
    }

    /// The favorited entries of `books`, in the order given.
    pub fn favorite_books<'a>(&self, books: &'a [Book]) -> Result<Vec<&'a Book>, FavoritesError> {
        let favorites = self.favorites()?;
        Ok(books.iter().filter(|book| favorites.contains(&book.id)).collect())
    }

    /// Tear down the context, returning the store.
    pub fn into_store(self) -> FavoritesStore<S> {
        self.store
    }
}
