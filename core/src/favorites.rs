//! Durable set of favorited book ids.
//!
//! # Design
//! The set lives under one fixed key in a `Slot`, a small key-value store
//! that survives restarts. Every mutation reads the slot, applies the change
//! and writes it back before returning, so the slot and the value returned to
//! the caller always agree. Unreadable or unparsable slot contents read as an
//! empty set; only write failures reach the caller.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::FavoritesError;

/// Slot key holding the JSON-encoded favorites array.
pub const FAVORITES_KEY: &str = "pageturner_favorites";

/// A persistent key-value slot.
pub trait Slot {
    /// Stored value for `key`, or `None` if it was never written.
    fn load(&self, key: &str) -> io::Result<Option<String>>;

    fn store(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Slot kept in process memory. Survives a `FavoritesStore` being dropped
/// and rebuilt, not a process restart.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Slot for MemorySlot {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Slot backed by one `{key}.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Slot for FileSlot {
    fn load(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn store(&mut self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(key), value)
    }
}

/// Insertion-ordered set of book ids. Each id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FavoriteSet {
    ids: Vec<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Returns `false` if `id` was already present.
    fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    /// Returns `false` if `id` was absent.
    fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }
}

impl From<Vec<String>> for FavoriteSet {
    fn from(ids: Vec<String>) -> Self {
        let mut set = FavoriteSet::new();
        for id in &ids {
            set.insert(id);
        }
        set
    }
}

impl From<FavoriteSet> for Vec<String> {
    fn from(set: FavoriteSet) -> Self {
        set.ids
    }
}

impl<S: AsRef<str>> FromIterator<S> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = FavoriteSet::new();
        for id in iter {
            set.insert(id.as_ref());
        }
        set
    }
}

/// Outcome of `FavoritesStore::toggle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub favorites: FavoriteSet,
    /// Membership of the toggled id after the call.
    pub is_favorite: bool,
}

/// Favorites persisted in a `Slot` under `FAVORITES_KEY`.
#[derive(Debug, Clone)]
pub struct FavoritesStore<S> {
    slot: S,
}

impl<S: Slot> FavoritesStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    pub fn into_slot(self) -> S {
        self.slot
    }

    /// Current favorites. Never fails: a missing, unreadable or corrupt slot
    /// reads as the empty set.
    pub fn all(&self) -> FavoriteSet {
        let raw = match self.slot.load(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return FavoriteSet::new(),
            Err(e) => {
                warn!(error = %e, "failed to read favorites slot, treating as empty");
                return FavoriteSet::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, "corrupt favorites slot, treating as empty");
                FavoriteSet::new()
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.all().contains(id)
    }

    /// Add `id`; no-op if already present.
    pub fn add(&mut self, id: &str) -> Result<FavoriteSet, FavoritesError> {
        let mut favorites = self.all();
        if favorites.insert(id) {
            self.persist(&favorites)?;
        }
        Ok(favorites)
    }

    /// Remove `id`; no-op if absent.
    pub fn remove(&mut self, id: &str) -> Result<FavoriteSet, FavoritesError> {
        let mut favorites = self.all();
        if favorites.remove(id) {
            self.persist(&favorites)?;
        }
        Ok(favorites)
    }

    /// Flip membership of `id` in a single read-modify-write.
    pub fn toggle(&mut self, id: &str) -> Result<Toggle, FavoritesError> {
        let mut favorites = self.all();
        let is_favorite = if favorites.contains(id) {
            favorites.remove(id);
            false
        } else {
            favorites.insert(id);
            true
        };
        self.persist(&favorites)?;
        Ok(Toggle {
            favorites,
            is_favorite,
        })
    }

    fn persist(&mut self, favorites: &FavoriteSet) -> Result<(), FavoritesError> {
        let encoded = serde_json::to_string(favorites)?;
        self.slot.store(FAVORITES_KEY, &encoded)?;
        Ok(())
    }
}
