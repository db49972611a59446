//! Search history and favorites, persisted as JSON arrays of city names.

use tracing::warn;

use crate::store::{KeyValueStore, StoreError};

pub const HISTORY_KEY: &str = "history";
pub const FAVORITES_KEY: &str = "fav";

/// Ordered, duplicate-free city lists kept in a [`KeyValueStore`].
///
/// Entries are compared by exact, case-sensitive match. The search history
/// only ever grows: entries are appended in first-seen order and never
/// pruned. Favorites can also be removed.
#[derive(Debug)]
pub struct HistoryStore {
    store: Box<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persisted search history; empty when absent or malformed.
    pub fn load(&self) -> Vec<String> {
        self.read_list(HISTORY_KEY)
    }

    /// Append `city` unless already present. Returns whether it was added.
    pub fn add(&mut self, city: &str) -> Result<bool, StoreError> {
        self.insert(HISTORY_KEY, city)
    }

    pub fn favorites(&self) -> Vec<String> {
        self.read_list(FAVORITES_KEY)
    }

    /// Surrounding whitespace in `city` is ignored.
    pub fn add_favorite(&mut self, city: &str) -> Result<bool, StoreError> {
        self.insert(FAVORITES_KEY, city.trim())
    }

    /// Returns whether `city` was a favorite. Surrounding whitespace in
    /// `city` is ignored.
    pub fn remove_favorite(&mut self, city: &str) -> Result<bool, StoreError> {
        let city = city.trim();
        let mut favorites = self.read_list(FAVORITES_KEY);
        let before = favorites.len();
        favorites.retain(|c| c != city);

        if favorites.len() == before {
            return Ok(false);
        }

        self.write_list(FAVORITES_KEY, &favorites)?;
        Ok(true)
    }

    fn insert(&mut self, key: &str, city: &str) -> Result<bool, StoreError> {
        let mut list = self.read_list(key);
        if list.iter().any(|c| c == city) {
            return Ok(false);
        }

        list.push(city.to_string());
        self.write_list(key, &list)?;
        Ok(true)
    }

    fn read_list(&self, key: &str) -> Vec<String> {
        let raw = match self.store.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(key, error = %err, "failed to read stored list");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(key, error = %err, "ignoring malformed stored list");
            Vec::new()
        })
    }

    fn write_list(&mut self, key: &str, list: &[String]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(list)?;
        self.store.save(key, encoded)
    }
}
