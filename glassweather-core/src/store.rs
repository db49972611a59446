//! Persistent key/value storage.
//!
//! Values are plain strings, the way browser local storage holds them;
//! callers decide how to encode structured data.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Debug,
    fs, io,
    path::PathBuf,
};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read store file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write store file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode store contents: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait KeyValueStore: Send + Debug {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Persists `value` under `key` before returning.
    fn save(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Key/value store backed by a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing or unreadable-as-JSON file is an empty store; it is
    /// replaced on the next save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => parse_entries(&contents).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "ignoring malformed store file");
                BTreeMap::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        Ok(Self { path, entries })
    }

    /// Writes a sibling temp file and renames it over the store.
    fn flush(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let contents = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), "store flushed");
        Ok(())
    }
}

/// Non-string values are kept as their JSON text.
fn parse_entries(contents: &str) -> serde_json::Result<BTreeMap<String, String>> {
    let raw: BTreeMap<String, Value> = serde_json::from_str(contents)?;

    Ok(raw
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect())
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

/// In-memory store; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
