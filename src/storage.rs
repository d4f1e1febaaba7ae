//! The key-value persistence layer behind `DebtStore`.
//!
//! Each value is stored as text under a fixed key. `FileStorage` keeps every key in one JSON file
//! and rewrites it on each `set`; `MemoryStorage` keeps them in a `HashMap`.

use crate::{utils, Result};
use anyhow::Context;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::trace;

/// A synchronous key-value store of text values.
pub trait Storage {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

impl<S> Storage for &mut S
where
    S: Storage + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        (**self).set(key, value)
    }
}

/// An implementation of `Storage` that holds everything in memory and persists nothing.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct MemoryStorage {
    data: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys that have been set.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }
}

/// An implementation of `Storage` backed by a single JSON object file, e.g.
/// ```json
/// {
///   "debts": "[]",
///   "payoffMethod": "\"snowball\""
/// }
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStorage {
    path: PathBuf,
    data: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the storage file at `path`. A missing file is treated as empty storage and is only
    /// created on the first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match utils::read_if_exists(&path)? {
            None => BTreeMap::new(),
            Some(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse storage file at {}", path.display()))?,
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, data: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("Unable to serialize storage")?;
        utils::write(&self.path, json).context("Unable to write storage file")
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        trace!("set {key} in {}", self.path.display());
        let mut data = self.data.clone();
        data.insert(key.to_string(), value);
        self.save(&data)?;
        self.data = data;
        Ok(())
    }
}
