//! Durable key→label store backing the geocode cache.
//!
//! A single JSON object in one file, loaded at open and rewritten
//! after each new entry. A corrupt file degrades to an empty cache
//! rather than aborting startup. A single run owns the file for the
//! run's duration; concurrent runs against the same file are out of
//! scope.

use crate::error::CacheError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File-backed map of rounded-coordinate keys to location labels
pub struct GeocodeStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl GeocodeStore {
    /// Load the store from `path`, creating parent directories.
    ///
    /// A missing file starts empty; an unreadable or corrupt file
    /// degrades to empty with a warning.
    pub fn open(path: &Path) -> Result<Self, CacheError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CacheError::OpenFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let entries = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt geocode cache; starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// An in-memory store that never touches disk
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            entries: HashMap::new(),
        }
    }

    /// Cached label for a key, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert a new entry and persist the whole map
    pub fn insert(&mut self, key: String, label: String) -> Result<(), CacheError> {
        self.entries.insert(key, label);
        self.persist()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) -> Result<(), CacheError> {
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            CacheError::WriteFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            }
        })?;

        fs::write(&self.path, json).map_err(|e| CacheError::WriteFailed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}
