//! File-backed cache storage.

use screener_types::{AttributeKind, AttributeMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during cache operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Failed to create the cache directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read a cache file.
    #[error("Failed to read cache file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a cache file.
    #[error("Failed to write cache file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to delete a cache file.
    #[error("Failed to delete cache file '{path}': {source}")]
    DeleteFile {
        /// The path that could not be deleted.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse a cache file.
    #[error("Failed to parse cache file '{path}': {source}")]
    ParseJson {
        /// The path that could not be parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Failed to serialize a cache.
    #[error("Failed to serialize cache: {0}")]
    SerializeJson(#[from] serde_json::Error),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Stores one JSON file per attribute kind under a base directory.
///
/// Entries never expire; a ticker stays cached until its file is cleared.
#[derive(Debug, Clone)]
pub struct CacheStore {
    base_path: PathBuf,
}

impl CacheStore {
    /// Creates a cache store rooted at `base_path`.
    ///
    /// The directory is created lazily on the first save.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Returns the base directory for cache files.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the path of a kind's cache file.
    #[must_use]
    pub fn path(&self, kind: AttributeKind) -> PathBuf {
        self.base_path.join(kind.cache_file_name())
    }

    /// Loads a kind's cache, treating any failure as a cold cache.
    ///
    /// A missing file yields an empty map. An unreadable or corrupt file is
    /// logged and also yields an empty map.
    #[must_use]
    pub fn load(&self, kind: AttributeKind) -> AttributeMap {
        match self.try_load(kind) {
            Ok(map) => map,
            Err(e) => {
                warn!("Error loading {kind} cache: {e}");
                AttributeMap::new()
            }
        }
    }

    /// Loads a kind's cache.
    ///
    /// Returns an empty map if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn try_load(&self, kind: AttributeKind) -> Result<AttributeMap> {
        let path = self.path(kind);

        if !path.exists() {
            debug!("No {kind} cache at {}", path.display());
            return Ok(AttributeMap::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| CacheError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        let map: AttributeMap = serde_json::from_str(&content)
            .map_err(|e| CacheError::ParseJson { path: path.clone(), source: e })?;

        debug!("Loaded {} cached {kind} entries from {}", map.len(), path.display());
        Ok(map)
    }

    /// Overwrites a kind's cache with `map`.
    ///
    /// The new contents are written to a sibling temporary file which is
    /// then renamed over the cache file, so readers never observe a
    /// partially written cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be serialized or written to disk.
    pub fn save(&self, kind: AttributeKind, map: &AttributeMap) -> Result<()> {
        if !self.base_path.as_os_str().is_empty() && !self.base_path.exists() {
            fs::create_dir_all(&self.base_path).map_err(|e| CacheError::CreateDir {
                path: self.base_path.clone(),
                source: e,
            })?;
        }

        let path = self.path(kind);
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(map)?;

        fs::write(&tmp_path, json).map_err(|e| CacheError::WriteFile {
            path: tmp_path.clone(),
            source: e,
        })?;

        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            CacheError::WriteFile {
                path: path.clone(),
                source: e,
            }
        })?;

        debug!("Saved {} {kind} entries to {}", map.len(), path.display());
        Ok(())
    }

    /// Deletes a kind's cache file.
    ///
    /// Returns `false` if there was nothing to delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self, kind: AttributeKind) -> Result<bool> {
        let path = self.path(kind);

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).map_err(|e| CacheError::DeleteFile { path, source: e })?;
        Ok(true)
    }
}

impl Default for CacheStore {
    /// A store in the current working directory.
    fn default() -> Self {
        Self::new(".")
    }
}
