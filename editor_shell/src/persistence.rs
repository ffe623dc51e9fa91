//! Shell state persistence
//!
//! The shell keeps three pieces of state across restarts: the tree, the
//! active file path, and the UI configuration. Each lives under its own
//! key; a [`StateStore`] maps keys to raw bytes and nothing more. What
//! the bytes mean — and whether they can be trusted — is the session's
//! concern, so a corrupt value in one key never takes down the others.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Keys the shell persists its state under.
pub mod keys {
    /// The serialized tree.
    pub const TREE: &str = "root";
    /// The active file path, or JSON `null` when no file is open.
    pub const ACTIVE_FILE: &str = "active-file";
    /// Sidetab configuration.
    pub const UI_CONFIG: &str = "ui-config";
}

/// Errors raised by a state store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    /// Session state could not be encoded for storage.
    #[error("state encoding failed: {0}")]
    Encode(String),
}

/// Raw keyed byte storage for shell state.
pub trait StateStore {
    /// Loads the bytes stored under `key`, or `None` if nothing is.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `bytes` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStateStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
#[derive(Debug)]
pub struct DirStateStore {
    dir: PathBuf,
}

impl DirStateStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Where `key` lives on disk.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for DirStateStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        fs::write(self.path_for(key), bytes)?;
        Ok(())
    }
}
