use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::shared::constants::{APP_DIR_NAME, STORE_FILE_NAME};
use crate::storage::domain::key_value_store::{KeyValueStore, StorageError};

/// Key-value store persisted as a single JSON object on disk.
///
/// Every value is stored as a JSON string, so a persisted flag looks like
/// `{"dark": "true"}`. The file is read on every access and rewritten on
/// every write; unrelated keys in the same file are preserved.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Opens a store at `path`. The file is not touched until first access.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the store at [`default_path`](Self::default_path).
    pub fn open_default() -> Result<Self, StorageError> {
        Self::default_path().map(Self::open)
    }

    /// Platform-specific preference file location.
    ///
    /// - macOS: `~/Library/Application Support/Darkmode/preferences.json`
    /// - Linux: `$XDG_CONFIG_HOME/Darkmode/preferences.json` or `~/.config/Darkmode/preferences.json`
    /// - Windows: `%APPDATA%/Darkmode/preferences.json`
    pub fn default_path() -> Result<PathBuf, StorageError> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR_NAME).join(STORE_FILE_NAME))
            .ok_or(StorageError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&json).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(StorageError::Serialize)?;

        // Write to a temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("part");
        let mut file = fs::File::create(&temp_path).map_err(|e| self.io_error(&temp_path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| self.io_error(&temp_path, e))?;
        file.flush().map_err(|e| self.io_error(&temp_path, e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            self.io_error(&self.path, e)
        })
    }

    fn io_error(&self, path: &Path, source: io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)?;
        log::trace!("Wrote '{key}' to {}", self.path.display());
        Ok(())
    }
}
