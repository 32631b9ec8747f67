use crossbeam_channel::Receiver;

use crate::preference::error::PreferenceError;
use crate::reactive::observable::{Observable, ObserverId};
use crate::shared::constants::DARK_MODE_KEY;
use crate::storage::domain::key_value_store::KeyValueStore;

/// Holds the dark mode flag and mirrors it into durable storage.
///
/// The flag is seeded from the `"dark"` key at construction and changes only
/// through [`toggle_dark_mode`](Self::toggle_dark_mode). Storage keeps a
/// JSON-encoded copy (`"true"` / `"false"`); the in-memory value is the
/// source of truth and may run ahead of storage if a write fails.
///
/// The host constructs one instance and hands it to whatever renders the
/// theme. Nothing here is global.
pub struct DarkModeStore<S: KeyValueStore> {
    is_dark_mode_on: Observable<bool>,
    storage: S,
}

impl<S: KeyValueStore> DarkModeStore<S> {
    /// Seeds the flag from storage.
    ///
    /// An absent key or an empty stored string yields `false`. Any other value that is not a JSON
    /// boolean fails with [`PreferenceError::Parse`].
    pub fn load(storage: S) -> Result<Self, PreferenceError> {
        let initial = read_flag(&storage)?;
        log::debug!("Dark mode loaded: {initial}");
        Ok(Self::with_value(storage, initial))
    }

    /// Like [`load`](Self::load), but a malformed stored value seeds `false`
    /// instead of failing. The malformed value stays in storage until the
    /// next toggle overwrites it.
    pub fn load_or_default(storage: S) -> Result<Self, PreferenceError> {
        let initial = match read_flag(&storage) {
            Ok(value) => value,
            Err(PreferenceError::Parse { key, source }) => {
                log::warn!("Ignoring malformed '{key}' preference ({source}); using light mode");
                false
            }
            Err(e) => return Err(e),
        };
        log::debug!("Dark mode loaded: {initial}");
        Ok(Self::with_value(storage, initial))
    }

    fn with_value(storage: S, initial: bool) -> Self {
        Self {
            is_dark_mode_on: Observable::new(initial),
            storage,
        }
    }

    pub fn is_dark_mode_on(&self) -> bool {
        *self.is_dark_mode_on.get()
    }

    /// Flips the flag, notifies observers, then persists the new value.
    ///
    /// On [`PreferenceError::StorageWrite`] the flag stays flipped and
    /// observers have already seen the new value.
    pub fn toggle_dark_mode(&mut self) -> Result<(), PreferenceError> {
        let next = !self.is_dark_mode_on();
        self.is_dark_mode_on.set(next);
        log::debug!("Dark mode toggled: {next}");

        let encoded = serde_json::Value::Bool(next).to_string();
        self.storage
            .set(DARK_MODE_KEY, &encoded)
            .map_err(|e| PreferenceError::StorageWrite {
                key: DARK_MODE_KEY.to_string(),
                source: e,
            })
    }

    /// Registers a callback run synchronously after every change.
    pub fn observe(&mut self, observer: impl FnMut(&bool) + Send + 'static) -> ObserverId {
        self.is_dark_mode_on.subscribe(observer)
    }

    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.is_dark_mode_on.unsubscribe(id)
    }

    /// Returns a channel that receives the flag after every change.
    pub fn watch(&mut self) -> Receiver<bool> {
        self.is_dark_mode_on.watch()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

fn read_flag<S: KeyValueStore>(storage: &S) -> Result<bool, PreferenceError> {
    let raw = storage
        .get(DARK_MODE_KEY)
        .map_err(|e| PreferenceError::StorageRead {
            key: DARK_MODE_KEY.to_string(),
            source: e,
        })?;

    match raw {
        None => Ok(false),
        Some(raw) if raw.is_empty() => Ok(false),
        Some(raw) => serde_json::from_str(&raw).map_err(|e| PreferenceError::Parse {
            key: DARK_MODE_KEY.to_string(),
            source: e,
        }),
    }
}
