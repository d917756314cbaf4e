// Persisted preference store
// Loaded from ~/.config/pipette/preferences.json (or $PIPETTE_CONFIG_DIR)

use crate::error::PrefsError;
use crate::preferences::{PreferenceKey, Preferences};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the directory holding preferences.json
pub const CONFIG_DIR_ENV: &str = "PIPETTE_CONFIG_DIR";

const FILE_NAME: &str = "preferences.json";

/// Handle returned by `observe`, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Box<dyn FnMut(PreferenceKey, &Value, &Value)>;

struct Observer {
    id: ObserverId,
    key: Option<PreferenceKey>,
    callback: Callback,
}

/// Preferences plus the file they persist to.
///
/// Every mutation writes through to disk before observers hear about it.
/// If the write fails the in-memory value is rolled back and the error returned.
pub struct PreferenceStore {
    path: Option<PathBuf>,
    prefs: Preferences,
    observers: Vec<Observer>,
    next_observer: u64,
}

impl PreferenceStore {
    /// Get the preferences file path
    pub fn config_path() -> PathBuf {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pipette"),
        };
        dir.join(FILE_NAME)
    }

    /// Open the store at the default location
    pub fn open_default() -> Result<Self, PrefsError> {
        Self::open(Self::config_path())
    }

    /// Open a store backed by `path`. A missing file means "all defaults";
    /// it is only created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let prefs = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| PrefsError::Io {
                path: path.clone(),
                message: e.to_string(),
            })?;
            log::debug!("Loading preferences from {}", path.display());
            Preferences::from_json_lenient(&contents)?
        } else {
            log::info!("No preferences at {}, using defaults", path.display());
            Preferences::default()
        };

        Ok(Self::with_preferences(Some(path), prefs))
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self::with_preferences(None, Preferences::default())
    }

    fn with_preferences(path: Option<PathBuf>, prefs: Preferences) -> Self {
        Self { path, prefs, observers: Vec::new(), next_observer: 0 }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn get(&self, key: PreferenceKey) -> Value {
        self.prefs.get(key)
    }

    pub fn set(&mut self, key: PreferenceKey, value: Value) -> Result<(), PrefsError> {
        let before = self.prefs.clone();
        self.prefs.set(key, value)?;
        self.commit(before)
    }

    pub fn reset(&mut self, key: PreferenceKey) -> Result<(), PrefsError> {
        let before = self.prefs.clone();
        self.prefs.reset(key);
        self.commit(before)
    }

    pub fn reset_all(&mut self) -> Result<(), PrefsError> {
        let before = self.prefs.clone();
        self.prefs.reset_all();
        self.commit(before)
    }

    /// Apply an arbitrary edit, then persist and notify once
    pub fn update<R>(&mut self, edit: impl FnOnce(&mut Preferences) -> R) -> Result<R, PrefsError> {
        let before = self.prefs.clone();
        let result = edit(&mut self.prefs);
        self.commit(before)?;
        Ok(result)
    }

    /// Replace every value, e.g. after an import
    pub fn replace(&mut self, prefs: Preferences) -> Result<(), PrefsError> {
        let before = std::mem::replace(&mut self.prefs, prefs);
        self.commit(before)
    }

    /// Register a callback for changes to `key`, or to every key when `None`.
    /// Called with `(key, old, new)` after the change is persisted.
    pub fn observe(
        &mut self,
        key: Option<PreferenceKey>,
        callback: impl FnMut(PreferenceKey, &Value, &Value) + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push(Observer { id, key, callback: Box::new(callback) });
        id
    }

    /// Returns false if the observer was already gone
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() != before
    }

    /// Write current preferences to disk (no-op for in-memory stores)
    pub fn save(&self) -> Result<(), PrefsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |e: std::io::Error| PrefsError::Io { path: path.clone(), message: e.to_string() };

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = self.prefs.to_json_pretty()?;
        fs::write(path, json).map_err(io_err)?;
        log::debug!("Saved preferences to {}", path.display());
        Ok(())
    }

    fn commit(&mut self, before: Preferences) -> Result<(), PrefsError> {
        // `update` and `replace` can leave the collections out of shape
        self.prefs.normalize();
        let changed = before.changed_keys(&self.prefs);
        if changed.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.save() {
            self.prefs = before;
            return Err(e);
        }

        for key in changed {
            let old = before.get(key);
            let new = self.prefs.get(key);
            log::info!("Preference {key} changed: {old} -> {new}");
            for observer in self.observers.iter_mut() {
                if observer.key.map_or(true, |k| k == key) {
                    (observer.callback)(key, &old, &new);
                }
            }
        }
        Ok(())
    }
}
