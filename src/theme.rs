//! Theme preference persisted under one storage key.
//!
//! Read once at startup, written on every toggle, removed when reverting to
//! the default. Storage failures are logged and swallowed: the theme still
//! flips in memory and rendering never waits on storage.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use log::warn;

use crate::error::StorageError;

pub const THEME_KEY: &str = "theme";
const OVERRIDE_VALUE: &str = "dark";

pub const DEFAULT_ICON: &str = "bi-moon-stars";
pub const OVERRIDE_ICON: &str = "bi-sun";

/// Client-local key/value store.
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that denies every operation.
    pub fn unavailable() -> Self {
        MemoryStorage {
            values: HashMap::new(),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage access denied",
            )));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.remove(key);
        Ok(())
    }
}

/// JSON object file. A missing file reads as empty.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        fs::write(&self.path, serde_json::to_string_pretty(values)?)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// No stored preference; follow the system/default theme.
    Default,
    /// Explicit override persisted in storage.
    Override,
}

pub struct ThemePreference<S: Storage> {
    storage: S,
    theme: Theme,
}

impl<S: Storage> ThemePreference<S> {
    /// Read the stored preference once.
    pub fn load(storage: S) -> Self {
        let theme = match storage.get(THEME_KEY) {
            Ok(Some(v)) if v == OVERRIDE_VALUE => Theme::Override,
            Ok(Some(v)) => {
                warn!("Ignoring unknown theme preference {:?}", v);
                Theme::Default
            }
            Ok(None) => Theme::Default,
            Err(e) => {
                warn!("Theme preference unreadable, using default: {}", e);
                Theme::Default
            }
        };
        ThemePreference { storage, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn icon(&self) -> &'static str {
        match self.theme {
            Theme::Default => DEFAULT_ICON,
            Theme::Override => OVERRIDE_ICON,
        }
    }

    /// Flip between default and override. The override only takes effect
    /// once it is stored; clearing always falls back to the default.
    pub fn toggle(&mut self) -> Theme {
        self.theme = match self.theme {
            Theme::Default => match self.storage.set(THEME_KEY, OVERRIDE_VALUE) {
                Ok(()) => Theme::Override,
                // no persisted override means the default theme
                Err(e) => {
                    warn!("Could not persist theme preference: {}", e);
                    Theme::Default
                }
            },
            Theme::Override => {
                if let Err(e) = self.storage.remove(THEME_KEY) {
                    warn!("Could not clear theme preference: {}", e);
                }
                Theme::Default
            }
        };
        self.theme
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
