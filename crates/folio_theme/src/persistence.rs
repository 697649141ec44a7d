//! Preference persistence
//!
//! Two layers:
//!
//! - [`KeyValueStore`]: raw string storage that may fail ([`MemoryStore`],
//!   [`TomlFileStore`])
//! - [`PersistenceAdapter`]: the boundary the [`ThemeStore`](crate::ThemeStore)
//!   talks to. It never fails: unreadable or invalid fields are omitted on
//!   load and write errors are logged on save.

use crate::error::PersistenceError;
use crate::variant::{IntensityLevel, PresentationVariant};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;

/// Storage key for the active presentation variant
pub const VARIANT_KEY: &str = "ui-variant";

/// Storage key for the glass intensity level
pub const INTENSITY_KEY: &str = "glass-intensity";

/// Raw string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Write several entries. Backends with expensive writes override this.
    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<(), PersistenceError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// In-process key-value map
///
/// Clones share the same map, so a test can keep a handle to storage that a
/// store owns. [`MemoryStore::set_available`] simulates disabled storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug)]
struct MemoryInner {
    entries: FxHashMap<String, String>,
    available: bool,
}

impl Default for MemoryInner {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
            available: true,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every read and write
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.set_available(false);
        store
    }

    pub fn set_available(&self, available: bool) {
        self.inner.borrow_mut().available = available;
    }

    /// Write a raw value, bypassing availability (used to seed corrupt data)
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    /// Read a raw value, bypassing availability
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let inner = self.inner.borrow();
        if !inner.available {
            return Err(PersistenceError::Unavailable("memory store disabled".into()));
        }
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.available {
            return Err(PersistenceError::Unavailable("memory store disabled".into()));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A single TOML file of string keys and values
///
/// ```toml
/// ui-variant = "liquid-glass"
/// glass-intensity = "heavy"
/// ```
///
/// Writes go to a sibling temp file which is then renamed over the target.
#[derive(Clone, Debug)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string(entries)?;
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for TomlFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.set_all(&[(key, value)])
    }

    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<(), PersistenceError> {
        // A corrupt file is replaced rather than blocking every future save
        let mut current = match self.read_all() {
            Ok(current) => current,
            Err(PersistenceError::Corrupt(e)) => {
                tracing::warn!("TomlFileStore: overwriting corrupt {:?}: {}", self.path, e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        for (key, value) in entries {
            current.insert((*key).to_string(), (*value).to_string());
        }
        self.write_all(&current)
    }
}

/// The persisted subset of theme state. Missing or invalid fields are `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PersistedTheme {
    pub variant: Option<PresentationVariant>,
    pub intensity: Option<IntensityLevel>,
}

impl PersistedTheme {
    pub fn new(variant: PresentationVariant, intensity: IntensityLevel) -> Self {
        Self {
            variant: Some(variant),
            intensity: Some(intensity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.variant.is_none() && self.intensity.is_none()
    }
}

/// Load/save boundary used by the theme store
pub trait PersistenceAdapter {
    /// Read persisted preferences. Never fails; problems yield `None` fields.
    fn load(&self) -> PersistedTheme;

    /// Best-effort write. Failures are logged, never propagated.
    fn save(&mut self, theme: &PersistedTheme);
}

/// [`PersistenceAdapter`] over any [`KeyValueStore`]
#[derive(Clone, Debug)]
pub struct KeyValuePersistence<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValuePersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read_field<T>(&self, key: &str) -> Option<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.store.get(key) {
            Ok(Some(raw)) => match raw.parse() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("ignoring persisted {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("failed to read persisted {}: {}", key, e);
                None
            }
        }
    }
}

impl<S: KeyValueStore> PersistenceAdapter for KeyValuePersistence<S> {
    fn load(&self) -> PersistedTheme {
        PersistedTheme {
            variant: self.read_field(VARIANT_KEY),
            intensity: self.read_field(INTENSITY_KEY),
        }
    }

    fn save(&mut self, theme: &PersistedTheme) {
        let mut entries: Vec<(&str, &str)> = Vec::with_capacity(2);
        if let Some(variant) = theme.variant {
            entries.push((VARIANT_KEY, variant.id()));
        }
        if let Some(intensity) = theme.intensity {
            entries.push((INTENSITY_KEY, intensity.id()));
        }
        if entries.is_empty() {
            return;
        }

        match self.store.set_all(&entries) {
            Ok(()) => tracing::debug!("persisted theme preferences {:?}", theme),
            Err(e) => tracing::warn!("failed to persist theme preferences: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut adapter = KeyValuePersistence::new(MemoryStore::new());
        let theme = PersistedTheme::new(PresentationVariant::Glass, IntensityLevel::Heavy);

        adapter.save(&theme);
        assert_eq!(adapter.load(), theme);
    }

    #[test]
    fn test_load_empty_store() {
        let adapter = KeyValuePersistence::new(MemoryStore::new());
        assert!(adapter.load().is_empty());
    }

    #[test]
    fn test_invalid_fields_are_omitted_independently() {
        let store = MemoryStore::new();
        store.insert_raw(VARIANT_KEY, "neon");
        store.insert_raw(INTENSITY_KEY, "light");

        let adapter = KeyValuePersistence::new(store);
        assert_eq!(
            adapter.load(),
            PersistedTheme {
                variant: None,
                intensity: Some(IntensityLevel::Light),
            }
        );
    }

    #[test]
    fn test_unavailable_store_degrades() {
        let store = MemoryStore::unavailable();
        let mut adapter = KeyValuePersistence::new(store.clone());

        adapter.save(&PersistedTheme::new(
            PresentationVariant::Glass,
            IntensityLevel::Light,
        ));
        assert!(adapter.load().is_empty());
        assert!(store.is_empty());
    }
}
