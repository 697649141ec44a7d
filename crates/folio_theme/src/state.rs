//! Theme state store
//!
//! [`ThemeStore`] is an explicitly constructed object owned by the app root
//! and passed by reference to whatever reads or changes the theme. It is the
//! only writer of [`ThemeState`].
//!
//! Lifecycle:
//!
//! 1. [`ThemeStore::pending`] (or [`ThemeStore::initialize`], which also
//!    hydrates). With persistence enabled the store starts in the loading
//!    state and every setter is a no-op that returns [`Update::NotReady`].
//! 2. [`ThemeStore::hydrate`] / [`ThemeStore::complete_hydration`] apply any
//!    valid persisted values and clear the loading flag for good.
//! 3. Setters validate, apply, notify listeners and write through to the
//!    persistence adapter.
//! 4. [`ThemeStore::dispose`] drops listeners and the adapter.

use crate::error::ThemeError;
use crate::intensity::IntensityParameterTable;
use crate::persistence::{PersistedTheme, PersistenceAdapter};
use crate::variant::{IntensityLevel, PresentationVariant};
use folio_core::{ListenerId, Listeners};
use serde::{Deserialize, Serialize};

/// Snapshot of the theme runtime
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeState {
    pub variant: PresentationVariant,
    pub intensity: IntensityLevel,
    /// True only until the initial hydrate completes
    pub is_loading: bool,
}

impl ThemeState {
    /// Glass parameters for the current intensity
    pub fn parameters(&self) -> &'static IntensityParameterTable {
        self.intensity.parameters()
    }

    /// Glass parameters, only when the glass variant is active
    pub fn glass_parameters(&self) -> Option<&'static IntensityParameterTable> {
        self.variant.is_glass().then(|| self.parameters())
    }
}

/// Values supplied at initialization and restored by `reset_to_default`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDefaults {
    pub variant: PresentationVariant,
    pub intensity: IntensityLevel,
}

impl ThemeDefaults {
    pub fn new(variant: PresentationVariant, intensity: IntensityLevel) -> Self {
        Self { variant, intensity }
    }
}

/// Result of a setter call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Update {
    /// State changed and was written through
    Applied,
    /// Requested value was already active
    Unchanged,
    /// Input was not a recognized value; previous state kept
    Rejected(ThemeError),
    /// Called before hydration completed; ignored
    NotReady,
    /// Called after `dispose`; ignored
    Disposed,
}

impl Update {
    pub fn is_applied(&self) -> bool {
        matches!(self, Update::Applied)
    }
}

pub struct ThemeStore {
    defaults: ThemeDefaults,
    state: ThemeState,
    persistence: Option<Box<dyn PersistenceAdapter>>,
    listeners: Listeners<ThemeState>,
    /// Set on every observable change, cleared by the renderer
    needs_repaint: bool,
    disposed: bool,
}

impl ThemeStore {
    /// Create a store and hydrate it synchronously
    ///
    /// With `persistence = None` the state is `{defaults, is_loading: false}`
    /// immediately. Otherwise persisted values override the defaults where
    /// they are valid.
    pub fn initialize(
        defaults: ThemeDefaults,
        persistence: Option<Box<dyn PersistenceAdapter>>,
    ) -> Self {
        let mut store = Self::pending(defaults, persistence);
        store.hydrate();
        store
    }

    /// Create a store without reading storage yet
    ///
    /// Hosts that read storage on another task call
    /// [`complete_hydration`](Self::complete_hydration) with the result.
    pub fn pending(
        defaults: ThemeDefaults,
        persistence: Option<Box<dyn PersistenceAdapter>>,
    ) -> Self {
        let is_loading = persistence.is_some();
        tracing::debug!(
            "ThemeStore: created with {:?} (persistence {})",
            defaults,
            if is_loading { "enabled" } else { "disabled" }
        );

        Self {
            defaults,
            state: ThemeState {
                variant: defaults.variant,
                intensity: defaults.intensity,
                is_loading,
            },
            persistence,
            listeners: Listeners::new(),
            needs_repaint: true,
            disposed: false,
        }
    }

    /// Store without persistence
    pub fn in_memory(defaults: ThemeDefaults) -> Self {
        Self::pending(defaults, None)
    }

    /// Read the persistence adapter and finish loading
    ///
    /// Returns false if the store was not loading.
    pub fn hydrate(&mut self) -> bool {
        if !self.state.is_loading {
            return false;
        }
        let loaded = self
            .persistence
            .as_ref()
            .map(|adapter| adapter.load())
            .unwrap_or_default();
        self.complete_hydration(loaded)
    }

    /// Finish loading with values read elsewhere
    ///
    /// Only the first call while loading has any effect.
    pub fn complete_hydration(&mut self, loaded: PersistedTheme) -> bool {
        if self.disposed {
            tracing::warn!("ThemeStore: hydration delivered to a disposed store");
            return false;
        }
        if !self.state.is_loading {
            tracing::warn!("ThemeStore: hydration delivered to a store that is not loading");
            return false;
        }

        if let Some(variant) = loaded.variant {
            self.state.variant = variant;
        }
        if let Some(intensity) = loaded.intensity {
            self.state.intensity = intensity;
        }
        self.state.is_loading = false;

        tracing::debug!(
            "ThemeStore: hydrated to {} / {}",
            self.state.variant,
            self.state.intensity
        );
        self.changed();
        true
    }

    // ========== Reads ==========

    pub fn state(&self) -> ThemeState {
        self.state
    }

    pub fn variant(&self) -> PresentationVariant {
        self.state.variant
    }

    pub fn intensity(&self) -> IntensityLevel {
        self.state.intensity
    }

    /// While true the state is not yet authoritative
    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn parameters(&self) -> &'static IntensityParameterTable {
        self.state.parameters()
    }

    pub fn defaults(&self) -> ThemeDefaults {
        self.defaults
    }

    pub fn persistence_enabled(&self) -> bool {
        self.persistence.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ========== Setters ==========

    pub fn set_variant(&mut self, variant: PresentationVariant) -> Update {
        self.apply("set_variant", variant, self.state.intensity)
    }

    /// Set the variant from a stable id such as `"liquid-glass"`
    ///
    /// Unknown ids are rejected and the current variant is kept.
    pub fn set_variant_named(&mut self, raw: &str) -> Update {
        if let Some(update) = self.check_ready("set_variant") {
            return update;
        }
        match raw.parse::<PresentationVariant>() {
            Ok(variant) => self.set_variant(variant),
            Err(e) => self.reject("set_variant", e),
        }
    }

    pub fn set_intensity(&mut self, intensity: IntensityLevel) -> Update {
        self.apply("set_intensity", self.state.variant, intensity)
    }

    /// Set the intensity from a stable id such as `"heavy"`
    ///
    /// Unknown ids are rejected and the current intensity is kept.
    pub fn set_intensity_named(&mut self, raw: &str) -> Update {
        if let Some(update) = self.check_ready("set_intensity") {
            return update;
        }
        match raw.parse::<IntensityLevel>() {
            Ok(intensity) => self.set_intensity(intensity),
            Err(e) => self.reject("set_intensity", e),
        }
    }

    /// Switch to the other variant
    pub fn toggle_variant(&mut self) -> Update {
        self.apply(
            "toggle_variant",
            self.state.variant.toggle(),
            self.state.intensity,
        )
    }

    /// Restore both fields to the initialization defaults
    pub fn reset_to_default(&mut self) -> Update {
        self.apply(
            "reset_to_default",
            self.defaults.variant,
            self.defaults.intensity,
        )
    }

    fn check_ready(&self, op: &str) -> Option<Update> {
        if self.disposed {
            tracing::warn!("ThemeStore::{} ignored: store disposed", op);
            return Some(Update::Disposed);
        }
        if self.state.is_loading {
            tracing::warn!("ThemeStore::{} ignored: hydration not complete", op);
            return Some(Update::NotReady);
        }
        None
    }

    fn reject(&self, op: &str, error: ThemeError) -> Update {
        tracing::warn!(
            "ThemeStore::{} rejected: {}; keeping {} / {}",
            op,
            error,
            self.state.variant,
            self.state.intensity
        );
        Update::Rejected(error)
    }

    fn apply(
        &mut self,
        op: &str,
        variant: PresentationVariant,
        intensity: IntensityLevel,
    ) -> Update {
        if let Some(update) = self.check_ready(op) {
            return update;
        }
        if self.state.variant == variant && self.state.intensity == intensity {
            return Update::Unchanged;
        }

        tracing::debug!(
            "ThemeStore::{} - {} / {} -> {} / {}",
            op,
            self.state.variant,
            self.state.intensity,
            variant,
            intensity
        );
        self.state.variant = variant;
        self.state.intensity = intensity;

        if let Some(adapter) = self.persistence.as_mut() {
            adapter.save(&PersistedTheme::new(variant, intensity));
        }
        self.changed();
        Update::Applied
    }

    fn changed(&mut self) {
        self.needs_repaint = true;
        let state = self.state;
        self.listeners.notify(&state);
    }

    // ========== Listeners ==========

    /// Register a listener called with the new state after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&ThemeState) + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // ========== Dirty Flags ==========

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    pub fn clear_repaint(&mut self) {
        self.needs_repaint = false;
    }

    // ========== Teardown ==========

    /// Drop listeners and the persistence adapter; later setters are ignored
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        tracing::debug!("ThemeStore: disposed");
        self.listeners.clear();
        self.persistence = None;
        self.disposed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KeyValuePersistence, MemoryStore, INTENSITY_KEY, VARIANT_KEY};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn defaults() -> ThemeDefaults {
        ThemeDefaults::new(PresentationVariant::Classic, IntensityLevel::Medium)
    }

    fn persisted(store: &MemoryStore) -> Option<Box<dyn PersistenceAdapter>> {
        Some(Box::new(KeyValuePersistence::new(store.clone())))
    }

    #[test]
    fn test_initialize_without_persistence() {
        let store = ThemeStore::initialize(defaults(), None);
        assert_eq!(
            store.state(),
            ThemeState {
                variant: PresentationVariant::Classic,
                intensity: IntensityLevel::Medium,
                is_loading: false,
            }
        );
    }

    #[test]
    fn test_pending_store_ignores_setters_until_hydrated() {
        let memory = MemoryStore::new();
        let mut store = ThemeStore::pending(defaults(), persisted(&memory));

        assert!(store.is_loading());
        assert_eq!(store.toggle_variant(), Update::NotReady);
        assert_eq!(store.set_intensity_named("heavy"), Update::NotReady);
        assert_eq!(store.variant(), PresentationVariant::Classic);
        assert!(memory.is_empty());

        assert!(store.hydrate());
        assert!(!store.is_loading());
        assert_eq!(store.toggle_variant(), Update::Applied);
    }

    #[test]
    fn test_loading_never_returns() {
        let memory = MemoryStore::new();
        let mut store = ThemeStore::initialize(defaults(), persisted(&memory));

        assert!(!store.hydrate());
        assert!(!store.complete_hydration(PersistedTheme::new(
            PresentationVariant::Glass,
            IntensityLevel::Extreme
        )));
        assert!(!store.is_loading());
        assert_eq!(store.variant(), PresentationVariant::Classic);
    }

    #[test]
    fn test_hydrate_applies_only_valid_fields() {
        let memory = MemoryStore::new();
        memory.insert_raw(VARIANT_KEY, "liquid-glass");
        memory.insert_raw(INTENSITY_KEY, "blinding");

        let store = ThemeStore::initialize(defaults(), persisted(&memory));
        assert_eq!(store.variant(), PresentationVariant::Glass);
        assert_eq!(store.intensity(), IntensityLevel::Medium);
    }

    #[test]
    fn test_invalid_intensity_keeps_previous_value() {
        let mut store = ThemeStore::initialize(defaults(), None);
        let before = store.state();

        let update = store.set_intensity_named("invalid-value");
        assert_eq!(
            update,
            Update::Rejected(ThemeError::UnknownIntensity("invalid-value".into()))
        );
        assert_eq!(store.state(), before);
    }

    #[test]
    fn test_write_through_on_every_applied_change() {
        let memory = MemoryStore::new();
        let mut store = ThemeStore::initialize(defaults(), persisted(&memory));

        store.set_intensity(IntensityLevel::Heavy);
        assert_eq!(memory.raw(INTENSITY_KEY).as_deref(), Some("heavy"));
        assert_eq!(memory.raw(VARIANT_KEY).as_deref(), Some("classic"));

        store.toggle_variant();
        assert_eq!(memory.raw(VARIANT_KEY).as_deref(), Some("liquid-glass"));
    }

    #[test]
    fn test_unchanged_does_not_notify() {
        let mut store = ThemeStore::initialize(defaults(), None);
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        assert_eq!(
            store.set_variant(PresentationVariant::Classic),
            Update::Unchanged
        );
        assert_eq!(*calls.borrow(), 0);

        store.set_variant(PresentationVariant::Glass);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let memory = MemoryStore::new();
        let mut store = ThemeStore::initialize(defaults(), persisted(&memory));

        memory.set_available(false);
        assert_eq!(store.set_intensity(IntensityLevel::Light), Update::Applied);
        assert_eq!(store.intensity(), IntensityLevel::Light);
    }

    #[test]
    fn test_reset_to_default() {
        let mut store = ThemeStore::initialize(defaults(), None);
        store.set_variant(PresentationVariant::Glass);
        store.set_intensity(IntensityLevel::Whisper);

        assert_eq!(store.reset_to_default(), Update::Applied);
        assert_eq!(store.variant(), PresentationVariant::Classic);
        assert_eq!(store.intensity(), IntensityLevel::Medium);
    }

    #[test]
    fn test_dispose_stops_updates_and_listeners() {
        let mut store = ThemeStore::initialize(defaults(), None);
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.dispose();
        assert_eq!(store.toggle_variant(), Update::Disposed);
        assert_eq!(*calls.borrow(), 0);
        assert!(!store.persistence_enabled());
    }

    #[test]
    fn test_repaint_flag() {
        let mut store = ThemeStore::initialize(defaults(), None);
        assert!(store.needs_repaint());
        store.clear_repaint();

        store.set_intensity(IntensityLevel::Extreme);
        assert!(store.needs_repaint());
    }
}
