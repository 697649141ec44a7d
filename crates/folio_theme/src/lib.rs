//! Folio Theme Runtime
//!
//! Presentation-mode state for the Folio library client: which of the two
//! interchangeable variants is active, how strong the glass effects are,
//! where those preferences are persisted, and which concrete component
//! implementation each screen should mount.
//!
//! # Overview
//!
//! - [`ThemeStore`]: owns [`ThemeState`] with validated setters, a one-way
//!   loading flag, change listeners and write-through persistence
//! - [`resolve_intensity`]: pure mapping from [`IntensityLevel`] to an
//!   [`IntensityParameterTable`]
//! - [`PersistenceAdapter`]: load/save boundary with key-value backends
//!   ([`MemoryStore`], [`TomlFileStore`])
//! - [`capability`]: per-variant component tables checked at compile time,
//!   mirrored by a string-keyed [`CapabilityRegistry`]
//!
//! # Quick Start
//!
//! ```rust
//! use folio_theme::{
//!     IntensityLevel, KeyValuePersistence, MemoryStore, PresentationVariant, ThemeDefaults,
//!     ThemeStore,
//! };
//!
//! let defaults = ThemeDefaults::new(PresentationVariant::Classic, IntensityLevel::Medium);
//! let storage = KeyValuePersistence::new(MemoryStore::new());
//! let mut store = ThemeStore::initialize(defaults, Some(Box::new(storage)));
//!
//! assert!(!store.is_loading());
//! store.toggle_variant();
//! assert_eq!(store.variant(), PresentationVariant::Glass);
//!
//! // Unknown ids are rejected and the previous value is kept
//! assert!(!store.set_intensity_named("invalid-value").is_applied());
//! assert_eq!(store.intensity(), IntensityLevel::Medium);
//! ```

pub mod capability;
pub mod config;
pub mod error;
pub mod intensity;
pub mod persistence;
pub mod state;
pub mod variant;

pub use capability::{
    registry, resolve, Capability, CapabilityRegistry, CapabilityTable, Component,
    ImplementationHandle, RenderContext, StyleHints, VariantPair, ViewNode, CAPABILITIES,
};
pub use config::ThemeConfig;
pub use error::{ConfigError, PersistenceError, ThemeError};
pub use intensity::{resolve as resolve_intensity, IntensityParameterTable};
pub use persistence::{
    KeyValuePersistence, KeyValueStore, MemoryStore, PersistedTheme, PersistenceAdapter,
    TomlFileStore, INTENSITY_KEY, VARIANT_KEY,
};
pub use state::{ThemeDefaults, ThemeState, ThemeStore, Update};
pub use variant::{IntensityLevel, PresentationVariant};
