//! String-keyed capability lookup

use super::{Capability, VariantPair, CAPABILITIES};
use crate::error::ThemeError;
use crate::variant::PresentationVariant;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

static REGISTRY: OnceLock<CapabilityRegistry> = OnceLock::new();

/// The registry mirroring [`CAPABILITIES`], built on first use
pub fn registry() -> &'static CapabilityRegistry {
    REGISTRY.get_or_init(|| CAPABILITIES.build_registry())
}

/// Identifies one concrete implementation of a capability
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImplementationHandle {
    pub capability: &'static str,
    pub variant: PresentationVariant,
    pub implementation: &'static str,
}

/// Capability name x variant -> implementation handle
#[derive(Clone, Debug, Default)]
pub struct CapabilityRegistry {
    entries: FxHashMap<&'static str, [ImplementationHandle; 2]>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_pair<C: Capability>(&mut self, pair: &VariantPair<C>) {
        self.entries.insert(
            C::NAME,
            [
                pair.handle(PresentationVariant::Classic),
                pair.handle(PresentationVariant::Glass),
            ],
        );
    }

    /// Add a capability at runtime
    ///
    /// The built-in table never needs this; it exists for hosts that mount
    /// extra screens.
    pub fn register(
        &mut self,
        capability: &'static str,
        classic: &'static str,
        glass: &'static str,
    ) -> Result<(), ThemeError> {
        if self.entries.contains_key(capability) {
            return Err(ThemeError::DuplicateCapability(capability.to_string()));
        }
        let handle = |variant, implementation| ImplementationHandle {
            capability,
            variant,
            implementation,
        };
        self.entries.insert(
            capability,
            [
                handle(PresentationVariant::Classic, classic),
                handle(PresentationVariant::Glass, glass),
            ],
        );
        Ok(())
    }

    /// Implementation handle for `capability` under `variant`
    ///
    /// An unknown capability means a screen was built against a component
    /// that has no implementation; that is reported as an error, never
    /// papered over with a fallback.
    pub fn resolve(
        &self,
        capability: &str,
        variant: PresentationVariant,
    ) -> Result<ImplementationHandle, ThemeError> {
        match self.entries.get(capability) {
            Some(pair) => Ok(pair[variant.index()]),
            None => {
                tracing::error!("no implementation registered for capability {capability:?}");
                Err(ThemeError::MissingCapability(capability.to_string()))
            }
        }
    }

    pub fn contains(&self, capability: &str) -> bool {
        self.entries.contains_key(capability)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::CapabilityTable;

    #[test]
    fn test_registry_mirrors_table() {
        let registry = registry();
        assert_eq!(registry.len(), CapabilityTable::NAMES.len());
        for name in CapabilityTable::NAMES {
            assert!(registry.contains(name), "{name}");
        }
    }

    #[test]
    fn test_unknown_capability_fails_fast() {
        assert_eq!(
            registry().resolve("Carousel", PresentationVariant::Glass),
            Err(ThemeError::MissingCapability("Carousel".into()))
        );
    }

    #[test]
    fn test_register_extension_point() {
        let mut registry = CapabilityRegistry::new();
        registry
            .register("Carousel", "ClassicCarousel", "GlassCarousel")
            .unwrap();

        let handle = registry
            .resolve("Carousel", PresentationVariant::Glass)
            .unwrap();
        assert_eq!(handle.implementation, "GlassCarousel");
        assert_eq!(
            registry.register("Carousel", "A", "B"),
            Err(ThemeError::DuplicateCapability("Carousel".into()))
        );
    }
}
