//! Variant component resolution
//!
//! Every UI role a screen can mount (a book card, the search box, ...) is a
//! [`Capability`] with exactly one `Props` type. Both presentation variants
//! implement [`Component`] for that capability, so their prop contracts
//! cannot diverge. The [`CAPABILITIES`] table is generated by the
//! `capabilities!` macro with one [`VariantPair`] per capability; leaving out
//! an implementation is a compile error.
//!
//! ```rust
//! use folio_theme::capability::{resolve, BookCard, BookCardProps, RenderContext};
//! use folio_theme::{IntensityLevel, PresentationVariant};
//!
//! let cx = RenderContext::new(PresentationVariant::Glass, IntensityLevel::Heavy);
//! let card = resolve::<BookCard>(cx.variant);
//! let node = card.render(&BookCardProps::new("Dune", "Frank Herbert"), &cx);
//! assert_eq!(node.capability, "BookCard");
//! assert!(node.style.blur_radius > 0.0);
//! ```
//!
//! For name-based lookups (routing tables, debugging tools) the table is
//! mirrored by a string-keyed [`CapabilityRegistry`], see [`registry`].

use crate::variant::PresentationVariant;

/// A named UI role with a single prop contract shared by both variants
pub trait Capability: 'static {
    const NAME: &'static str;
    type Props;
}

/// One variant's implementation of capability `C`
pub trait Component<C: Capability>: Sync {
    /// Stable implementation name, unique across the table
    fn implementation(&self) -> &'static str;

    fn render(&self, props: &C::Props, cx: &RenderContext) -> ViewNode;
}

/// The two implementations of one capability
pub struct VariantPair<C: Capability> {
    pub classic: &'static dyn Component<C>,
    pub glass: &'static dyn Component<C>,
}

impl<C: Capability> Clone for VariantPair<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Capability> Copy for VariantPair<C> {}

impl<C: Capability> VariantPair<C> {
    /// Implementation for `variant`; always the same reference for the same input
    pub fn resolve(&self, variant: PresentationVariant) -> &'static dyn Component<C> {
        match variant {
            PresentationVariant::Classic => self.classic,
            PresentationVariant::Glass => self.glass,
        }
    }

    pub fn handle(&self, variant: PresentationVariant) -> ImplementationHandle {
        ImplementationHandle {
            capability: C::NAME,
            variant,
            implementation: self.resolve(variant).implementation(),
        }
    }
}

/// Capabilities that have an entry in [`CAPABILITIES`]
pub trait Registered: Capability + Sized {
    fn pair() -> &'static VariantPair<Self>;
}

/// Implementation of capability `C` for `variant`
pub fn resolve<C: Registered>(variant: PresentationVariant) -> &'static dyn Component<C> {
    C::pair().resolve(variant)
}

/// Build the static capability table
///
/// Each entry names the table field, the capability type, and the classic
/// and glass implementations.
macro_rules! capabilities {
    ($(
        $field:ident : $cap:ty => { classic: $classic:expr, glass: $glass:expr $(,)? }
    ),* $(,)?) => {
        /// Every capability with its classic and glass implementation
        pub struct CapabilityTable {
            $( pub $field: $crate::capability::VariantPair<$cap>, )*
        }

        /// The application's capability table, fixed at compile time
        pub static CAPABILITIES: CapabilityTable = CapabilityTable {
            $(
                $field: $crate::capability::VariantPair {
                    classic: &$classic,
                    glass: &$glass,
                },
            )*
        };

        impl CapabilityTable {
            /// Capability names in declaration order
            pub const NAMES: &'static [&'static str] =
                &[$( <$cap as $crate::capability::Capability>::NAME ),*];

            pub(crate) fn build_registry(&self) -> $crate::capability::CapabilityRegistry {
                let mut registry = $crate::capability::CapabilityRegistry::new();
                $( registry.insert_pair(&self.$field); )*
                registry
            }
        }

        $(
            impl $crate::capability::Registered for $cap {
                fn pair() -> &'static $crate::capability::VariantPair<Self> {
                    &CAPABILITIES.$field
                }
            }
        )*
    };
}

mod components;
mod registry;
mod view;

pub use components::*;
pub use registry::{registry, CapabilityRegistry, ImplementationHandle};
pub use view::{RenderContext, StyleHints, ViewNode};
