//! Folio Effect Scheduler
//!
//! Ephemeral, interaction-triggered visual effects (ripples, fog droplets,
//! shimmer sweeps) for glass surfaces.
//!
//! Each mounted [`EffectSurface`] owns:
//!
//! - a [`TriggerController`] turning pointer events into spawn requests,
//!   throttled per pointer-move stream
//! - an [`EffectRegistry`] capped at `max_instances` with FIFO eviction, where
//!   every instance carries a cancellable expiration timer
//! - the Auto-mode interval, when the surface spawns ambient effects
//!
//! Time is always passed in explicitly, so the host drives the surface from
//! its own event loop and tests drive it with fixed timestamps.
//!
//! # Example
//!
//! ```rust
//! use folio_core::PointerEvent;
//! use folio_effects::{Bounds, EffectConfig, EffectSurface};
//! use folio_theme::{resolve_intensity, IntensityLevel};
//!
//! let bounds = Bounds::new(200.0, 120.0);
//! let mut surface = EffectSurface::seeded(EffectConfig::ripple(), bounds, 0, 1)?;
//!
//! surface.handle_pointer(&PointerEvent::enter(10.0, 10.0, 0));
//! assert!(surface.handle_pointer(&PointerEvent::moved(12.0, 10.0, 16)).is_some());
//! // Inside the throttle window
//! assert!(surface.handle_pointer(&PointerEvent::moved(14.0, 10.0, 32)).is_none());
//!
//! let frame = surface.frame(100, resolve_intensity(IntensityLevel::Medium));
//! assert_eq!(frame.len(), 1);
//!
//! surface.dispose();
//! assert_eq!(surface.pending_timers(), 0);
//! # Ok::<(), folio_effects::EffectError>(())
//! ```

pub mod config;
pub mod easing;
pub mod error;
pub mod instance;
pub mod registry;
pub mod surface;
pub mod trigger;

pub use config::{EffectConfig, MagnitudeRange, DEFAULT_AUTO_INTERVAL_MS, DEFAULT_THROTTLE_MS};
pub use easing::Easing;
pub use error::EffectError;
pub use instance::{EffectId, EffectInstance, EffectKind};
pub use registry::EffectRegistry;
pub use surface::{Bounds, EffectSurface, RenderedEffect, TickReport};
pub use trigger::{SpawnRequest, TriggerController, TriggerMode, TriggerSource};
