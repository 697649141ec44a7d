//! Mounted effect surface
//!
//! An [`EffectSurface`] owns everything one interactive area schedules: its
//! trigger controller, its registry with the per-instance expiration timers,
//! and the Auto-mode interval. Nothing is shared between surfaces.
//!
//! Teardown stops the triggers first and then clears the registry, so no
//! trigger can add to a registry that is being emptied. Dropping a surface
//! disposes it.

use crate::config::EffectConfig;
use crate::error::EffectError;
use crate::instance::{EffectId, EffectInstance};
use crate::registry::EffectRegistry;
use crate::trigger::{SpawnRequest, TriggerController, TriggerMode, TriggerSource};
use folio_core::{PointerEvent, TimerId, TimerQueue, Timestamp};
use folio_theme::IntensityParameterTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Surface size in surface-local pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }

    pub fn validate(&self) -> Result<(), EffectError> {
        let usable = |side: f32| side.is_finite() && side >= 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(EffectError::InvalidBounds {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// An instance ready to draw
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedEffect {
    pub instance: EffectInstance,
    /// Eased lifetime progress (0.0 fresh, 1.0 gone)
    pub progress: f32,
    pub opacity: f32,
}

/// What a [`EffectSurface::tick`] changed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize,
    pub expired: usize,
}

pub struct EffectSurface {
    config: EffectConfig,
    bounds: Bounds,
    trigger: TriggerController,
    registry: EffectRegistry,
    auto_timers: TimerQueue<()>,
    auto_timer: Option<TimerId>,
    rng: StdRng,
    needs_repaint: bool,
    disposed: bool,
}

impl EffectSurface {
    /// Mount a surface at `now`
    pub fn new(config: EffectConfig, bounds: Bounds, now: Timestamp) -> Result<Self, EffectError> {
        Self::with_rng(config, bounds, now, StdRng::from_entropy())
    }

    /// Mount a surface with deterministic randomness
    pub fn seeded(
        config: EffectConfig,
        bounds: Bounds,
        now: Timestamp,
        seed: u64,
    ) -> Result<Self, EffectError> {
        Self::with_rng(config, bounds, now, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: EffectConfig,
        bounds: Bounds,
        now: Timestamp,
        rng: StdRng,
    ) -> Result<Self, EffectError> {
        config.validate()?;
        bounds.validate()?;

        let mut auto_timers = TimerQueue::new();
        let auto_timer = (config.trigger_mode == TriggerMode::Auto).then(|| {
            auto_timers.schedule_repeating(
                now.saturating_add(config.auto_interval_ms),
                config.auto_interval_ms,
                (),
            )
        });

        tracing::debug!(
            "mounted {} surface ({} mode, cap {}, ttl {}ms)",
            config.kind,
            config.trigger_mode,
            config.max_instances,
            config.ttl_ms
        );

        Ok(Self {
            trigger: TriggerController::new(config.trigger_mode, config.throttle_ms),
            registry: EffectRegistry::new(config.max_instances),
            config,
            bounds,
            auto_timers,
            auto_timer,
            rng,
            needs_repaint: false,
            disposed: false,
        })
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Resize; invalid bounds leave the current ones in place
    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<(), EffectError> {
        bounds.validate()?;
        self.bounds = bounds;
        Ok(())
    }

    pub fn trigger(&self) -> &TriggerController {
        &self.trigger
    }

    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// Route a pointer event through the trigger controller
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<EffectId> {
        if self.disposed {
            return None;
        }
        let request = self.trigger.handle(event)?;
        Some(self.spawn(request))
    }

    /// Programmatic trigger at full magnitude, in any mode
    pub fn trigger_at(&mut self, x: f32, y: f32, now: Timestamp) -> Option<EffectId> {
        if self.disposed {
            return None;
        }
        Some(self.spawn(SpawnRequest {
            x,
            y,
            at: now,
            source: TriggerSource::Explicit,
        }))
    }

    /// Advance time: expire due instances, run the Auto interval and let the
    /// trigger leave its cooldown
    pub fn tick(&mut self, now: Timestamp) -> TickReport {
        if self.disposed {
            return TickReport::default();
        }

        let expired = self.registry.expire(now).len();
        if expired > 0 {
            self.needs_repaint = true;
        }

        // Repeating timers fire at most once per poll; late ticks skip missed periods
        let spawned = self.auto_timers.poll(now).len();
        for _ in 0..spawned {
            let x = self.rng.gen::<f32>() * self.bounds.width;
            let y = self.rng.gen::<f32>() * self.bounds.height;
            self.spawn(SpawnRequest {
                x,
                y,
                at: now,
                source: TriggerSource::Auto,
            });
        }

        self.trigger.tick(now);
        TickReport { spawned, expired }
    }

    fn spawn(&mut self, request: SpawnRequest) -> EffectId {
        let magnitude = if request.source.is_deliberate() {
            1.0
        } else {
            let range = self.config.incidental_magnitude;
            self.rng.gen_range(range.min..=range.max)
        };

        let instance = EffectInstance::new(
            self.config.kind,
            request.x,
            request.y,
            request.at,
            magnitude,
        );
        let id = instance.id();
        tracing::trace!(
            "{:?} spawned {} at ({:.1}, {:.1}) magnitude {:.2}",
            request.source,
            id,
            request.x,
            request.y,
            magnitude
        );
        self.registry.add(instance, self.config.ttl_ms);
        self.needs_repaint = true;
        id
    }

    /// Live instances with their decay state at `now`
    ///
    /// Instances already due but not yet expired by [`tick`](Self::tick) are
    /// skipped.
    pub fn frame(
        &self,
        now: Timestamp,
        parameters: &IntensityParameterTable,
    ) -> Vec<RenderedEffect> {
        self.registry
            .iter()
            .filter(|(instance, ttl)| now < instance.expires_at(*ttl))
            .map(|(instance, ttl)| {
                let progress = self.config.easing.apply(instance.progress(now, ttl));
                RenderedEffect {
                    instance: instance.clone(),
                    progress,
                    opacity: parameters.opacity_at(instance.magnitude()) * (1.0 - progress),
                }
            })
            .collect()
    }

    pub fn snapshot(&self) -> Vec<EffectInstance> {
        self.registry.snapshot()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Expiration plus Auto timers still outstanding
    pub fn pending_timers(&self) -> usize {
        self.registry.pending_timers() + self.auto_timers.pending()
    }

    /// Earliest time [`tick`](Self::tick) has work to do
    pub fn next_deadline(&self) -> Option<Timestamp> {
        match (self.registry.next_expiry(), self.auto_timers.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    pub fn clear_repaint(&mut self) {
        self.needs_repaint = false;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Unmount: stop triggers, cancel the Auto timer, then clear the registry
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        self.trigger.stop();
        if let Some(id) = self.auto_timer.take() {
            self.auto_timers.cancel(id);
        }
        self.registry.clear();
        self.needs_repaint = true;
        tracing::debug!("disposed {} surface", self.config.kind);
    }
}

impl Drop for EffectSurface {
    fn drop(&mut self) {
        self.dispose();
    }
}
