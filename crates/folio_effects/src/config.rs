//! Per-surface effect configuration (`[effects.<name>]` tables)

use crate::easing::Easing;
use crate::error::EffectError;
use crate::instance::EffectKind;
use crate::trigger::TriggerMode;
use serde::{Deserialize, Serialize};

pub const DEFAULT_THROTTLE_MS: u64 = 200;
pub const DEFAULT_AUTO_INTERVAL_MS: u64 = 3000;

/// Magnitude bounds for incidental (hover and ambient) triggers
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeRange {
    pub min: f32,
    pub max: f32,
}

impl MagnitudeRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, magnitude: f32) -> bool {
        (self.min..=self.max).contains(&magnitude)
    }

    fn is_valid(&self) -> bool {
        0.0 <= self.min && self.min <= self.max && self.max <= 1.0
    }
}

impl Default for MagnitudeRange {
    fn default() -> Self {
        Self::new(0.3, 0.7)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    #[serde(default)]
    pub kind: EffectKind,
    #[serde(default)]
    pub trigger_mode: TriggerMode,
    #[serde(default = "default_max_instances")]
    pub max_instances: usize,
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
    #[serde(default = "default_auto_interval_ms")]
    pub auto_interval_ms: u64,
    #[serde(default)]
    pub incidental_magnitude: MagnitudeRange,
    /// Decay curve applied to lifetime progress when rendering
    #[serde(default = "default_easing")]
    pub easing: Easing,
}

fn default_max_instances() -> usize {
    5
}

fn default_ttl_ms() -> u64 {
    1000
}

fn default_throttle_ms() -> u64 {
    DEFAULT_THROTTLE_MS
}

fn default_auto_interval_ms() -> u64 {
    DEFAULT_AUTO_INTERVAL_MS
}

fn default_easing() -> Easing {
    Easing::EaseOut
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::ripple()
    }
}

impl EffectConfig {
    /// Hover ripples on cards and buttons
    pub fn ripple() -> Self {
        Self {
            kind: EffectKind::Ripple,
            trigger_mode: TriggerMode::Hover,
            max_instances: default_max_instances(),
            ttl_ms: default_ttl_ms(),
            throttle_ms: DEFAULT_THROTTLE_MS,
            auto_interval_ms: DEFAULT_AUTO_INTERVAL_MS,
            incidental_magnitude: MagnitudeRange::default(),
            easing: Easing::EaseOut,
        }
    }

    /// Ambient droplets on fogged panels
    pub fn droplet() -> Self {
        Self {
            kind: EffectKind::Droplet,
            trigger_mode: TriggerMode::Auto,
            max_instances: 8,
            ttl_ms: 2400,
            easing: Easing::EaseInOut,
            ..Self::ripple()
        }
    }

    /// Single highlight sweep on hover
    pub fn shimmer() -> Self {
        Self {
            kind: EffectKind::ShimmerSweep,
            max_instances: 1,
            ttl_ms: 1200,
            easing: Easing::CubicBezier(0.4, 0.0, 0.2, 1.0),
            ..Self::ripple()
        }
    }

    /// Preset for a kind
    pub fn for_kind(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Ripple => Self::ripple(),
            EffectKind::Droplet => Self::droplet(),
            EffectKind::ShimmerSweep => Self::shimmer(),
        }
    }

    pub fn with_trigger_mode(mut self, mode: TriggerMode) -> Self {
        self.trigger_mode = mode;
        self
    }

    pub fn with_max_instances(mut self, max_instances: usize) -> Self {
        self.max_instances = max_instances;
        self
    }

    pub fn with_ttl(mut self, ttl_ms: u64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    pub fn with_throttle(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    pub fn with_auto_interval(mut self, auto_interval_ms: u64) -> Self {
        self.auto_interval_ms = auto_interval_ms;
        self
    }

    pub fn validate(&self) -> Result<(), EffectError> {
        if self.max_instances == 0 {
            return Err(EffectError::ZeroCapacity);
        }
        if self.ttl_ms == 0 {
            return Err(EffectError::ZeroTtl);
        }
        if self.trigger_mode == TriggerMode::Auto && self.auto_interval_ms == 0 {
            return Err(EffectError::ZeroAutoInterval);
        }
        if !self.incidental_magnitude.is_valid() {
            let MagnitudeRange { min, max } = self.incidental_magnitude;
            return Err(EffectError::MagnitudeRange { min, max });
        }
        Ok(())
    }
}
