//! Immutable effect instance records

use crate::error::EffectError;
use folio_core::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_EFFECT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique token identifying one effect instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u64);

impl EffectId {
    pub fn next() -> Self {
        Self(NEXT_EFFECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect#{}", self.0)
    }
}

/// Visual shape of an effect
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    /// Expanding ring from the pointer position
    #[default]
    Ripple,
    /// Condensation bead on a fogged surface
    Droplet,
    /// Diagonal highlight sweeping across the surface
    ShimmerSweep,
}

impl EffectKind {
    pub fn id(self) -> &'static str {
        match self {
            EffectKind::Ripple => "ripple",
            EffectKind::Droplet => "droplet",
            EffectKind::ShimmerSweep => "shimmer-sweep",
        }
    }

    pub fn all() -> &'static [EffectKind] {
        &[EffectKind::Ripple, EffectKind::Droplet, EffectKind::ShimmerSweep]
    }
}

impl FromStr for EffectKind {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "shimmer" => Ok(EffectKind::ShimmerSweep),
            other => EffectKind::all()
                .iter()
                .copied()
                .find(|kind| kind.id() == other)
                .ok_or_else(|| EffectError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One ephemeral effect
///
/// Never mutated after creation. Expiry removes the record from its
/// registry; the record itself carries no lifetime state.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectInstance {
    id: EffectId,
    kind: EffectKind,
    origin_x: f32,
    origin_y: f32,
    created_at: Timestamp,
    magnitude: f32,
}

impl EffectInstance {
    /// Create an instance with a fresh id. Magnitude is clamped to 0.0..=1.0.
    pub fn new(
        kind: EffectKind,
        origin_x: f32,
        origin_y: f32,
        created_at: Timestamp,
        magnitude: f32,
    ) -> Self {
        let magnitude = if magnitude.is_nan() {
            0.0
        } else {
            magnitude.clamp(0.0, 1.0)
        };
        Self {
            id: EffectId::next(),
            kind,
            origin_x,
            origin_y,
            created_at,
            magnitude,
        }
    }

    pub fn id(&self) -> EffectId {
        self.id
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn origin(&self) -> (f32, f32) {
        (self.origin_x, self.origin_y)
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// When an instance with this ttl is due for removal
    pub fn expires_at(&self, ttl_ms: u64) -> Timestamp {
        self.created_at.saturating_add(ttl_ms)
    }

    /// Linear lifetime progress at `now` (0.0 at creation, 1.0 at expiry)
    pub fn progress(&self, now: Timestamp, ttl_ms: u64) -> f32 {
        if ttl_ms == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.created_at);
        (elapsed as f64 / ttl_ms as f64).min(1.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = EffectInstance::new(EffectKind::Ripple, 0.0, 0.0, 0, 1.0);
        let b = EffectInstance::new(EffectKind::Ripple, 0.0, 0.0, 0, 1.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_magnitude_is_clamped() {
        let magnitude = |m| EffectInstance::new(EffectKind::Droplet, 0.0, 0.0, 0, m).magnitude();
        assert_eq!(magnitude(4.0), 1.0);
        assert_eq!(magnitude(-1.0), 0.0);
        assert_eq!(magnitude(f32::NAN), 0.0);
    }

    #[test]
    fn test_progress() {
        let instance = EffectInstance::new(EffectKind::Ripple, 10.0, 20.0, 1_000, 0.5);
        assert_eq!(instance.expires_at(400), 1_400);
        assert_eq!(instance.progress(900, 400), 0.0);
        assert_eq!(instance.progress(1_200, 400), 0.5);
        assert_eq!(instance.progress(5_000, 400), 1.0);
    }

    #[test]
    fn test_kind_ids() {
        assert_eq!(EffectKind::ShimmerSweep.to_string(), "shimmer-sweep");
        assert_eq!(EffectKind::all().len(), 3);
        assert_eq!("Droplet".parse::<EffectKind>(), Ok(EffectKind::Droplet));
        assert_eq!("shimmer".parse::<EffectKind>(), Ok(EffectKind::ShimmerSweep));
        assert_eq!(
            "sparkle".parse::<EffectKind>(),
            Err(EffectError::UnknownKind("sparkle".into()))
        );
    }
}
