//! Effect configuration errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffectError {
    #[error("max_instances must be at least 1")]
    ZeroCapacity,

    #[error("ttl_ms must be at least 1")]
    ZeroTtl,

    #[error("auto_interval_ms must be at least 1 in auto mode")]
    ZeroAutoInterval,

    #[error("unknown effect kind {0:?} (expected ripple, droplet or shimmer-sweep)")]
    UnknownKind(String),

    #[error("unknown trigger mode {0:?} (expected hover, click or auto)")]
    UnknownMode(String),

    #[error("incidental magnitude range {min}..={max} must satisfy 0 <= min <= max <= 1")]
    MagnitudeRange { min: f32, max: f32 },

    #[error("surface bounds {width}x{height} must be finite and non-negative")]
    InvalidBounds { width: f32, height: f32 },
}
